// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera engine port contract for Vista.
//!
//! The engine's addressable state is `(orbit, target, field of view)`;
//! camera position is never set directly. Mutations take effect only after
//! the engine settles, and a percentage radius resolves during layout, which
//! can lag one frame behind settlement.
//!
//! # Design Principles
//!
//! - **Engines are dumb**: they accept attribute text and settle. No view logic.
//! - **Attribute text is verbatim**: the port never rewrites tokens.
//! - **Read after settle**: readbacks before settlement may be stale.

mod port;
mod sim;

pub use port::{CameraEngine, EngineEvent, FieldOfView};
pub use sim::{EngineCall, SimulatedEngine, DEFAULT_FRAMING_RADIUS, MAX_QUEUED_EVENTS};
