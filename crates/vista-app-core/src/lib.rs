// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Vista tools (config, prefs, notices, clipboard).
//! Keeps front-end adapters thin and framework-agnostic.

pub mod clipboard;
pub mod config;
pub mod config_port;
pub mod notice;
pub mod prefs;
