// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! View records and the ordered view collection.

use vista_geom::{OrbitError, OrbitTokens, Point3};

use crate::file::CollectionLoadFailure;

/// A named, immutable camera configuration.
///
/// The orbit is required and must resolve; `position`, when present, is
/// turned into a target relative to the orbit the engine actually realizes.
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    id: String,
    label: String,
    position: Option<Point3>,
    orbit: OrbitTokens,
    fov: Option<String>,
}

impl View {
    /// Build a view; the label defaults to `id`.
    ///
    /// Fails when an orbit token cannot be interpreted.
    pub fn new(id: impl Into<String>, orbit: OrbitTokens) -> Result<Self, OrbitError> {
        orbit.spec()?;
        let id = id.into();
        Ok(Self {
            label: id.clone(),
            id,
            position: None,
            orbit,
            fov: None,
        })
    }

    /// Set the display label; an empty label falls back to the id.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = if label.is_empty() {
            self.id.clone()
        } else {
            label
        };
        self
    }

    /// Set the absolute camera position.
    pub fn with_position(mut self, position: Option<Point3>) -> Self {
        self.position = position;
        self
    }

    /// Set the field-of-view token.
    pub fn with_fov(mut self, fov: Option<String>) -> Self {
        self.fov = fov;
        self
    }

    /// Unique key.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Desired absolute camera position.
    pub fn position(&self) -> Option<Point3> {
        self.position
    }

    /// Orbit tokens, verbatim.
    pub fn orbit(&self) -> &OrbitTokens {
        &self.orbit
    }

    /// Field-of-view token.
    pub fn fov(&self) -> Option<&str> {
        self.fov.as_deref()
    }
}

/// Cycling direction through a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Next view (wraps to the first).
    Forward,
    /// Previous view (wraps to the last).
    Backward,
}

/// Ordered views with unique ids. Built once, replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewCollection {
    views: Vec<View>,
}

impl ViewCollection {
    /// Build a collection, rejecting duplicate ids.
    pub fn new(views: Vec<View>) -> Result<Self, CollectionLoadFailure> {
        for (i, v) in views.iter().enumerate() {
            if views[..i].iter().any(|w| w.id == v.id) {
                return Err(CollectionLoadFailure::DuplicateId(v.id.clone()));
            }
        }
        Ok(Self { views })
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// True when there are no views.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Views in order.
    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    /// View at `index`.
    pub fn at(&self, index: usize) -> Option<&View> {
        self.views.get(index)
    }

    /// First view, if any.
    pub fn first(&self) -> Option<&View> {
        self.views.first()
    }

    /// Look a view up by id.
    pub fn get(&self, id: &str) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }

    /// Position of `id` in the collection.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.views.iter().position(|v| v.id == id)
    }

    /// The view one step from `current` in `dir`, wrapping at both ends.
    ///
    /// An unknown or absent `current` starts from the first view going
    /// forward and from the last view going backward.
    pub fn cycle(&self, current: Option<&str>, dir: Direction) -> Option<&View> {
        let n = self.views.len();
        if n == 0 {
            return None;
        }
        let next = match (current.and_then(|id| self.index_of(id)), dir) {
            (Some(i), Direction::Forward) => (i + 1) % n,
            (Some(i), Direction::Backward) => (i + n - 1) % n,
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => n - 1,
        };
        self.views.get(next)
    }
}

impl<'a> IntoIterator for &'a ViewCollection {
    type Item = &'a View;
    type IntoIter = std::slice::Iter<'a, View>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(id: &str) -> View {
        View::new(id, OrbitTokens::new("0deg", "90deg", "1m")).unwrap()
    }

    fn abc() -> ViewCollection {
        ViewCollection::new(vec![view("a"), view("b"), view("c")]).unwrap()
    }

    #[test]
    fn label_defaults_to_id() {
        let v = view("front");
        assert_eq!(v.label(), "front");
        assert_eq!(v.clone().with_label("").label(), "front");
        assert_eq!(v.with_label("Front").label(), "Front");
    }

    #[test]
    fn unresolvable_orbit_is_rejected() {
        assert!(View::new("x", OrbitTokens::new("up", "90deg", "1m")).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ViewCollection::new(vec![view("a"), view("a")]).unwrap_err();
        assert!(matches!(err, CollectionLoadFailure::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let c = abc();
        assert_eq!(c.cycle(Some("c"), Direction::Forward).unwrap().id(), "a");
        assert_eq!(c.cycle(Some("a"), Direction::Backward).unwrap().id(), "c");
        assert_eq!(c.cycle(Some("a"), Direction::Forward).unwrap().id(), "b");
    }

    #[test]
    fn cycle_from_unknown() {
        let c = abc();
        assert_eq!(c.cycle(None, Direction::Forward).unwrap().id(), "a");
        assert_eq!(c.cycle(Some("zz"), Direction::Backward).unwrap().id(), "c");
        assert!(ViewCollection::empty().cycle(None, Direction::Forward).is_none());
    }

    #[test]
    fn lookup() {
        let c = abc();
        assert_eq!(c.index_of("b"), Some(1));
        assert!(c.get("zz").is_none());
        assert_eq!(c.at(2).map(View::id), Some("c"));
        assert_eq!(c.iter().count(), 3);
    }
}
