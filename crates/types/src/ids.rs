//! Identifiers for components and component types
//!
//! A [`ComponentId`] is a generational handle into a component arena. Parents
//! refer to children and children refer back to parents through these handles,
//! so the tree never holds two owning references to the same node.

use slotmap::{Key, new_key_type};
use std::fmt;

new_key_type! {
    /// Handle to a component slot in an arena.
    ///
    /// The slot version changes whenever a slot is released and reused, so a
    /// stale handle to a disposed component never aliases a newer one.
    pub struct ComponentId;
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:?}", self.data())
    }
}

/// Short type tag identifying a kind of component (e.g. `"pnl"` for panels).
///
/// Tags are used when generating component ids and in trace output.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObjectType(&'static str);

impl ObjectType {
    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    /// Returns the tag text
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl From<&'static str> for ObjectType {
    fn from(s: &'static str) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ObjectType {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::collections::HashMap;

    #[test]
    fn test_reused_slot_gets_a_new_handle() {
        let mut arena: SlotMap<ComponentId, &str> = SlotMap::with_key();
        let first = arena.insert("first");
        arena.remove(first);
        let reused = arena.insert("reused");

        assert_ne!(first, reused);
        assert!(arena.get(first).is_none());
        assert_ne!(first.to_string(), reused.to_string());
    }

    #[test]
    fn test_null_handle() {
        assert!(ComponentId::null().is_null());
        assert!(ComponentId::default().is_null());
    }

    #[test]
    fn test_object_type_as_map_key() {
        const PANEL: ObjectType = ObjectType::new("pnl");
        let mut counters = HashMap::new();
        *counters.entry(PANEL).or_insert(0) += 1;
        *counters.entry(ObjectType::from("pnl")).or_insert(0) += 1;

        assert_eq!(counters.get(&PANEL), Some(&2));
        assert_eq!(PANEL.as_str(), "pnl");
    }
}
