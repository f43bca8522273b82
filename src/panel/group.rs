//! Panel groups - tab sets sharing one dock slot

use std::sync::atomic::{AtomicU64, Ordering};

use super::PanelKey;

/// Unique identifier for a panel group
///
/// Ids are unique for the lifetime of the process and are never persisted;
/// snapshots identify groups by their members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u64);

impl GroupId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        GroupId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// An ordered tab set of panels. Insertion order is tab order.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelGroup {
    id: GroupId,
    panels: Vec<PanelKey>,
}

impl PanelGroup {
    /// Create an empty group with a fresh id
    pub fn new() -> Self {
        Self {
            id: GroupId::next(),
            panels: Vec::new(),
        }
    }

    /// Create a group holding exactly one panel
    pub fn standalone(panel: PanelKey) -> Self {
        Self {
            id: GroupId::next(),
            panels: vec![panel],
        }
    }

    pub fn from_panels(panels: Vec<PanelKey>) -> Self {
        Self {
            id: GroupId::next(),
            panels,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn panels(&self) -> &[PanelKey] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// First member, which represents the group in a dock stack
    pub fn leader(&self) -> Option<&PanelKey> {
        self.panels.first()
    }

    pub fn contains(&self, panel: &str) -> bool {
        self.panels.iter().any(|p| p.as_str() == panel)
    }

    /// True iff the group has exactly one member and it is `panel`
    pub fn is_standalone(&self, panel: &str) -> bool {
        self.panels.len() == 1 && self.panels[0].as_str() == panel
    }

    pub fn index_of(&self, panel: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.as_str() == panel)
    }

    /// Insert a panel at `index`. Panics if `index > len`.
    pub fn insert(&mut self, index: usize, panel: PanelKey) {
        self.panels.insert(index, panel);
    }

    pub fn push(&mut self, panel: PanelKey) {
        self.panels.push(panel);
    }

    /// Remove a panel, returning whether it was a member
    pub fn remove(&mut self, panel: &str) -> bool {
        match self.index_of(panel) {
            Some(index) => {
                self.panels.remove(index);
                true
            }
            None => false,
        }
    }

    /// Move the panel at `old_index` to `new_index`. Panics if either is out of range.
    pub fn move_panel(&mut self, old_index: usize, new_index: usize) {
        let panel = self.panels.remove(old_index);
        self.panels.insert(new_index, panel);
    }

    /// Drop members rejected by `keep`
    pub(crate) fn retain(&mut self, keep: impl FnMut(&PanelKey) -> bool) {
        self.panels.retain(keep);
    }
}

impl Default for PanelGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(keys: &[&str]) -> PanelGroup {
        PanelGroup::from_panels(keys.iter().map(|k| PanelKey::from(*k)).collect())
    }

    #[test]
    fn test_group_ids_are_unique() {
        let a = PanelGroup::new();
        let b = PanelGroup::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_standalone() {
        let g = PanelGroup::standalone("p1".into());
        assert!(g.is_standalone("p1"));
        assert!(!g.is_standalone("p2"));

        let g = group(&["p1", "p2"]);
        assert!(!g.is_standalone("p1"));
        assert_eq!(g.leader().map(|k| k.as_str()), Some("p1"));
    }

    #[test]
    fn test_insert_remove_index_of() {
        let mut g = group(&["a", "c"]);
        g.insert(1, "b".into());
        assert_eq!(g.index_of("b"), Some(1));
        assert!(g.contains("c"));

        assert!(g.remove("a"));
        assert!(!g.remove("a"));
        assert_eq!(g.index_of("b"), Some(0));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_move_panel() {
        let mut g = group(&["a", "b", "c"]);
        g.move_panel(0, 2);
        let order: Vec<&str> = g.panels().iter().map(|k| k.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    #[should_panic]
    fn test_insert_out_of_range_panics() {
        let mut g = group(&["a"]);
        g.insert(5, "b".into());
    }
}
