/*!
Parent/child window relationships.

Single source of truth for the window hierarchy. All mutations go through
methods that maintain the link invariants.

## Invariants

1. **Single parent**: each window has at most one parent.
2. **Bidirectional consistency**: if `parent_of[child] = parent`, then
   `children_of[parent]` contains `child`, and vice versa.
3. **Forest**: no window is its own ancestor. Edges that would close a cycle
   are rejected.
4. **Reparenting is allowed**: setting a new parent moves the child.
*/

use crate::types::WindowId;
use std::collections::HashMap;

/// Rejected edge: `parent` is `child` or one of its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CycleRejected;

#[derive(Debug, Default)]
pub(crate) struct Hierarchy {
  parent_of: HashMap<WindowId, WindowId>,
  children_of: HashMap<WindowId, Vec<WindowId>>,
}

impl Hierarchy {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn parent(&self, id: &WindowId) -> Option<&WindowId> {
    self.parent_of.get(id)
  }

  /// Children in the order they were attached.
  pub(crate) fn children(&self, id: &WindowId) -> &[WindowId] {
    self.children_of.get(id).map_or(&[], Vec::as_slice)
  }

  /// Whether attaching `child` under `parent` would close a cycle.
  ///
  /// Walks the ancestors of `parent`; O(depth).
  pub(crate) fn would_cycle(&self, child: &WindowId, parent: &WindowId) -> bool {
    let mut cursor = Some(parent);
    while let Some(id) = cursor {
      if id == child {
        return true;
      }
      cursor = self.parent_of.get(id);
    }
    false
  }

  /// Attach `child` under `parent`, detaching it from any previous parent.
  /// Returns the previous parent.
  pub(crate) fn set_parent(
    &mut self,
    child: &WindowId,
    parent: &WindowId,
  ) -> Result<Option<WindowId>, CycleRejected> {
    if self.parent_of.get(child) == Some(parent) {
      return Ok(Some(parent.clone()));
    }
    if self.would_cycle(child, parent) {
      return Err(CycleRejected);
    }
    let previous = self.remove_parent(child);
    self.parent_of.insert(child.clone(), parent.clone());
    self
      .children_of
      .entry(parent.clone())
      .or_default()
      .push(child.clone());
    Ok(previous)
  }

  /// Detach `child` from its parent. Returns the previous parent.
  pub(crate) fn remove_parent(&mut self, child: &WindowId) -> Option<WindowId> {
    let parent = self.parent_of.remove(child)?;
    if let Some(siblings) = self.children_of.get_mut(&parent) {
      siblings.retain(|sibling| sibling != child);
      if siblings.is_empty() {
        self.children_of.remove(&parent);
      }
    }
    Some(parent)
  }

  /// Drop a window. Its children are promoted to top level, not removed.
  /// Returns the promoted children.
  pub(crate) fn remove(&mut self, id: &WindowId) -> Vec<WindowId> {
    self.remove_parent(id);
    let children = self.children_of.remove(id).unwrap_or_default();
    for child in &children {
      self.parent_of.remove(child);
    }
    children
  }
}


#[cfg(test)]
mod proptests {
  use super::*;
  use proptest::prelude::*;

  fn id(n: u8) -> WindowId {
    WindowId::from(format!("window-{n}"))
  }

  proptest! {
    /// No sequence of accepted edges ever forms a cycle, and links stay
    /// consistent in both directions.
    #[test]
    fn accepted_edges_form_a_forest(
      edges in prop::collection::vec((0u8..12, 0u8..12), 0..60),
      removals in prop::collection::vec(0u8..12, 0..6)
    ) {
      let mut h = Hierarchy::new();
      for (child, parent) in edges {
        h.set_parent(&id(child), &id(parent)).ok();
      }
      for r in removals {
        h.remove(&id(r));
      }

      for n in 0u8..12 {
        let start = id(n);
        let mut seen = 0;
        let mut cursor = h.parent(&start);
        while let Some(p) = cursor {
          prop_assert_ne!(p, &start);
          seen += 1;
          prop_assert!(seen <= 12);
          cursor = h.parent(p);
        }
        for child in h.children(&start) {
          prop_assert_eq!(h.parent(child), Some(&start));
        }
        if let Some(p) = h.parent(&start) {
          prop_assert!(h.children(p).contains(&start));
        }
      }
    }
  }
}
