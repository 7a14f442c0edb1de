/*!
Window record store - the single source of truth for window state.

Records are individually locked so changes to different windows never
contend. `apply` is the only mutation path; both the command sequencer and
native-change ingestion go through it.

Lock order: hierarchy, then a record. The record map lock is only held long
enough to clone a record's `Arc`.

## Module Structure

- `mod.rs` - `WindowStore`: insert, lookup, query, apply, delete
- `record.rs` - `WindowRecord`, `RecordChange` and the transition rules
- `hierarchy.rs` - `Hierarchy` for parent/child relationships
*/

mod hierarchy;
mod record;

pub(crate) use record::{RecordChange, WindowRecord};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::types::{
  EventKind, NativeHandle, Window, WindowError, WindowFilter, WindowId, WindowRef, WindowResult,
};
use hierarchy::{CycleRejected, Hierarchy};

type SharedRecord = Arc<Mutex<WindowRecord>>;

#[derive(Debug, Default)]
pub(crate) struct WindowStore {
  records: RwLock<HashMap<WindowId, SharedRecord>>,
  handles: RwLock<HashMap<NativeHandle, WindowId>>,
  hierarchy: Mutex<Hierarchy>,
  next_seq: AtomicU64,
}

impl WindowStore {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn next_seq(&self) -> u64 {
    self.next_seq.fetch_add(1, Ordering::Relaxed)
  }

  fn record(&self, id: &WindowId) -> WindowResult<SharedRecord> {
    self
      .records
      .read()
      .get(id)
      .cloned()
      .ok_or_else(|| WindowError::NotFound(id.clone()))
  }

  pub(crate) fn contains(&self, id: &WindowId) -> bool {
    self.records.read().contains_key(id)
  }

  /// Commit a freshly created window. Returns its snapshot.
  ///
  /// A parent that vanished while the native window was being created is
  /// dropped, along with `modal`.
  pub(crate) fn insert(&self, mut record: WindowRecord, parent: Option<&WindowId>) -> Window {
    let id = record.id.clone();
    let mut hierarchy = self.hierarchy.lock();

    let parent = parent.and_then(|p| {
      if self.contains(p) && hierarchy.set_parent(&id, p).is_ok() {
        Some(p.clone())
      } else {
        log::warn!("Parent {p} of new window {id} is gone, creating top-level");
        None
      }
    });
    if parent.is_none() {
      record.attrs.flags.modal = false;
    }

    let snapshot = record.snapshot(parent);
    self.handles.write().insert(record.handle, id.clone());
    self.records.write().insert(id, Arc::new(Mutex::new(record)));
    snapshot
  }

  /// Read a record. Never call the native bridge inside the closure.
  pub(crate) fn with_record<R>(
    &self,
    id: &WindowId,
    f: impl FnOnce(&WindowRecord) -> R,
  ) -> WindowResult<R> {
    let record = self.record(id)?;
    let guard = record.lock();
    Ok(f(&guard))
  }

  pub(crate) fn get(&self, id: &WindowId) -> WindowResult<Window> {
    let record = self.record(id)?;
    let parent = self.parent_of(id);
    let guard = record.lock();
    Ok(guard.snapshot(parent))
  }

  /// Windows matching `filter`, oldest first.
  pub(crate) fn query(&self, filter: &WindowFilter) -> Vec<Window> {
    let records: Vec<SharedRecord> = self.records.read().values().cloned().collect();
    let mut matched: Vec<(u64, Window)> = records
      .iter()
      .filter_map(|record| {
        let (seq, id) = {
          let guard = record.lock();
          (guard.seq, guard.id.clone())
        };
        let parent = self.parent_of(&id);
        let window = record.lock().snapshot(parent);
        filter.matches(&window).then_some((seq, window))
      })
      .collect();
    matched.sort_by_key(|(seq, _)| *seq);
    matched.into_iter().map(|(_, w)| w).collect()
  }

  pub(crate) fn id_for_handle(&self, handle: NativeHandle) -> Option<WindowId> {
    self.handles.read().get(&handle).cloned()
  }

  pub(crate) fn target(&self, id: &WindowId) -> WindowResult<WindowRef> {
    self.with_record(id, WindowRecord::target)
  }

  pub(crate) fn parent_of(&self, id: &WindowId) -> Option<WindowId> {
    self.hierarchy.lock().parent(id).cloned()
  }

  pub(crate) fn children_of(&self, id: &WindowId) -> Vec<WindowId> {
    self.hierarchy.lock().children(id).to_vec()
  }

  /// Check that `child` may be attached under `parent` right now.
  pub(crate) fn check_parent(&self, child: &WindowId, parent: &WindowId) -> WindowResult<()> {
    if !self.contains(parent) {
      return Err(WindowError::NotFound(parent.clone()));
    }
    if self.hierarchy.lock().would_cycle(child, parent) {
      return Err(WindowError::Cycle {
        child: child.clone(),
        parent: parent.clone(),
      });
    }
    Ok(())
  }

  /// Apply a change atomically. Returns the transitions it caused.
  ///
  /// A parent change is validated and linked under the hierarchy lock. A
  /// window left without a parent is never modal.
  pub(crate) fn apply(&self, id: &WindowId, change: RecordChange) -> WindowResult<Vec<EventKind>> {
    let record = self.record(id)?;

    if change.parent.is_none() && change.patch.modal != Some(true) {
      return Ok(record.lock().apply(change));
    }

    let mut hierarchy = self.hierarchy.lock();
    match &change.parent {
      Some(Some(parent)) => {
        if !self.contains(parent) {
          return Err(WindowError::NotFound(parent.clone()));
        }
        hierarchy
          .set_parent(id, parent)
          .map_err(|CycleRejected| WindowError::Cycle {
            child: id.clone(),
            parent: parent.clone(),
          })?;
      }
      Some(None) => {
        hierarchy.remove_parent(id);
      }
      None => {}
    }
    let orphan = hierarchy.parent(id).is_none();

    let mut guard = record.lock();
    let transitions = guard.apply(change);
    if orphan && guard.attrs.flags.modal {
      log::debug!("Window {id} has no parent, clearing modal");
      guard.attrs.flags.modal = false;
    }
    Ok(transitions)
  }

  /// Delete a record. Children are promoted to top level and lose `modal`.
  /// Returns the final snapshot, parent included.
  pub(crate) fn delete(&self, id: &WindowId) -> WindowResult<Window> {
    let mut hierarchy = self.hierarchy.lock();
    let record = self
      .records
      .write()
      .remove(id)
      .ok_or_else(|| WindowError::NotFound(id.clone()))?;
    let parent = hierarchy.parent(id).cloned();
    let promoted = hierarchy.remove(id);

    for child in &promoted {
      let Ok(child_record) = self.record(child) else {
        log::error!("Child {child} of {id} has no record");
        continue;
      };
      child_record.lock().attrs.flags.modal = false;
    }
    drop(hierarchy);

    let guard = record.lock();
    self.handles.write().remove(&guard.handle);
    Ok(guard.snapshot(parent))
  }
}
