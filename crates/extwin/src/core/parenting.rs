/*!
Parent/child operations.

Parenting is checked twice: synchronously here, so an obvious cycle is
rejected before anything is queued, and again under the hierarchy lock when
the change runs, since other windows may have been reparented in between.
*/

use super::request::UpdateRequest;
use super::{Completion, WindowManager};
use crate::bridge::NativeBridge;
use crate::types::{WindowError, WindowId, WindowRef, WindowResult};

impl<B: NativeBridge> WindowManager<B> {
  /// Attach `id` under `parent`. Cross-extension parenting is allowed.
  pub fn set_parent_window(&self, id: &WindowId, parent: &WindowId) -> Completion {
    let store = &self.shared.store;
    if !store.contains(id) {
      return Completion::failed(WindowError::NotFound(id.clone()));
    }
    if let Err(e) = store.check_parent(id, parent) {
      return Completion::failed(e);
    }
    let request = UpdateRequest {
      parent: Some(Some(parent.clone())),
      ..UpdateRequest::default()
    };
    self.submit_update(id, request)
  }

  /// Detach `id` from its parent. A modal window stops being modal.
  pub fn remove_parent_window(&self, id: &WindowId) -> Completion {
    let request = UpdateRequest {
      parent: Some(None),
      ..UpdateRequest::default()
    };
    self.submit_update(id, request)
  }

  /// `None` for a top-level window.
  pub fn get_parent_window(&self, id: &WindowId) -> WindowResult<Option<WindowRef>> {
    let store = &self.shared.store;
    store.target(id)?;
    Ok(store.parent_of(id).and_then(|p| store.target(&p).ok()))
  }

  /// Direct children, in the order they were attached.
  pub fn get_child_windows(&self, id: &WindowId) -> WindowResult<Vec<WindowRef>> {
    let store = &self.shared.store;
    store.target(id)?;
    Ok(
      store
        .children_of(id)
        .iter()
        .filter_map(|child| store.target(child).ok())
        .collect(),
    )
  }
}
