/*! Error types for window operations. */

use super::{NativeHandle, WindowId};
use serde::Serialize;
use std::fmt;

/// Errors that can occur during window operations.
///
/// Validation errors (`NotFound`, `InvalidArgument`, `Cycle`) are returned before
/// anything is queued. `AlreadyRemoved`, `Closed` and `NativeFailure` surface when
/// the window's queue runs the operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum WindowError {
  #[error("Window not found: {0}")]
  NotFound(WindowId),

  #[error("Invalid argument: {0}")]
  InvalidArgument(String),

  #[error("Window {child} cannot be parented to {parent}: it would become its own ancestor")]
  Cycle { child: WindowId, parent: WindowId },

  #[error("Window already removed: {0}")]
  AlreadyRemoved(WindowId),

  #[error("Window closed: {0}")]
  Closed(WindowId),

  #[error("Native operation failed for {id}: {reason}")]
  NativeFailure { id: WindowId, reason: String },

  #[error("{0}")]
  Aggregate(AggregateFailure),

  #[error("No window for native handle {0}")]
  UnknownHandle(NativeHandle),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl WindowError {
  pub(crate) fn invalid(reason: impl Into<String>) -> Self {
    Self::InvalidArgument(reason.into())
  }
}

/// Outcome of a batch operation where at least one window failed.
///
/// Windows not listed here succeeded and stay mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateFailure {
  /// Number of windows the batch targeted.
  pub attempted: usize,
  /// One error per failed window, in submission order.
  pub failures: Vec<(WindowId, WindowError)>,
}

impl AggregateFailure {
  /// IDs that failed, in submission order.
  pub fn failed_ids(&self) -> impl Iterator<Item = &WindowId> {
    self.failures.iter().map(|(id, _)| id)
  }

  /// Error for one window, if it failed.
  pub fn error_for(&self, id: &WindowId) -> Option<&WindowError> {
    self
      .failures
      .iter()
      .find_map(|(failed, e)| (failed == id).then_some(e))
  }
}

impl fmt::Display for AggregateFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} of {} window operations failed",
      self.failures.len(),
      self.attempted
    )?;
    for (id, e) in &self.failures {
      write!(f, "; {id}: {e}")?;
    }
    Ok(())
  }
}

/// Result type for window operations.
pub type WindowResult<T> = Result<T, WindowError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn aggregate_lists_each_failure() {
    let failure = AggregateFailure {
      attempted: 3,
      failures: vec![(
        WindowId::from("window-2"),
        WindowError::NotFound(WindowId::from("window-2")),
      )],
    };
    let text = failure.to_string();
    assert!(text.starts_with("1 of 3 window operations failed"));
    assert!(text.contains("window-2: Window not found: window-2"));
    assert!(failure.error_for(&WindowId::from("window-2")).is_some());
    assert!(failure.error_for(&WindowId::from("window-1")).is_none());
  }

  #[test]
  fn errors_serialize_with_kind_tag() {
    let e = WindowError::AlreadyRemoved(WindowId::from("window-7"));
    let json = serde_json::to_value(&e).ok();
    assert_eq!(
      json,
      Some(serde_json::json!({ "kind": "alreadyRemoved", "detail": "window-7" }))
    );
  }
}
