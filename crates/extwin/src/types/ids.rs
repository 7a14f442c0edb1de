/*! Identity types.

Window IDs are opaque strings handed to extensions. Native handles are the
bridge's own identifiers and never leave the host.
*/

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use ts_rs::TS;

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

/// Window ID. Unique across all extensions for the life of the process, never reused.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct WindowId(String);

impl WindowId {
  /// Allocate a fresh ID.
  pub(crate) fn next() -> Self {
    let n = NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed);
    Self(format!("window-{n}"))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for WindowId {
  fn from(value: &str) -> Self {
    Self(value.to_owned())
  }
}

/// Owning extension ID.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ExtensionId(String);

impl ExtensionId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for ExtensionId {
  fn from(value: &str) -> Self {
    Self(value.to_owned())
  }
}

/// Target of a batch operation: one window or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum WindowIds {
  One(WindowId),
  Many(Vec<WindowId>),
}

impl WindowIds {
  /// Whether the caller passed a single ID rather than a list.
  pub const fn is_single(&self) -> bool {
    matches!(self, Self::One(_))
  }

  /// Target IDs in order, duplicates removed.
  pub fn into_unique(self) -> Vec<WindowId> {
    match self {
      Self::One(id) => vec![id],
      Self::Many(ids) => {
        let mut seen = std::collections::HashSet::new();
        ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
      }
    }
  }
}

impl From<WindowId> for WindowIds {
  fn from(id: WindowId) -> Self {
    Self::One(id)
  }
}

impl From<&WindowId> for WindowIds {
  fn from(id: &WindowId) -> Self {
    Self::One(id.clone())
  }
}

impl From<Vec<WindowId>> for WindowIds {
  fn from(ids: Vec<WindowId>) -> Self {
    Self::Many(ids)
  }
}

impl From<&[WindowId]> for WindowIds {
  fn from(ids: &[WindowId]) -> Self {
    Self::Many(ids.to_vec())
  }
}

/// Handle the native bridge uses for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into, Serialize, Deserialize)]
pub struct NativeHandle(pub u64);

/// ID of a resolved menu item, unique within one menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into, Serialize, Deserialize)]
pub struct MenuItemId(pub u32);
