/*! Event types delivered to listeners and subscribers. */

use super::{Window, WindowRef};
use serde::Serialize;
use ts_rs::TS;

/// Event topic. One per declared `on*` handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum EventKind {
  Created,
  Removed,
  Closed,
  Focused,
  Unfocused,
  Shown,
  Hidden,
  EnteredFullscreen,
  ExitedFullscreen,
  Maximized,
  Unmaximized,
  Minimized,
  Restored,
  Resized,
  Moved,
  MenuClicked,
  ContextMenuClicked,
  ContextMenuClosed,
}

impl EventKind {
  pub const ALL: [Self; 18] = [
    Self::Created,
    Self::Removed,
    Self::Closed,
    Self::Focused,
    Self::Unfocused,
    Self::Shown,
    Self::Hidden,
    Self::EnteredFullscreen,
    Self::ExitedFullscreen,
    Self::Maximized,
    Self::Unmaximized,
    Self::Minimized,
    Self::Restored,
    Self::Resized,
    Self::Moved,
    Self::MenuClicked,
    Self::ContextMenuClicked,
    Self::ContextMenuClosed,
  ];

  /// Name of the handler extensions register on, e.g. `onMaximized`.
  pub const fn handler_name(self) -> &'static str {
    match self {
      Self::Created => "onCreated",
      Self::Removed => "onRemoved",
      Self::Closed => "onClosed",
      Self::Focused => "onFocused",
      Self::Unfocused => "onUnfocused",
      Self::Shown => "onShown",
      Self::Hidden => "onHidden",
      Self::EnteredFullscreen => "onEnteredFullscreen",
      Self::ExitedFullscreen => "onExitedFullscreen",
      Self::Maximized => "onMaximized",
      Self::Unmaximized => "onUnmaximized",
      Self::Minimized => "onMinimized",
      Self::Restored => "onRestored",
      Self::Resized => "onResized",
      Self::Moved => "onMoved",
      Self::MenuClicked => "onMenuClicked",
      Self::ContextMenuClicked => "onContextMenuClicked",
      Self::ContextMenuClosed => "onContextMenuClosed",
    }
  }
}

/// Who caused a change. Not exposed to extensions, but kept on every event so
/// hosts and tests can tell the two paths apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ChangeOrigin {
  /// An extension API call, run through the window's queue.
  Extension,
  /// A change the native toolkit reported on its own (user resize, OS close).
  Native,
}

/// Details of a menu or context-menu click.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct MenuClicked {
  /// Tag of the clicked item. Absent when the item had none.
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub tag: Option<String>,
}

/// Second listener argument, for the events that carry one.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum EventDetails {
  /// `onCreated` and `onRemoved`.
  Window(Box<Window>),
  /// `onMenuClicked` and `onContextMenuClicked`.
  MenuClicked(MenuClicked),
}

/// A single emitted event.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct WindowEvent {
  pub kind: EventKind,
  pub target: WindowRef,
  pub origin: ChangeOrigin,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub details: Option<EventDetails>,
}

impl WindowEvent {
  pub const fn new(kind: EventKind, target: WindowRef, origin: ChangeOrigin) -> Self {
    Self {
      kind,
      target,
      origin,
      details: None,
    }
  }

  #[must_use]
  pub fn with_details(mut self, details: EventDetails) -> Self {
    self.details = Some(details);
    self
  }

  /// Window snapshot carried by `onCreated`/`onRemoved`.
  pub fn window(&self) -> Option<&Window> {
    match &self.details {
      Some(EventDetails::Window(w)) => Some(w),
      Some(EventDetails::MenuClicked(_)) | None => None,
    }
  }

  /// Click details carried by menu events.
  pub fn menu_clicked(&self) -> Option<&MenuClicked> {
    match &self.details {
      Some(EventDetails::MenuClicked(m)) => Some(m),
      Some(EventDetails::Window(_)) | None => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn handler_names_follow_event_names() {
    for kind in EventKind::ALL {
      let name = kind.handler_name();
      let tail = serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default();
      let rest = name.strip_prefix("on").unwrap_or_default();
      assert!(rest.eq_ignore_ascii_case(&tail), "{name} vs {tail}");
    }
  }

  #[test]
  fn untagged_menu_details_omit_absent_tag() {
    let details = EventDetails::MenuClicked(MenuClicked::default());
    assert_eq!(
      serde_json::to_string(&details).ok().as_deref(),
      Some("{}")
    );
  }
}
