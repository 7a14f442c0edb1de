/*! Window snapshot, filter and resolved attribute types. */

use super::{Bounds, ExtensionId, Point, SizeLimit, WindowId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Snapshot of a live window, as returned by `get` and `query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Window {
  pub id: WindowId,
  /// Owning extension.
  pub extension: ExtensionId,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub min_width: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub min_height: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub max_width: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub max_height: Option<f64>,
  pub resizable: bool,
  pub movable: bool,
  pub minimizable: bool,
  pub maximizable: bool,
  pub closable: bool,
  pub focusable: bool,
  pub always_on_top: bool,
  pub fullscreenable: bool,
  pub title: String,
  pub visible: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub parent: Option<WindowId>,
  pub modal: bool,
  pub auto_hide_menu: bool,
  pub background_color: String,
  pub shadow: bool,
  pub opacity: f64,
  pub vibrancy: bool,
}

/// Window identity as delivered with events and hierarchy lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WindowRef {
  pub id: WindowId,
  pub extension: ExtensionId,
}

/// Partial window used by `query`. Every present field must match; absent
/// fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct WindowFilter {
  #[ts(optional)]
  pub id: Option<WindowId>,
  #[ts(optional)]
  pub extension: Option<ExtensionId>,
  #[ts(optional)]
  pub min_width: Option<f64>,
  #[ts(optional)]
  pub min_height: Option<f64>,
  #[ts(optional)]
  pub max_width: Option<f64>,
  #[ts(optional)]
  pub max_height: Option<f64>,
  #[ts(optional)]
  pub resizable: Option<bool>,
  #[ts(optional)]
  pub movable: Option<bool>,
  #[ts(optional)]
  pub minimizable: Option<bool>,
  #[ts(optional)]
  pub maximizable: Option<bool>,
  #[ts(optional)]
  pub closable: Option<bool>,
  #[ts(optional)]
  pub focusable: Option<bool>,
  #[ts(optional)]
  pub always_on_top: Option<bool>,
  #[ts(optional)]
  pub fullscreenable: Option<bool>,
  #[ts(optional)]
  pub title: Option<String>,
  #[ts(optional)]
  pub visible: Option<bool>,
  #[ts(optional)]
  pub parent: Option<WindowId>,
  #[ts(optional)]
  pub modal: Option<bool>,
  #[ts(optional)]
  pub auto_hide_menu: Option<bool>,
  #[ts(optional)]
  pub background_color: Option<String>,
  #[ts(optional)]
  pub shadow: Option<bool>,
  #[ts(optional)]
  pub opacity: Option<f64>,
  #[ts(optional)]
  pub vibrancy: Option<bool>,
}

impl WindowFilter {
  /// Filter matching every window of one extension.
  pub fn extension(extension: ExtensionId) -> Self {
    Self {
      extension: Some(extension),
      ..Self::default()
    }
  }

  pub fn matches(&self, w: &Window) -> bool {
    fn eq<T: PartialEq>(want: Option<&T>, have: &T) -> bool {
      want.is_none_or(|want| want == have)
    }
    fn eq_opt<T: PartialEq>(want: Option<&T>, have: Option<&T>) -> bool {
      want.is_none_or(|want| have == Some(want))
    }

    eq(self.id.as_ref(), &w.id)
      && eq(self.extension.as_ref(), &w.extension)
      && eq_opt(self.min_width.as_ref(), w.min_width.as_ref())
      && eq_opt(self.min_height.as_ref(), w.min_height.as_ref())
      && eq_opt(self.max_width.as_ref(), w.max_width.as_ref())
      && eq_opt(self.max_height.as_ref(), w.max_height.as_ref())
      && eq(self.resizable.as_ref(), &w.resizable)
      && eq(self.movable.as_ref(), &w.movable)
      && eq(self.minimizable.as_ref(), &w.minimizable)
      && eq(self.maximizable.as_ref(), &w.maximizable)
      && eq(self.closable.as_ref(), &w.closable)
      && eq(self.focusable.as_ref(), &w.focusable)
      && eq(self.always_on_top.as_ref(), &w.always_on_top)
      && eq(self.fullscreenable.as_ref(), &w.fullscreenable)
      && eq(self.title.as_ref(), &w.title)
      && eq(self.visible.as_ref(), &w.visible)
      && eq_opt(self.parent.as_ref(), w.parent.as_ref())
      && eq(self.modal.as_ref(), &w.modal)
      && eq(self.auto_hide_menu.as_ref(), &w.auto_hide_menu)
      && eq(self.background_color.as_ref(), &w.background_color)
      && eq(self.shadow.as_ref(), &w.shadow)
      && eq(self.opacity.as_ref(), &w.opacity)
      && eq(self.vibrancy.as_ref(), &w.vibrancy)
  }
}

/// Title bar style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TitleBarStyle {
  Inset,
  Hidden,
}

/// Boolean window state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowFlags {
  pub resizable: bool,
  pub movable: bool,
  pub minimizable: bool,
  pub maximizable: bool,
  pub closable: bool,
  pub focusable: bool,
  pub always_on_top: bool,
  pub fullscreenable: bool,
  pub fullscreen: bool,
  pub skip_taskbar: bool,
  pub visible: bool,
  pub focused: bool,
  pub maximized: bool,
  pub minimized: bool,
  pub enabled: bool,
  pub modal: bool,
  pub auto_hide_menu: bool,
  pub auto_hide_cursor: bool,
  pub menu_visible: bool,
  pub flashing: bool,
  pub shadow: bool,
  pub vibrancy: bool,
}

impl Default for WindowFlags {
  fn default() -> Self {
    Self {
      resizable: true,
      movable: true,
      minimizable: true,
      maximizable: true,
      closable: true,
      focusable: true,
      always_on_top: false,
      fullscreenable: true,
      fullscreen: false,
      skip_taskbar: false,
      visible: true,
      focused: false,
      maximized: false,
      minimized: false,
      enabled: true,
      modal: false,
      auto_hide_menu: false,
      auto_hide_cursor: false,
      menu_visible: true,
      flashing: false,
      shadow: true,
      vibrancy: false,
    }
  }
}

/// Fully resolved window state: creation defaults merged with requested
/// properties, then kept current by every applied change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowAttributes {
  /// Frame bounds.
  pub bounds: Bounds,
  pub min_size: SizeLimit,
  pub max_size: SizeLimit,
  pub aspect_ratio: Option<f64>,
  pub flags: WindowFlags,
  pub title: String,
  pub icon: Option<String>,
  pub background_color: String,
  pub opacity: f64,
  pub title_buttons_position: Option<Point>,
  pub frame: bool,
  pub transparent: bool,
  pub title_bar_style: Option<TitleBarStyle>,
  pub rounded_corners: bool,
  pub background_css: Option<String>,
}

impl WindowAttributes {
  /// Defaults for a new window of `size`, painted `background_color`.
  pub fn with_defaults(bounds: Bounds, background_color: impl Into<String>) -> Self {
    Self {
      bounds,
      min_size: SizeLimit::default(),
      max_size: SizeLimit::default(),
      aspect_ratio: None,
      flags: WindowFlags::default(),
      title: String::new(),
      icon: None,
      background_color: background_color.into(),
      opacity: 1.0,
      title_buttons_position: None,
      frame: true,
      transparent: false,
      title_bar_style: None,
      rounded_corners: true,
      background_css: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn window() -> Window {
    Window {
      id: WindowId::from("window-1"),
      extension: ExtensionId::from("ext.a"),
      min_width: Some(100.0),
      min_height: None,
      max_width: None,
      max_height: None,
      resizable: true,
      movable: true,
      minimizable: true,
      maximizable: true,
      closable: true,
      focusable: true,
      always_on_top: false,
      fullscreenable: true,
      title: "Notes".into(),
      visible: true,
      parent: None,
      modal: false,
      auto_hide_menu: false,
      background_color: "#FFFFFF".into(),
      shadow: true,
      opacity: 1.0,
      vibrancy: false,
    }
  }

  #[test]
  fn empty_filter_matches_everything() {
    assert!(WindowFilter::default().matches(&window()));
  }

  #[test]
  fn every_present_field_must_match() {
    let filter = WindowFilter {
      title: Some("Notes".into()),
      visible: Some(true),
      ..WindowFilter::default()
    };
    assert!(filter.matches(&window()));

    let filter = WindowFilter {
      title: Some("Notes".into()),
      visible: Some(false),
      ..WindowFilter::default()
    };
    assert!(!filter.matches(&window()));
  }

  #[test]
  fn optional_fields_need_a_value_to_match() {
    let w = window();
    let by_parent = WindowFilter {
      parent: Some(WindowId::from("window-9")),
      ..WindowFilter::default()
    };
    assert!(!by_parent.matches(&w));

    let by_min = WindowFilter {
      min_width: Some(100.0),
      ..WindowFilter::default()
    };
    assert!(by_min.matches(&w));
  }

  #[test]
  fn snapshot_omits_absent_optionals() {
    let json = serde_json::to_value(window()).unwrap_or_default();
    assert_eq!(json["minWidth"], 100.0);
    assert!(json.get("maxWidth").is_none());
    assert!(json.get("parent").is_none());
    assert_eq!(json["autoHideMenu"], false);
  }
}
