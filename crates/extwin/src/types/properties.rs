/*! Creation properties and update patches, as extensions submit them. */

use super::{Point, TitleBarStyle, WindowId};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Properties accepted by `create`. Absent fields take the window defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct WindowProperties {
  #[ts(optional)]
  pub width: Option<f64>,
  #[ts(optional)]
  pub height: Option<f64>,
  #[ts(optional)]
  pub position: Option<Point>,
  /// Treat `width`/`height` as the content size rather than the frame size.
  #[ts(optional)]
  pub use_content_size: Option<bool>,
  #[ts(optional)]
  pub center: Option<bool>,
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
  pub fullscreen: Option<bool>,
  #[ts(optional)]
  pub fullscreenable: Option<bool>,
  #[ts(optional)]
  pub skip_taskbar: Option<bool>,
  #[ts(optional)]
  pub title: Option<String>,
  #[ts(optional)]
  pub icon: Option<String>,
  #[ts(optional)]
  pub visible: Option<bool>,
  #[ts(optional)]
  pub frame: Option<bool>,
  #[ts(optional)]
  pub parent: Option<WindowId>,
  #[ts(optional)]
  pub modal: Option<bool>,
  #[ts(optional)]
  pub auto_hide_cursor: Option<bool>,
  #[ts(optional)]
  pub auto_hide_menu: Option<bool>,
  #[ts(optional)]
  pub background_color: Option<String>,
  #[ts(optional)]
  pub shadow: Option<bool>,
  #[ts(optional)]
  pub opacity: Option<f64>,
  #[ts(optional)]
  pub transparent: Option<bool>,
  #[ts(optional)]
  pub title_bar_style: Option<TitleBarStyle>,
  #[ts(optional)]
  pub title_buttons_position: Option<Point>,
  #[ts(optional)]
  pub rounded_corners: Option<bool>,
  #[ts(optional)]
  pub focused: Option<bool>,
  #[ts(optional)]
  pub maximized: Option<bool>,
  #[ts(optional)]
  pub minimized: Option<bool>,
  #[ts(optional)]
  pub enabled: Option<bool>,
  #[ts(optional)]
  pub aspect_ratio: Option<f64>,
  #[ts(optional)]
  pub menu_visible: Option<bool>,
  #[ts(optional)]
  pub flashing: Option<bool>,
  #[ts(optional)]
  pub vibrancy: Option<bool>,
  #[serde(rename = "backgroundCSS")]
  #[ts(optional)]
  pub background_css: Option<String>,
}

/// Patch accepted by `update`. Absent fields are left unchanged.
///
/// `parent` and `aspect_ratio` distinguish "absent" (`None`) from an explicit
/// `null` (`Some(None)`), which clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct WindowUpdate {
  #[ts(optional)]
  pub width: Option<f64>,
  #[ts(optional)]
  pub height: Option<f64>,
  #[ts(optional)]
  pub position: Option<Point>,
  #[ts(optional)]
  pub use_content_size: Option<bool>,
  #[ts(optional)]
  pub center: Option<bool>,
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
  pub fullscreen: Option<bool>,
  #[ts(optional)]
  pub fullscreenable: Option<bool>,
  #[ts(optional)]
  pub skip_taskbar: Option<bool>,
  #[ts(optional)]
  pub title: Option<String>,
  #[ts(optional)]
  pub icon: Option<String>,
  #[ts(optional)]
  pub visible: Option<bool>,
  #[serde(
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  #[ts(optional)]
  pub parent: Option<Option<WindowId>>,
  #[ts(optional)]
  pub auto_hide_cursor: Option<bool>,
  #[ts(optional)]
  pub auto_hide_menu_bar: Option<bool>,
  #[ts(optional)]
  pub background_color: Option<String>,
  #[ts(optional)]
  pub shadow: Option<bool>,
  #[ts(optional)]
  pub opacity: Option<f64>,
  #[ts(optional)]
  pub title_buttons_position: Option<Point>,
  #[ts(optional)]
  pub focused: Option<bool>,
  #[ts(optional)]
  pub maximized: Option<bool>,
  #[ts(optional)]
  pub minimized: Option<bool>,
  #[ts(optional)]
  pub enabled: Option<bool>,
  #[serde(
    deserialize_with = "double_option",
    skip_serializing_if = "Option::is_none"
  )]
  #[ts(optional)]
  pub aspect_ratio: Option<Option<f64>>,
  #[ts(optional)]
  pub menu_bar_visible: Option<bool>,
  #[ts(optional)]
  pub flashing: Option<bool>,
  #[ts(optional)]
  pub vibrancy: Option<bool>,
}

/// A present field always deserializes to `Some`, so `null` becomes `Some(None)`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn update_distinguishes_null_from_absent() {
    let absent: WindowUpdate = serde_json::from_str("{}").unwrap_or_default();
    assert_eq!(absent.parent, None);
    assert_eq!(absent.aspect_ratio, None);

    let cleared: WindowUpdate =
      serde_json::from_str(r#"{"parent":null,"aspectRatio":null}"#).unwrap_or_default();
    assert_eq!(cleared.parent, Some(None));
    assert_eq!(cleared.aspect_ratio, Some(None));

    let set: WindowUpdate =
      serde_json::from_str(r#"{"parent":"window-3","aspectRatio":1.5}"#).unwrap_or_default();
    assert_eq!(set.parent, Some(Some(WindowId::from("window-3"))));
    assert_eq!(set.aspect_ratio, Some(Some(1.5)));
  }

  #[test]
  fn properties_use_declared_field_names() {
    let props: WindowProperties = serde_json::from_str(
      r#"{"useContentSize":true,"backgroundCSS":"red","titleBarStyle":"hidden"}"#,
    )
    .unwrap_or_default();
    assert_eq!(props.use_content_size, Some(true));
    assert_eq!(props.background_css.as_deref(), Some("red"));
    assert_eq!(props.title_bar_style, Some(TitleBarStyle::Hidden));
  }

  #[test]
  fn update_uses_menu_bar_names() {
    let update: WindowUpdate =
      serde_json::from_str(r#"{"autoHideMenuBar":true,"menuBarVisible":false}"#)
        .unwrap_or_default();
    assert_eq!(update.auto_hide_menu_bar, Some(true));
    assert_eq!(update.menu_bar_visible, Some(false));
  }
}
