/*! Field-level window changes.

A `WindowPatch` is what travels to the native bridge and what the bridge
reports back. Absent fields are untouched.
*/

use super::{Bounds, Point, SizeLimit, WindowAttributes, WindowFlags};
use serde::Serialize;

macro_rules! window_patch {
  ($($flag:ident),* $(,)?) => {
    /// Set of window changes. Every field is optional.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WindowPatch {
      #[serde(skip_serializing_if = "Option::is_none")]
      pub bounds: Option<Bounds>,
      #[serde(skip_serializing_if = "Option::is_none")]
      pub min_size: Option<SizeLimit>,
      #[serde(skip_serializing_if = "Option::is_none")]
      pub max_size: Option<SizeLimit>,
      /// `Some(None)` clears the ratio.
      #[serde(skip_serializing_if = "Option::is_none")]
      pub aspect_ratio: Option<Option<f64>>,
      #[serde(skip_serializing_if = "Option::is_none")]
      pub title: Option<String>,
      #[serde(skip_serializing_if = "Option::is_none")]
      pub icon: Option<String>,
      #[serde(skip_serializing_if = "Option::is_none")]
      pub background_color: Option<String>,
      #[serde(skip_serializing_if = "Option::is_none")]
      pub opacity: Option<f64>,
      #[serde(skip_serializing_if = "Option::is_none")]
      pub title_buttons_position: Option<Point>,
      $(
        #[serde(skip_serializing_if = "Option::is_none")]
        pub $flag: Option<bool>,
      )*
    }

    impl WindowPatch {
      fn flags_empty(&self) -> bool {
        $(self.$flag.is_none())&&*
      }

      fn merge_flags(&mut self, other: &Self) {
        $(
          if other.$flag.is_some() {
            self.$flag = other.$flag;
          }
        )*
      }

      fn retain_changed_flags(&mut self, flags: &WindowFlags) {
        $(
          if self.$flag == Some(flags.$flag) {
            self.$flag = None;
          }
        )*
      }

      fn capture_flags(&self, flags: &WindowFlags, out: &mut Self) {
        $(
          if self.$flag.is_some() {
            out.$flag = Some(flags.$flag);
          }
        )*
      }

      fn apply_flags(&self, flags: &mut WindowFlags) {
        $(
          if let Some(v) = self.$flag {
            flags.$flag = v;
          }
        )*
      }
    }
  };
}

window_patch!(
  resizable,
  movable,
  minimizable,
  maximizable,
  closable,
  focusable,
  always_on_top,
  fullscreenable,
  fullscreen,
  skip_taskbar,
  visible,
  focused,
  maximized,
  minimized,
  enabled,
  modal,
  auto_hide_menu,
  auto_hide_cursor,
  menu_visible,
  flashing,
  shadow,
  vibrancy,
);

impl WindowPatch {
  pub fn is_empty(&self) -> bool {
    self.bounds.is_none()
      && self.min_size.is_none()
      && self.max_size.is_none()
      && self.aspect_ratio.is_none()
      && self.title.is_none()
      && self.icon.is_none()
      && self.background_color.is_none()
      && self.opacity.is_none()
      && self.title_buttons_position.is_none()
      && self.flags_empty()
  }

  /// Overlay `other` onto `self`. Fields present in `other` win.
  pub fn merge(&mut self, other: Self) {
    self.merge_flags(&other);
    let Self {
      bounds,
      min_size,
      max_size,
      aspect_ratio,
      title,
      icon,
      background_color,
      opacity,
      title_buttons_position,
      ..
    } = other;
    if bounds.is_some() {
      self.bounds = bounds;
    }
    if min_size.is_some() {
      self.min_size = min_size;
    }
    if max_size.is_some() {
      self.max_size = max_size;
    }
    if aspect_ratio.is_some() {
      self.aspect_ratio = aspect_ratio;
    }
    if title.is_some() {
      self.title = title;
    }
    if icon.is_some() {
      self.icon = icon;
    }
    if background_color.is_some() {
      self.background_color = background_color;
    }
    if opacity.is_some() {
      self.opacity = opacity;
    }
    if title_buttons_position.is_some() {
      self.title_buttons_position = title_buttons_position;
    }
  }

  /// Drop every field that already matches `current`.
  pub fn retain_changed(&mut self, current: &WindowAttributes) {
    self.retain_changed_flags(&current.flags);
    if self.bounds == Some(current.bounds) {
      self.bounds = None;
    }
    if self.min_size == Some(current.min_size) {
      self.min_size = None;
    }
    if self.max_size == Some(current.max_size) {
      self.max_size = None;
    }
    if self.aspect_ratio == Some(current.aspect_ratio) {
      self.aspect_ratio = None;
    }
    if self.title.as_ref() == Some(&current.title) {
      self.title = None;
    }
    if self.icon.is_some() && self.icon == current.icon {
      self.icon = None;
    }
    if self.background_color.as_ref() == Some(&current.background_color) {
      self.background_color = None;
    }
    if self.opacity == Some(current.opacity) {
      self.opacity = None;
    }
    if self.title_buttons_position.is_some()
      && self.title_buttons_position == current.title_buttons_position
    {
      self.title_buttons_position = None;
    }
  }

  /// The values `current` holds for every field present in `self`. Sending
  /// the result undoes `self`. Fields that cannot be cleared through a patch
  /// (`icon`, `titleButtonsPosition`) are only captured when set.
  pub(crate) fn current_values(&self, current: &WindowAttributes) -> Self {
    let mut out = Self::default();
    self.capture_flags(&current.flags, &mut out);
    if self.bounds.is_some() {
      out.bounds = Some(current.bounds);
    }
    if self.min_size.is_some() {
      out.min_size = Some(current.min_size);
    }
    if self.max_size.is_some() {
      out.max_size = Some(current.max_size);
    }
    if self.aspect_ratio.is_some() {
      out.aspect_ratio = Some(current.aspect_ratio);
    }
    if self.title.is_some() {
      out.title = Some(current.title.clone());
    }
    if self.icon.is_some() {
      out.icon.clone_from(&current.icon);
    }
    if self.background_color.is_some() {
      out.background_color = Some(current.background_color.clone());
    }
    if self.opacity.is_some() {
      out.opacity = Some(current.opacity);
    }
    if self.title_buttons_position.is_some() {
      out.title_buttons_position = current.title_buttons_position;
    }
    out
  }

  /// Write every present field into `attrs`, without any normalization.
  pub(crate) fn write_into(&self, attrs: &mut WindowAttributes) {
    self.apply_flags(&mut attrs.flags);
    if let Some(bounds) = self.bounds {
      attrs.bounds = bounds;
    }
    if let Some(min) = self.min_size {
      attrs.min_size = min;
    }
    if let Some(max) = self.max_size {
      attrs.max_size = max;
    }
    if let Some(ratio) = self.aspect_ratio {
      attrs.aspect_ratio = ratio;
    }
    if let Some(title) = &self.title {
      attrs.title.clone_from(title);
    }
    if let Some(icon) = &self.icon {
      attrs.icon = Some(icon.clone());
    }
    if let Some(color) = &self.background_color {
      attrs.background_color.clone_from(color);
    }
    if let Some(opacity) = self.opacity {
      attrs.opacity = opacity;
    }
    if let Some(p) = self.title_buttons_position {
      attrs.title_buttons_position = Some(p);
    }
  }
}
