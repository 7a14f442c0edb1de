/*!
Read-only getters. Each reads the store synchronously and never waits on a
window's queue.
*/

use super::store::WindowRecord;
use super::WindowManager;
use crate::bridge::NativeBridge;
use crate::types::{Bounds, Point, Size, SizeLimit, WindowFlags, WindowId, WindowResult};

impl<B: NativeBridge> WindowManager<B> {
  fn read<R>(&self, id: &WindowId, f: impl FnOnce(&WindowRecord) -> R) -> WindowResult<R> {
    self.shared.store.with_record(id, f)
  }

  fn flag(&self, id: &WindowId, f: impl FnOnce(&WindowFlags) -> bool) -> WindowResult<bool> {
    self.read(id, |r| f(&r.attrs.flags))
  }

  // === Geometry ===

  /// Outer frame bounds in screen coordinates.
  pub fn get_bounds(&self, id: &WindowId) -> WindowResult<Bounds> {
    self.read(id, |r| r.attrs.bounds)
  }

  /// Bounds of the area inside the frame.
  pub fn get_content_bounds(&self, id: &WindowId) -> WindowResult<Bounds> {
    self.read(id, WindowRecord::content_bounds)
  }

  /// Bounds the window has, or returns to, outside fullscreen and maximized.
  pub fn get_normal_bounds(&self, id: &WindowId) -> WindowResult<Bounds> {
    self.read(id, WindowRecord::normal_bounds)
  }

  /// Outer frame size.
  pub fn get_size(&self, id: &WindowId) -> WindowResult<Size> {
    self.read(id, |r| r.attrs.bounds.size())
  }

  /// Size of the area inside the frame.
  pub fn get_content_size(&self, id: &WindowId) -> WindowResult<Size> {
    self.read(id, |r| r.content_bounds().size())
  }

  /// Unset components are `None`.
  pub fn get_minimum_size(&self, id: &WindowId) -> WindowResult<SizeLimit> {
    self.read(id, |r| r.attrs.min_size)
  }

  /// Unset components are `None`.
  pub fn get_maximum_size(&self, id: &WindowId) -> WindowResult<SizeLimit> {
    self.read(id, |r| r.attrs.max_size)
  }

  /// Top-left corner of the outer frame.
  pub fn get_position(&self, id: &WindowId) -> WindowResult<Point> {
    self.read(id, |r| r.attrs.bounds.position())
  }

  /// Origin when never set.
  pub fn get_title_buttons_position(&self, id: &WindowId) -> WindowResult<Point> {
    self.read(id, |r| r.attrs.title_buttons_position.unwrap_or_default())
  }

  // === Appearance ===

  /// Current title.
  pub fn get_title(&self, id: &WindowId) -> WindowResult<String> {
    self.read(id, |r| r.attrs.title.clone())
  }

  /// Background color as given, e.g. `#RRGGBB`.
  pub fn get_background_color(&self, id: &WindowId) -> WindowResult<String> {
    self.read(id, |r| r.attrs.background_color.clone())
  }

  /// Opacity in `0.0..=1.0`.
  pub fn get_opacity(&self, id: &WindowId) -> WindowResult<f64> {
    self.read(id, |r| r.attrs.opacity)
  }

  /// Whether the frame draws a shadow.
  pub fn has_shadow(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.shadow)
  }

  /// Whether the background uses vibrancy.
  pub fn has_vibrancy(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.vibrancy)
  }

  // === State ===

  /// Whether the window has keyboard focus.
  pub fn is_focused(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.focused)
  }

  /// Whether the window is shown.
  pub fn is_visible(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.visible)
  }

  /// Whether the window is maximized.
  pub fn is_maximized(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.maximized)
  }

  /// Whether the window is minimized.
  pub fn is_minimized(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.minimized)
  }

  /// Whether the window is fullscreen.
  pub fn is_fullscreen(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.fullscreen)
  }

  /// Whether the window accepts input.
  pub fn is_enabled(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.enabled)
  }

  /// Whether the window floats above normal windows.
  pub fn is_always_on_top(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.always_on_top)
  }

  /// Whether the window is modal to its parent.
  pub fn is_modal(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.modal)
  }

  // === Controls ===

  /// Whether the user can resize the window.
  pub fn is_resizable(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.resizable)
  }

  /// Whether the user can move the window.
  pub fn is_movable(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.movable)
  }

  /// Whether the user can minimize the window.
  pub fn is_minimizable(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.minimizable)
  }

  /// Whether the user can maximize the window.
  pub fn is_maximizable(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.maximizable)
  }

  /// Whether the window may enter fullscreen.
  pub fn is_fullscreenable(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.fullscreenable)
  }

  /// Whether the user can close the window.
  pub fn is_closable(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.closable)
  }

  // === Menu bar ===

  /// Whether the menu bar hides until Alt is pressed.
  pub fn is_menu_auto_hide(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.auto_hide_menu)
  }

  /// Whether the menu bar is shown.
  pub fn is_menu_visible(&self, id: &WindowId) -> WindowResult<bool> {
    self.flag(id, |f| f.menu_visible)
  }
}
