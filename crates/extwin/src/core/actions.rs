/*!
Setters. Arguments are validated on the calling task; the change itself runs
on the window's queue and the returned `Completion` settles once it has.

A setter that re-asserts the current state settles successfully without
reaching the native bridge or firing an event.
*/

use super::request::{LimitRequest, UpdateRequest};
use super::sequencer::Command;
use super::validation;
use super::{Completion, WindowManager};
use crate::bridge::NativeBridge;
use crate::types::{Bounds, PartialBounds, Point, Size, WindowId, WindowPatch, WindowResult};

impl<B: NativeBridge> WindowManager<B> {
  /// Queue a field change built by `f`.
  pub(super) fn set(&self, id: &WindowId, f: impl FnOnce(&mut WindowPatch)) -> Completion {
    let mut patch = WindowPatch::default();
    f(&mut patch);
    self.submit_update(id, patch.into())
  }

  fn set_checked(&self, id: &WindowId, request: WindowResult<UpdateRequest>) -> Completion {
    match request {
      Ok(request) => self.submit_update(id, request),
      Err(e) => Completion::failed(e),
    }
  }

  // === State ===

  /// No effect on a hidden, minimized or unfocusable window.
  pub fn focus(&self, id: &WindowId) -> Completion {
    self.set(id, |p| p.focused = Some(true))
  }

  pub fn unfocus(&self, id: &WindowId) -> Completion {
    self.set(id, |p| p.focused = Some(false))
  }

  /// Show the window, focusing it unless `focus` is `Some(false)`.
  pub fn show(&self, id: &WindowId, focus: Option<bool>) -> Completion {
    self.set(id, |p| {
      p.visible = Some(true);
      if focus != Some(false) {
        p.focused = Some(true);
      }
    })
  }

  pub fn hide(&self, id: &WindowId) -> Completion {
    self.set(id, |p| p.visible = Some(false))
  }

  pub fn maximize(&self, id: &WindowId) -> Completion {
    self.set(id, |p| p.maximized = Some(true))
  }

  pub fn unmaximize(&self, id: &WindowId) -> Completion {
    self.set(id, |p| p.maximized = Some(false))
  }

  /// Minimizing a focused window drops its focus.
  pub fn minimize(&self, id: &WindowId) -> Completion {
    self.set(id, |p| p.minimized = Some(true))
  }

  /// Undo `minimize`.
  pub fn restore(&self, id: &WindowId) -> Completion {
    self.set(id, |p| p.minimized = Some(false))
  }

  pub fn set_fullscreen(&self, id: &WindowId, enabled: bool) -> Completion {
    self.set(id, |p| p.fullscreen = Some(enabled))
  }

  // === Appearance ===

  pub fn set_vibrancy(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.vibrancy = Some(value))
  }

  pub fn set_background_color(&self, id: &WindowId, color: impl Into<String>) -> Completion {
    let color = color.into();
    if let Err(e) = validation::color(&color) {
      return Completion::failed(e);
    }
    self.set(id, |p| p.background_color = Some(color))
  }

  /// `value` must be within `[0, 1]`.
  pub fn set_opacity(&self, id: &WindowId, value: f64) -> Completion {
    match validation::opacity(value) {
      Ok(value) => self.set(id, |p| p.opacity = Some(value)),
      Err(e) => Completion::failed(e),
    }
  }

  pub fn set_shadow(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.shadow = Some(value))
  }

  pub fn set_title(&self, id: &WindowId, title: impl Into<String>) -> Completion {
    let title = title.into();
    self.set(id, |p| p.title = Some(title))
  }

  pub fn set_title_buttons_position(&self, id: &WindowId, x: f64, y: f64) -> Completion {
    match validation::point(Point::new(x, y)) {
      Ok(position) => self.set(id, |p| p.title_buttons_position = Some(position)),
      Err(e) => Completion::failed(e),
    }
  }

  pub fn set_enabled(&self, id: &WindowId, enabled: bool) -> Completion {
    self.set(id, |p| p.enabled = Some(enabled))
  }

  // === Controls ===

  pub fn set_resizable(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.resizable = Some(value))
  }

  pub fn set_movable(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.movable = Some(value))
  }

  pub fn set_minimizable(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.minimizable = Some(value))
  }

  pub fn set_maximizable(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.maximizable = Some(value))
  }

  pub fn set_fullscreenable(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.fullscreenable = Some(value))
  }

  pub fn set_closable(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.closable = Some(value))
  }

  // === Bounds ===

  /// Change any subset of the frame bounds. The result is clamped to the
  /// size limits.
  pub fn set_bounds(&self, id: &WindowId, bounds: PartialBounds, animate: Option<bool>) -> Completion {
    let request = validation::partial_bounds(&bounds)
      .map(|()| UpdateRequest::bounds(bounds, false, animate.unwrap_or(false)));
    self.set_checked(id, request)
  }

  /// Set the content area; the frame grows by the window's insets.
  pub fn set_content_bounds(&self, id: &WindowId, bounds: Bounds, animate: Option<bool>) -> Completion {
    let partial = PartialBounds::from(bounds);
    let request = validation::partial_bounds(&partial)
      .map(|()| UpdateRequest::bounds(partial, true, animate.unwrap_or(false)));
    self.set_checked(id, request)
  }

  // === Size ===

  pub fn set_size(&self, id: &WindowId, width: f64, height: f64, animate: Option<bool>) -> Completion {
    self.resize(id, width, height, false, animate)
  }

  pub fn set_content_size(
    &self,
    id: &WindowId,
    width: f64,
    height: f64,
    animate: Option<bool>,
  ) -> Completion {
    self.resize(id, width, height, true, animate)
  }

  fn resize(
    &self,
    id: &WindowId,
    width: f64,
    height: f64,
    content: bool,
    animate: Option<bool>,
  ) -> Completion {
    let partial = PartialBounds::size(Size::new(width, height));
    let request = validation::partial_bounds(&partial)
      .map(|()| UpdateRequest::bounds(partial, content, animate.unwrap_or(false)));
    self.set_checked(id, request)
  }

  /// `None` removes the limit in that dimension. A minimum above the current
  /// maximum is rejected when the change runs.
  pub fn set_minimum_size(
    &self,
    id: &WindowId,
    width: Option<f64>,
    height: Option<f64>,
    animate: Option<bool>,
  ) -> Completion {
    let request = limit_request(width, height).map(|limit| UpdateRequest {
      min_size: limit,
      animate: animate.unwrap_or(false),
      ..UpdateRequest::default()
    });
    self.set_checked(id, request)
  }

  /// `None` removes the limit in that dimension. The window shrinks to fit.
  pub fn set_maximum_size(
    &self,
    id: &WindowId,
    width: Option<f64>,
    height: Option<f64>,
    animate: Option<bool>,
  ) -> Completion {
    let request = limit_request(width, height).map(|limit| UpdateRequest {
      max_size: limit,
      animate: animate.unwrap_or(false),
      ..UpdateRequest::default()
    });
    self.set_checked(id, request)
  }

  /// `None`, zero or a negative ratio clears the constraint.
  pub fn set_aspect_ratio(&self, id: &WindowId, ratio: Option<f64>) -> Completion {
    match validation::aspect_ratio(ratio) {
      Ok(ratio) => self.set(id, |p| p.aspect_ratio = Some(ratio)),
      Err(e) => Completion::failed(e),
    }
  }

  // === Position ===

  pub fn set_position(&self, id: &WindowId, x: f64, y: f64) -> Completion {
    let request = validation::point(Point::new(x, y))
      .map(|p| UpdateRequest::bounds(PartialBounds::position(p), false, false));
    self.set_checked(id, request)
  }

  /// Center on the screen the toolkit considers current.
  pub fn center(&self, id: &WindowId) -> Completion {
    self.submit(id, Command::Center)
  }

  // === Z-order ===

  pub fn set_always_on_top(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.always_on_top = Some(value))
  }

  pub fn move_top(&self, id: &WindowId) -> Completion {
    self.submit(id, Command::MoveTop)
  }

  // === Misc ===

  pub fn set_icon(&self, id: &WindowId, icon: impl Into<String>) -> Completion {
    let icon = icon.into();
    self.set(id, |p| p.icon = Some(icon))
  }

  pub fn set_flashing(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.flashing = Some(value))
  }

  pub fn set_skip_taskbar(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.skip_taskbar = Some(value))
  }

  pub fn set_auto_hide_cursor(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.auto_hide_cursor = Some(value))
  }
}

fn limit_request(width: Option<f64>, height: Option<f64>) -> WindowResult<LimitRequest> {
  if let Some(w) = width {
    validation::dimension("width", w)?;
  }
  if let Some(h) = height {
    validation::dimension("height", h)?;
  }
  Ok(LimitRequest::replace(width, height))
}
