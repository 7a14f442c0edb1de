/*!
Update requests.

A request is what the facade queues. It is resolved into a concrete
`WindowPatch` only when the queue runs it, against the record as it is then,
so a native change that landed in between is never overwritten with stale
reasoning.
*/

use super::store::WindowRecord;
use super::validation;
use crate::types::{PartialBounds, SizeLimit, WindowId, WindowPatch, WindowResult, WindowUpdate};

/// Bounds change, relative to the frame or to the content area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BoundsRequest {
  pub(crate) partial: PartialBounds,
  pub(crate) content: bool,
}

/// Size limit change. `Some(None)` clears a component; `None` keeps it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct LimitRequest {
  pub(crate) width: Option<Option<f64>>,
  pub(crate) height: Option<Option<f64>>,
}

impl LimitRequest {
  /// Replace both components.
  pub(crate) const fn replace(width: Option<f64>, height: Option<f64>) -> Self {
    Self {
      width: Some(width),
      height: Some(height),
    }
  }

  /// Set the components that are present, keep the rest.
  pub(crate) const fn partial(width: Option<f64>, height: Option<f64>) -> Self {
    Self {
      width: match width {
        Some(w) => Some(Some(w)),
        None => None,
      },
      height: match height {
        Some(h) => Some(Some(h)),
        None => None,
      },
    }
  }

  pub(crate) const fn is_empty(&self) -> bool {
    self.width.is_none() && self.height.is_none()
  }

  fn resolve(&self, current: SizeLimit) -> SizeLimit {
    SizeLimit::new(
      self.width.unwrap_or(current.width),
      self.height.unwrap_or(current.height),
    )
  }
}

/// A queued update.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct UpdateRequest {
  pub(crate) patch: WindowPatch,
  pub(crate) bounds: Option<BoundsRequest>,
  pub(crate) min_size: LimitRequest,
  pub(crate) max_size: LimitRequest,
  /// `Some(None)` detaches from the parent.
  pub(crate) parent: Option<Option<WindowId>>,
  pub(crate) center: bool,
  pub(crate) animate: bool,
}

impl From<WindowPatch> for UpdateRequest {
  fn from(patch: WindowPatch) -> Self {
    Self {
      patch,
      ..Self::default()
    }
  }
}

impl UpdateRequest {
  pub(crate) fn bounds(partial: PartialBounds, content: bool, animate: bool) -> Self {
    Self {
      bounds: Some(BoundsRequest { partial, content }),
      animate,
      ..Self::default()
    }
  }

  /// Translate a declared `update` payload. Shape validation happens first.
  pub(crate) fn from_update(u: WindowUpdate) -> WindowResult<Self> {
    validation::update(&u)?;

    let partial = PartialBounds {
      x: u.position.map(|p| p.x),
      y: u.position.map(|p| p.y),
      width: u.width,
      height: u.height,
    };
    let bounds = (!partial.is_empty()).then_some(BoundsRequest {
      partial,
      content: u.use_content_size.unwrap_or(false),
    });
    let aspect_ratio = match u.aspect_ratio {
      Some(ratio) => Some(validation::aspect_ratio(ratio)?),
      None => None,
    };

    let patch = WindowPatch {
      aspect_ratio,
      title: u.title,
      icon: u.icon,
      background_color: u.background_color,
      opacity: u.opacity,
      title_buttons_position: u.title_buttons_position,
      resizable: u.resizable,
      movable: u.movable,
      minimizable: u.minimizable,
      maximizable: u.maximizable,
      closable: u.closable,
      focusable: u.focusable,
      always_on_top: u.always_on_top,
      fullscreenable: u.fullscreenable,
      fullscreen: u.fullscreen,
      skip_taskbar: u.skip_taskbar,
      visible: u.visible,
      focused: u.focused,
      maximized: u.maximized,
      minimized: u.minimized,
      enabled: u.enabled,
      auto_hide_menu: u.auto_hide_menu_bar,
      auto_hide_cursor: u.auto_hide_cursor,
      menu_visible: u.menu_bar_visible,
      flashing: u.flashing,
      vibrancy: u.vibrancy,
      shadow: u.shadow,
      ..WindowPatch::default()
    };

    Ok(Self {
      patch,
      bounds,
      min_size: LimitRequest::partial(u.min_width, u.min_height),
      max_size: LimitRequest::partial(u.max_width, u.max_height),
      parent: u.parent,
      center: u.center.unwrap_or(false),
      animate: false,
    })
  }

  /// Resolve against the current record into the minimal patch to send.
  ///
  /// An empty result means nothing would change.
  pub(crate) fn resolve(&self, record: &WindowRecord) -> WindowResult<WindowPatch> {
    let attrs = &record.attrs;
    let mut patch = self.patch.clone();

    let min = self.min_size.resolve(attrs.min_size);
    let max = self.max_size.resolve(attrs.max_size);
    validation::size_limits(min, max)?;
    if !self.min_size.is_empty() {
      patch.min_size = Some(min);
    }
    if !self.max_size.is_empty() {
      patch.max_size = Some(max);
    }

    let requested = match self.bounds {
      Some(BoundsRequest {
        partial,
        content: true,
      }) => record.content_bounds().merge(&partial).outset(record.insets),
      Some(BoundsRequest {
        partial,
        content: false,
      }) => attrs.bounds.merge(&partial),
      None => patch.bounds.unwrap_or(attrs.bounds),
    };
    let bounds = requested.with_size(SizeLimit::clamp(requested.size(), min, max));
    patch.bounds = (bounds != attrs.bounds).then_some(bounds);

    if patch.fullscreen == Some(true) {
      patch.maximized = Some(false);
    } else if patch.maximized == Some(true) {
      patch.fullscreen = Some(false);
    }

    let flags = &attrs.flags;
    let fullscreen = patch.fullscreen.unwrap_or(flags.fullscreen);
    let maximized = patch.maximized.unwrap_or(flags.maximized);
    if record.is_filled() && !fullscreen && !maximized && patch.bounds.is_none() {
      patch.bounds = record.normal_bounds;
    }

    let visible = patch.visible.unwrap_or(flags.visible);
    let minimized = patch.minimized.unwrap_or(flags.minimized);
    let focusable = patch.focusable.unwrap_or(flags.focusable);
    if !visible || minimized {
      patch.focused = Some(false);
    } else if patch.focused == Some(true) && !focusable {
      patch.focused = None;
    }

    patch.retain_changed(attrs);
    Ok(patch)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{
    Bounds, ExtensionId, Insets, NativeHandle, Point, WindowAttributes, WindowError,
  };

  fn record() -> WindowRecord {
    WindowRecord {
      id: WindowId::from("window-1"),
      extension: ExtensionId::from("ext.test"),
      handle: NativeHandle(1),
      seq: 0,
      attrs: WindowAttributes::with_defaults(Bounds::new(100.0, 100.0, 800.0, 628.0), "#FFFFFF"),
      insets: Insets::title_bar(28.0),
      normal_bounds: None,
      menu: None,
      context_menu: None,
    }
  }

  #[test]
  fn partial_bounds_merge_with_current() {
    let req = UpdateRequest::bounds(
      PartialBounds::position(Point::new(5.0, 6.0)),
      false,
      false,
    );
    let patch = req.resolve(&record()).ok();
    assert_eq!(
      patch.and_then(|p| p.bounds),
      Some(Bounds::new(5.0, 6.0, 800.0, 628.0))
    );
  }

  #[test]
  fn content_size_converts_to_frame() {
    let req = UpdateRequest::bounds(
      PartialBounds::size(crate::types::Size::new(400.0, 300.0)),
      true,
      false,
    );
    let patch = req.resolve(&record()).ok();
    assert_eq!(
      patch.and_then(|p| p.bounds),
      Some(Bounds::new(100.0, 100.0, 400.0, 328.0))
    );
  }

  #[test]
  fn bounds_are_clamped_to_limits() {
    let mut r = record();
    r.attrs.max_size = SizeLimit::new(Some(500.0), None);
    let req = UpdateRequest::bounds(
      PartialBounds {
        width: Some(900.0),
        ..PartialBounds::default()
      },
      false,
      false,
    );
    let patch = req.resolve(&r).ok();
    assert_eq!(patch.and_then(|p| p.bounds).map(|b| b.width), Some(500.0));
  }

  #[test]
  fn new_minimum_is_checked_against_current_maximum() {
    let mut r = record();
    r.attrs.max_size = SizeLimit::new(Some(300.0), None);
    let req = UpdateRequest {
      min_size: LimitRequest::replace(Some(400.0), None),
      ..UpdateRequest::default()
    };
    assert!(matches!(req.resolve(&r), Err(WindowError::InvalidArgument(_))));
  }

  #[test]
  fn shrinking_the_maximum_shrinks_the_window() {
    let req = UpdateRequest {
      max_size: LimitRequest::replace(Some(640.0), Some(480.0)),
      ..UpdateRequest::default()
    };
    let patch = req.resolve(&record()).ok();
    assert_eq!(
      patch.and_then(|p| p.bounds).map(|b| b.size()),
      Some(crate::types::Size::new(640.0, 480.0))
    );
  }

  #[test]
  fn reasserted_state_resolves_to_nothing() {
    let req = UpdateRequest::from(WindowPatch {
      visible: Some(true),
      title: Some(String::new()),
      ..WindowPatch::default()
    });
    assert_eq!(req.resolve(&record()).ok().map(|p| p.is_empty()), Some(true));
  }

  #[test]
  fn leaving_fullscreen_restores_normal_bounds() {
    let mut r = record();
    let normal = r.attrs.bounds;
    r.attrs.flags.fullscreen = true;
    r.attrs.bounds = Bounds::new(0.0, 0.0, 1920.0, 1080.0);
    r.normal_bounds = Some(normal);

    let req = UpdateRequest::from(WindowPatch {
      fullscreen: Some(false),
      ..WindowPatch::default()
    });
    let patch = req.resolve(&r).ok();
    assert_eq!(patch.as_ref().and_then(|p| p.bounds), Some(normal));
    assert_eq!(patch.and_then(|p| p.fullscreen), Some(false));
  }

  #[test]
  fn hidden_windows_cannot_take_focus() {
    let mut r = record();
    r.attrs.flags.focused = true;
    let req = UpdateRequest::from(WindowPatch {
      visible: Some(false),
      ..WindowPatch::default()
    });
    let patch = req.resolve(&r).ok();
    assert_eq!(patch.and_then(|p| p.focused), Some(false));
  }

  #[test]
  fn update_payload_translates_menu_bar_names() {
    let req = UpdateRequest::from_update(WindowUpdate {
      auto_hide_menu_bar: Some(true),
      menu_bar_visible: Some(false),
      aspect_ratio: Some(Some(-1.0)),
      ..WindowUpdate::default()
    })
    .ok();
    let patch = req.map(|r| r.patch);
    assert_eq!(patch.as_ref().and_then(|p| p.auto_hide_menu), Some(true));
    assert_eq!(patch.as_ref().and_then(|p| p.menu_visible), Some(false));
    assert_eq!(patch.and_then(|p| p.aspect_ratio), Some(None));
  }
}
