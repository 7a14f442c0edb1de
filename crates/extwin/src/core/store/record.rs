/*! Per-window record and the state-transition rules applied on every change. */

use crate::menu::{ContextMenu, Menu};
use crate::types::{
  Bounds, EventKind, ExtensionId, Insets, NativeHandle, Window, WindowAttributes, WindowId,
  WindowPatch, WindowRef,
};

/// One change to a record. The only input to `WindowStore::apply`.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordChange {
  pub(crate) patch: WindowPatch,
  /// `Some(None)` clears the parent.
  pub(crate) parent: Option<Option<WindowId>>,
  pub(crate) menu: Option<Option<Menu>>,
  pub(crate) context_menu: Option<Option<ContextMenu>>,
}

impl From<WindowPatch> for RecordChange {
  fn from(patch: WindowPatch) -> Self {
    Self {
      patch,
      ..Self::default()
    }
  }
}

/// Authoritative state of one live window.
#[derive(Debug)]
pub(crate) struct WindowRecord {
  pub(crate) id: WindowId,
  pub(crate) extension: ExtensionId,
  pub(crate) handle: NativeHandle,
  /// Creation order, for stable query results.
  pub(crate) seq: u64,
  pub(crate) attrs: WindowAttributes,
  pub(crate) insets: Insets,
  /// Geometry to restore when leaving fullscreen or maximized.
  pub(crate) normal_bounds: Option<Bounds>,
  pub(crate) menu: Option<Menu>,
  pub(crate) context_menu: Option<ContextMenu>,
}

impl WindowRecord {
  pub(crate) fn target(&self) -> WindowRef {
    WindowRef {
      id: self.id.clone(),
      extension: self.extension.clone(),
    }
  }

  pub(crate) fn content_bounds(&self) -> Bounds {
    self.attrs.bounds.inset(self.insets)
  }

  /// Bounds the window returns to from fullscreen or maximized.
  pub(crate) fn normal_bounds(&self) -> Bounds {
    self.normal_bounds.unwrap_or(self.attrs.bounds)
  }

  pub(crate) const fn is_filled(&self) -> bool {
    self.attrs.flags.fullscreen || self.attrs.flags.maximized
  }

  /// Public snapshot. `parent` comes from the hierarchy.
  pub(crate) fn snapshot(&self, parent: Option<WindowId>) -> Window {
    let a = &self.attrs;
    let f = &a.flags;
    Window {
      id: self.id.clone(),
      extension: self.extension.clone(),
      min_width: a.min_size.width,
      min_height: a.min_size.height,
      max_width: a.max_size.width,
      max_height: a.max_size.height,
      resizable: f.resizable,
      movable: f.movable,
      minimizable: f.minimizable,
      maximizable: f.maximizable,
      closable: f.closable,
      focusable: f.focusable,
      always_on_top: f.always_on_top,
      fullscreenable: f.fullscreenable,
      title: a.title.clone(),
      visible: f.visible,
      parent,
      modal: f.modal,
      auto_hide_menu: f.auto_hide_menu,
      background_color: a.background_color.clone(),
      shadow: f.shadow,
      opacity: a.opacity,
      vibrancy: f.vibrancy,
    }
  }

  /// Apply a change and return the transitions it caused, in firing order.
  ///
  /// Normalizes as it goes: opacity is clamped, a non-positive aspect ratio
  /// clears the ratio, fullscreen and maximized exclude each other, and a
  /// hidden or minimized window loses focus. Re-asserting current state
  /// produces no transition.
  pub(crate) fn apply(&mut self, change: RecordChange) -> Vec<EventKind> {
    let RecordChange {
      mut patch,
      menu,
      context_menu,
      ..
    } = change;
    let before = self.attrs.flags;
    let before_bounds = self.attrs.bounds;

    if let Some(opacity) = patch.opacity {
      patch.opacity = Some(if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) });
    }
    if let Some(Some(ratio)) = patch.aspect_ratio {
      if ratio.is_nan() || ratio <= 0.0 {
        patch.aspect_ratio = Some(None);
      }
    }
    if patch.fullscreen == Some(true) {
      patch.maximized = Some(false);
    } else if patch.maximized == Some(true) {
      patch.fullscreen = Some(false);
    }

    patch.write_into(&mut self.attrs);

    let flags = &mut self.attrs.flags;
    if !flags.visible || flags.minimized {
      flags.focused = false;
    }

    let was_filled = before.fullscreen || before.maximized;
    let now_filled = flags.fullscreen || flags.maximized;
    if !was_filled && now_filled {
      self.normal_bounds = Some(before_bounds);
    } else if was_filled && !now_filled {
      let restore = self.normal_bounds.take();
      if patch.bounds.is_none() {
        if let Some(restore) = restore {
          self.attrs.bounds = restore;
        }
      }
    }

    let after = self.attrs.flags;
    let mut transitions = Vec::new();
    let mut edge = |was: bool, now: bool, on: EventKind, off: EventKind| {
      if was != now {
        transitions.push(if now { on } else { off });
      }
    };
    edge(
      before.fullscreen,
      after.fullscreen,
      EventKind::EnteredFullscreen,
      EventKind::ExitedFullscreen,
    );
    edge(
      before.maximized,
      after.maximized,
      EventKind::Maximized,
      EventKind::Unmaximized,
    );
    edge(
      before.minimized,
      after.minimized,
      EventKind::Minimized,
      EventKind::Restored,
    );
    edge(before.visible, after.visible, EventKind::Shown, EventKind::Hidden);
    edge(before.focused, after.focused, EventKind::Focused, EventKind::Unfocused);

    let bounds = self.attrs.bounds;
    if bounds.position() != before_bounds.position() {
      transitions.push(EventKind::Moved);
    }
    if bounds.size() != before_bounds.size() {
      transitions.push(EventKind::Resized);
    }

    if let Some(menu) = menu {
      self.menu = menu;
    }
    if let Some(context_menu) = context_menu {
      if self.context_menu.is_some() {
        transitions.push(EventKind::ContextMenuClosed);
      }
      self.context_menu = context_menu;
    }

    transitions
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{MenuItem, Point};

  fn record() -> WindowRecord {
    WindowRecord {
      id: WindowId::from("window-1"),
      extension: ExtensionId::from("ext.test"),
      handle: NativeHandle(1),
      seq: 1,
      attrs: WindowAttributes::with_defaults(Bounds::new(100.0, 100.0, 800.0, 600.0), "#FFFFFF"),
      insets: Insets::title_bar(28.0),
      normal_bounds: None,
      menu: None,
      context_menu: None,
    }
  }

  fn patch(f: impl FnOnce(&mut WindowPatch)) -> RecordChange {
    let mut p = WindowPatch::default();
    f(&mut p);
    p.into()
  }

  #[test]
  fn reasserting_state_fires_nothing() {
    let mut r = record();
    assert_eq!(
      r.apply(patch(|p| p.maximized = Some(true))),
      vec![EventKind::Maximized]
    );
    assert!(r.apply(patch(|p| p.maximized = Some(true))).is_empty());
    assert!(r.apply(patch(|p| p.visible = Some(true))).is_empty());
  }

  #[test]
  fn fullscreen_clears_maximized_and_restores_bounds() {
    let mut r = record();
    let original = r.attrs.bounds;
    r.apply(patch(|p| p.maximized = Some(true)));

    let screen = Bounds::new(0.0, 0.0, 1920.0, 1080.0);
    let fired = r.apply(patch(|p| {
      p.fullscreen = Some(true);
      p.bounds = Some(screen);
    }));
    assert_eq!(
      fired,
      vec![
        EventKind::EnteredFullscreen,
        EventKind::Unmaximized,
        EventKind::Moved,
        EventKind::Resized
      ]
    );
    assert!(!r.attrs.flags.maximized);
    assert_eq!(r.normal_bounds(), original);

    r.apply(patch(|p| p.fullscreen = Some(false)));
    assert_eq!(r.attrs.bounds, original);
    assert_eq!(r.normal_bounds, None);
  }

  #[test]
  fn hiding_drops_focus() {
    let mut r = record();
    r.apply(patch(|p| p.focused = Some(true)));
    let fired = r.apply(patch(|p| p.visible = Some(false)));
    assert_eq!(fired, vec![EventKind::Hidden, EventKind::Unfocused]);
    assert!(!r.attrs.flags.focused);
  }

  #[test]
  fn opacity_and_aspect_ratio_are_normalized() {
    let mut r = record();
    r.apply(patch(|p| {
      p.opacity = Some(1.7);
      p.aspect_ratio = Some(Some(-2.0));
    }));
    assert!((r.attrs.opacity - 1.0).abs() < f64::EPSILON);
    assert_eq!(r.attrs.aspect_ratio, None);

    r.apply(patch(|p| p.opacity = Some(-0.5)));
    assert!(r.attrs.opacity.abs() < f64::EPSILON);
  }

  #[test]
  fn move_and_resize_fire_in_that_order() {
    let mut r = record();
    let fired = r.apply(patch(|p| p.bounds = Some(Bounds::new(0.0, 0.0, 640.0, 480.0))));
    assert_eq!(fired, vec![EventKind::Moved, EventKind::Resized]);
  }

  #[test]
  fn replacing_a_context_menu_closes_the_old_one() {
    let mut r = record();
    let open = || {
      ContextMenu::build(&[MenuItem::new("Copy")], Point::new(1.0, 1.0), None).ok()
    };
    let first = RecordChange {
      context_menu: Some(open()),
      ..RecordChange::default()
    };
    assert!(r.apply(first).is_empty());

    let second = RecordChange {
      context_menu: Some(open()),
      ..RecordChange::default()
    };
    assert_eq!(r.apply(second), vec![EventKind::ContextMenuClosed]);

    let close = RecordChange {
      context_menu: Some(None),
      ..RecordChange::default()
    };
    assert_eq!(r.apply(close), vec![EventKind::ContextMenuClosed]);
    assert!(r.context_menu.is_none());
  }

  #[test]
  fn snapshot_mirrors_attributes() {
    let mut r = record();
    r.apply(patch(|p| p.title = Some("Inbox".into())));
    let w = r.snapshot(Some(WindowId::from("window-9")));
    assert_eq!(w.title, "Inbox");
    assert_eq!(w.parent, Some(WindowId::from("window-9")));
    assert_eq!(r.content_bounds(), Bounds::new(100.0, 128.0, 800.0, 572.0));
  }
}
