/*!
Application and context menus.

Menus are resolved (roles filled in, ids assigned, structure checked) on the
calling task, so a malformed template never reaches the queue. A window holds
at most one of each; setting a new one replaces the old.
*/

use super::sequencer::Command;
use super::{Completion, WindowManager};
use crate::bridge::NativeBridge;
use crate::menu::{ContextMenu, Menu};
use crate::types::{MenuItem, Point, WindowId, WindowResult};

impl<B: NativeBridge> WindowManager<B> {
  /// Resolve `items` and install them as the application menu.
  pub fn set_menu(&self, id: &WindowId, items: &[MenuItem]) -> Completion {
    match Menu::build(items) {
      Ok(menu) => self.submit(id, Command::SetMenu(Some(menu))),
      Err(e) => Completion::failed(e),
    }
  }

  /// Remove the application menu.
  pub fn remove_menu(&self, id: &WindowId) -> Completion {
    self.submit(id, Command::SetMenu(None))
  }

  /// The resolved application menu, if one is set.
  pub fn get_menu(&self, id: &WindowId) -> WindowResult<Option<Menu>> {
    self.shared.store.with_record(id, |r| r.menu.clone())
  }

  /// Open a context menu at `(x, y)`. `position_index` selects the item placed
  /// under the cursor and must be within `items`.
  ///
  /// An already open context menu is closed first, firing
  /// `onContextMenuClosed`.
  pub fn open_context_menu(
    &self,
    id: &WindowId,
    items: &[MenuItem],
    x: f64,
    y: f64,
    position_index: Option<usize>,
  ) -> Completion {
    match ContextMenu::build(items, Point::new(x, y), position_index) {
      Ok(context_menu) => self.submit(id, Command::OpenContextMenu(context_menu)),
      Err(e) => Completion::failed(e),
    }
  }

  /// Succeeds without effect when no context menu is open.
  pub fn close_context_menu(&self, id: &WindowId) -> Completion {
    self.submit(id, Command::CloseContextMenu)
  }

  /// The open context menu, if any.
  pub fn get_context_menu(&self, id: &WindowId) -> WindowResult<Option<ContextMenu>> {
    self.shared.store.with_record(id, |r| r.context_menu.clone())
  }

  /// Hide the menu bar until Alt is pressed.
  pub fn set_auto_hide_menu(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.auto_hide_menu = Some(value))
  }

  pub fn set_menu_visibility(&self, id: &WindowId, value: bool) -> Completion {
    self.set(id, |p| p.menu_visible = Some(value))
  }
}
