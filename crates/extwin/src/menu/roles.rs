/*! Built-in role table: default label, accelerator and submenu per role. */

use crate::types::MenuRole;

/// Entry of a role's default submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleEntry {
  Role(MenuRole),
  Separator,
}

/// Defaults for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleInfo {
  pub label: &'static str,
  pub accelerator: Option<&'static str>,
  /// Non-empty for the menu roles (`fileMenu`, `editMenu`, ...).
  pub submenu: &'static [RoleEntry],
}

use RoleEntry::{Role, Separator};

const FILE_MENU: &[RoleEntry] = &[Role(MenuRole::Close)];

const EDIT_MENU: &[RoleEntry] = &[
  Role(MenuRole::Undo),
  Role(MenuRole::Redo),
  Separator,
  Role(MenuRole::Cut),
  Role(MenuRole::Copy),
  Role(MenuRole::Paste),
  Role(MenuRole::PasteAndMatchStyle),
  Role(MenuRole::Delete),
  Role(MenuRole::SelectAll),
];

const VIEW_MENU: &[RoleEntry] = &[
  Role(MenuRole::Reload),
  Role(MenuRole::ForceReload),
  Role(MenuRole::ToggleDevTools),
  Separator,
  Role(MenuRole::ResetZoom),
  Role(MenuRole::ZoomIn),
  Role(MenuRole::ZoomOut),
  Separator,
  Role(MenuRole::ToggleFullscreen),
];

const WINDOW_MENU: &[RoleEntry] = &[Role(MenuRole::Minimize), Role(MenuRole::Close)];

const fn info(label: &'static str, accelerator: Option<&'static str>) -> RoleInfo {
  RoleInfo {
    label,
    accelerator,
    submenu: &[],
  }
}

const fn menu(label: &'static str, submenu: &'static [RoleEntry]) -> RoleInfo {
  RoleInfo {
    label,
    accelerator: None,
    submenu,
  }
}

impl MenuRole {
  /// Default presentation for this role.
  pub const fn info(self) -> RoleInfo {
    match self {
      Self::Undo => info("Undo", Some("CmdOrCtrl+Z")),
      Self::About => info("About", None),
      Self::Redo => info("Redo", Some("Shift+CmdOrCtrl+Z")),
      Self::Cut => info("Cut", Some("CmdOrCtrl+X")),
      Self::Copy => info("Copy", Some("CmdOrCtrl+C")),
      Self::Paste => info("Paste", Some("CmdOrCtrl+V")),
      Self::PasteAndMatchStyle => info("Paste and Match Style", Some("Shift+CmdOrCtrl+V")),
      Self::SelectAll => info("Select All", Some("CmdOrCtrl+A")),
      Self::Delete => info("Delete", None),
      Self::Minimize => info("Minimize", Some("CmdOrCtrl+M")),
      Self::Close => info("Close Window", Some("CmdOrCtrl+W")),
      Self::Quit => info("Quit", Some("CmdOrCtrl+Q")),
      Self::Reload => info("Reload", Some("CmdOrCtrl+R")),
      Self::ForceReload => info("Force Reload", Some("Shift+CmdOrCtrl+R")),
      Self::ToggleDevTools => info("Toggle Developer Tools", Some("Alt+CmdOrCtrl+I")),
      Self::ToggleFullscreen => info("Toggle Full Screen", Some("F11")),
      Self::ResetZoom => info("Actual Size", Some("CmdOrCtrl+0")),
      Self::ZoomIn => info("Zoom In", Some("CmdOrCtrl+Plus")),
      Self::ZoomOut => info("Zoom Out", Some("CmdOrCtrl+-")),
      Self::ToggleSpellChecker => info("Check Spelling While Typing", None),
      Self::FileMenu => menu("File", FILE_MENU),
      Self::EditMenu => menu("Edit", EDIT_MENU),
      Self::ViewMenu => menu("View", VIEW_MENU),
      Self::WindowMenu => menu("Window", WINDOW_MENU),
    }
  }

  /// Whether this role expands to a submenu of other roles.
  pub const fn is_menu(self) -> bool {
    !self.info().submenu.is_empty()
  }
}
