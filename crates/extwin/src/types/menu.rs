/*! Declarative menu item shape, as extensions submit it. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Built-in menu role. Role items take their default label, accelerator and
/// action from the role table (see `menu::roles`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum MenuRole {
  Undo,
  About,
  Redo,
  Cut,
  Copy,
  Paste,
  PasteAndMatchStyle,
  SelectAll,
  Delete,
  Minimize,
  Close,
  Quit,
  Reload,
  ForceReload,
  ToggleDevTools,
  #[serde(rename = "togglefullscreen")]
  ToggleFullscreen,
  ResetZoom,
  ZoomIn,
  ZoomOut,
  ToggleSpellChecker,
  FileMenu,
  EditMenu,
  ViewMenu,
  WindowMenu,
}

/// Menu item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MenuItemType {
  #[default]
  Normal,
  Separator,
  Submenu,
  Checkbox,
  Radio,
}

/// Menu item properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub role: Option<MenuRole>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub item_type: Option<MenuItemType>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub sublabel: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub tooltip: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub accelerator: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub icon: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub enabled: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub accelerator_works_when_hidden: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub visible: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub checked: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub register_accelerator: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub submenu: Option<Vec<MenuItem>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  #[ts(optional)]
  pub tag: Option<String>,
}

impl MenuItem {
  /// Plain clickable item.
  pub fn new(label: impl Into<String>) -> Self {
    Self {
      label: Some(label.into()),
      ..Self::default()
    }
  }

  /// Item backed by a built-in role.
  pub fn role(role: MenuRole) -> Self {
    Self {
      role: Some(role),
      ..Self::default()
    }
  }

  pub fn separator() -> Self {
    Self {
      item_type: Some(MenuItemType::Separator),
      ..Self::default()
    }
  }

  /// Item opening a nested menu.
  pub fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
    Self {
      label: Some(label.into()),
      item_type: Some(MenuItemType::Submenu),
      submenu: Some(items),
      ..Self::default()
    }
  }

  #[must_use]
  pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
    self.tag = Some(tag.into());
    self
  }

  #[must_use]
  pub fn with_accelerator(mut self, accelerator: impl Into<String>) -> Self {
    self.accelerator = Some(accelerator.into());
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn roles_use_declared_names() {
    let json = serde_json::to_string(&[
      MenuRole::PasteAndMatchStyle,
      MenuRole::ToggleFullscreen,
      MenuRole::ToggleDevTools,
    ])
    .ok();
    assert_eq!(
      json.as_deref(),
      Some(r#"["pasteAndMatchStyle","togglefullscreen","toggleDevTools"]"#)
    );
  }

  #[test]
  fn item_type_field_is_named_type() {
    let item: Result<MenuItem, _> =
      serde_json::from_str(r#"{"type":"separator","tag":"sep-1"}"#);
    let item = item.ok();
    assert_eq!(
      item.as_ref().and_then(|i| i.item_type),
      Some(MenuItemType::Separator)
    );
    assert_eq!(item.and_then(|i| i.tag).as_deref(), Some("sep-1"));
  }
}
