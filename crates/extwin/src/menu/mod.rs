/*!
Menu subsystem.

Declarative `MenuItem` lists are resolved into a `Menu`: role defaults filled
in, item types inferred, and every item given a `MenuItemId` so native
activations can be mapped back to the item (and its tag).

- `roles.rs` - built-in role table
*/

mod roles;

pub use roles::{RoleEntry, RoleInfo};

use crate::types::{MenuItem, MenuItemId, MenuItemType, MenuRole, Point, WindowError, WindowResult};
use serde::Serialize;

/// A resolved menu item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMenuItem {
  pub id: MenuItemId,
  pub item_type: MenuItemType,
  pub role: Option<MenuRole>,
  pub label: String,
  pub sublabel: Option<String>,
  pub tooltip: Option<String>,
  pub accelerator: Option<String>,
  pub icon: Option<String>,
  pub enabled: bool,
  pub visible: bool,
  pub checked: bool,
  pub accelerator_works_when_hidden: bool,
  pub register_accelerator: bool,
  pub submenu: Vec<ResolvedMenuItem>,
  pub tag: Option<String>,
}

/// Application or context menu, ready for the native bridge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Menu {
  items: Vec<ResolvedMenuItem>,
}

impl Menu {
  /// Resolve declarative items. Fails on malformed items.
  pub fn build(items: &[MenuItem]) -> WindowResult<Self> {
    let mut next_id = 1;
    let items = items
      .iter()
      .map(|item| resolve(item, &mut next_id))
      .collect::<WindowResult<Vec<_>>>()?;
    Ok(Self { items })
  }

  /// Top-level items.
  pub fn items(&self) -> &[ResolvedMenuItem] {
    &self.items
  }

  /// Find an item anywhere in the tree.
  pub fn find(&self, id: MenuItemId) -> Option<&ResolvedMenuItem> {
    self.iter().find(|item| item.id == id)
  }

  /// Find the first item carrying `tag`.
  pub fn find_by_tag(&self, tag: &str) -> Option<&ResolvedMenuItem> {
    self.iter().find(|item| item.tag.as_deref() == Some(tag))
  }

  /// All items, depth first.
  pub fn iter(&self) -> impl Iterator<Item = &ResolvedMenuItem> {
    let mut stack: Vec<&ResolvedMenuItem> = self.items.iter().rev().collect();
    std::iter::from_fn(move || {
      let item = stack.pop()?;
      stack.extend(item.submenu.iter().rev());
      Some(item)
    })
  }

  pub fn len(&self) -> usize {
    self.iter().count()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

/// An open context menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenu {
  pub menu: Menu,
  /// Where the menu opens, in window coordinates.
  pub position: Point,
  /// Top-level item placed under the cursor.
  pub position_index: Option<usize>,
}

impl ContextMenu {
  pub fn build(items: &[MenuItem], position: Point, position_index: Option<usize>) -> WindowResult<Self> {
    if !(position.x.is_finite() && position.y.is_finite()) {
      return Err(WindowError::invalid("context menu position must be finite"));
    }
    if let Some(index) = position_index {
      if index >= items.len() {
        return Err(WindowError::invalid(format!(
          "positionIndex {index} out of range for {} items",
          items.len()
        )));
      }
    }
    Ok(Self {
      menu: Menu::build(items)?,
      position,
      position_index,
    })
  }
}

fn next(next_id: &mut u32) -> MenuItemId {
  let id = MenuItemId(*next_id);
  *next_id += 1;
  id
}

fn resolve(item: &MenuItem, next_id: &mut u32) -> WindowResult<ResolvedMenuItem> {
  let id = next(next_id);
  let role_info = item.role.map(MenuRole::info);

  let item_type = match item.item_type {
    Some(t) => t,
    None if item.submenu.is_some() || item.role.is_some_and(MenuRole::is_menu) => {
      MenuItemType::Submenu
    }
    None => MenuItemType::Normal,
  };

  let submenu = match (item_type, &item.submenu) {
    (MenuItemType::Separator, Some(_)) => {
      return Err(WindowError::invalid("separator items cannot have a submenu"));
    }
    (MenuItemType::Submenu, Some(children)) => children
      .iter()
      .map(|child| resolve(child, next_id))
      .collect::<WindowResult<Vec<_>>>()?,
    (MenuItemType::Submenu, None) => match role_info {
      Some(info) if !info.submenu.is_empty() => info
        .submenu
        .iter()
        .map(|entry| role_entry(*entry, next_id))
        .collect(),
      _ => return Err(WindowError::invalid("submenu items need a submenu")),
    },
    (_, Some(_)) => {
      return Err(WindowError::invalid(format!(
        "{item_type:?} items cannot have a submenu"
      )));
    }
    (_, None) => Vec::new(),
  };

  let label = match (&item.label, role_info) {
    (Some(label), _) => label.clone(),
    (None, Some(info)) => info.label.to_owned(),
    (None, None) => String::new(),
  };
  let accelerator = item
    .accelerator
    .clone()
    .or_else(|| role_info.and_then(|info| info.accelerator.map(str::to_owned)));
  let checkable = matches!(item_type, MenuItemType::Checkbox | MenuItemType::Radio);

  Ok(ResolvedMenuItem {
    id,
    item_type,
    role: item.role,
    label,
    sublabel: item.sublabel.clone(),
    tooltip: item.tooltip.clone(),
    accelerator,
    icon: item.icon.clone(),
    enabled: item.enabled.unwrap_or(true),
    visible: item.visible.unwrap_or(true),
    checked: checkable && item.checked.unwrap_or(false),
    accelerator_works_when_hidden: item.accelerator_works_when_hidden.unwrap_or(true),
    register_accelerator: item.register_accelerator.unwrap_or(true),
    submenu,
    tag: item.tag.clone(),
  })
}

fn role_entry(entry: RoleEntry, next_id: &mut u32) -> ResolvedMenuItem {
  let id = next(next_id);
  let (item_type, role, info) = match entry {
    RoleEntry::Role(role) => (MenuItemType::Normal, Some(role), Some(role.info())),
    RoleEntry::Separator => (MenuItemType::Separator, None, None),
  };
  ResolvedMenuItem {
    id,
    item_type,
    role,
    label: info.map(|i| i.label.to_owned()).unwrap_or_default(),
    sublabel: None,
    tooltip: None,
    accelerator: info.and_then(|i| i.accelerator.map(str::to_owned)),
    icon: None,
    enabled: true,
    visible: true,
    checked: false,
    accelerator_works_when_hidden: true,
    register_accelerator: true,
    submenu: Vec::new(),
    tag: None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_are_depth_first() {
    let menu = Menu::build(&[
      MenuItem::submenu("File", vec![MenuItem::new("Open"), MenuItem::new("Save")]),
      MenuItem::new("Help"),
    ])
    .unwrap_or_default();
    let labels: Vec<_> = menu.iter().map(|i| (i.id.0, i.label.as_str())).collect();
    assert_eq!(
      labels,
      vec![(1, "File"), (2, "Open"), (3, "Save"), (4, "Help")]
    );
    assert_eq!(menu.len(), 4);
  }

  #[test]
  fn roles_fill_in_defaults() {
    let menu = Menu::build(&[MenuItem::role(MenuRole::Copy)]).unwrap_or_default();
    let copy = menu.items().first();
    assert_eq!(copy.map(|i| i.label.as_str()), Some("Copy"));
    assert_eq!(
      copy.and_then(|i| i.accelerator.as_deref()),
      Some("CmdOrCtrl+C")
    );
    assert_eq!(copy.and_then(|i| i.tag.as_deref()), None);
  }

  #[test]
  fn explicit_fields_override_role_defaults() {
    let item = MenuItem {
      label: Some("Duplicate".into()),
      ..MenuItem::role(MenuRole::Copy)
    }
    .with_accelerator("Alt+D");
    let menu = Menu::build(&[item]).unwrap_or_default();
    let copy = menu.items().first();
    assert_eq!(copy.map(|i| i.label.as_str()), Some("Duplicate"));
    assert_eq!(copy.and_then(|i| i.accelerator.as_deref()), Some("Alt+D"));
  }

  #[test]
  fn menu_roles_expand_to_default_submenu() {
    let menu = Menu::build(&[MenuItem::role(MenuRole::EditMenu)]).unwrap_or_default();
    let edit = menu.items().first();
    assert_eq!(edit.map(|i| i.item_type), Some(MenuItemType::Submenu));
    assert!(edit.is_some_and(|i| i
      .submenu
      .iter()
      .any(|c| c.role == Some(MenuRole::Paste))));
    assert!(edit.is_some_and(|i| i
      .submenu
      .iter()
      .any(|c| c.item_type == MenuItemType::Separator)));
  }

  #[test]
  fn malformed_items_are_rejected() {
    let empty_submenu = MenuItem {
      item_type: Some(MenuItemType::Submenu),
      ..MenuItem::new("Nothing")
    };
    assert!(matches!(
      Menu::build(&[empty_submenu]),
      Err(WindowError::InvalidArgument(_))
    ));

    let separator_with_children = MenuItem {
      submenu: Some(vec![MenuItem::new("x")]),
      ..MenuItem::separator()
    };
    assert!(matches!(
      Menu::build(&[separator_with_children]),
      Err(WindowError::InvalidArgument(_))
    ));
  }

  #[test]
  fn checked_only_sticks_to_checkable_items() {
    let plain = MenuItem {
      checked: Some(true),
      ..MenuItem::new("Plain")
    };
    let check = MenuItem {
      checked: Some(true),
      item_type: Some(MenuItemType::Checkbox),
      ..MenuItem::new("Check")
    };
    let menu = Menu::build(&[plain, check]).unwrap_or_default();
    let checked: Vec<_> = menu.iter().map(|i| i.checked).collect();
    assert_eq!(checked, vec![false, true]);
  }

  #[test]
  fn lookup_by_id_and_tag() {
    let menu = Menu::build(&[MenuItem::submenu(
      "Tools",
      vec![MenuItem::new("Run").with_tag("run")],
    )])
    .unwrap_or_default();
    let run = menu.find_by_tag("run").map(|i| i.id);
    assert_eq!(run, Some(MenuItemId(2)));
    assert_eq!(
      run.and_then(|id| menu.find(id)).map(|i| i.label.as_str()),
      Some("Run")
    );
    assert!(menu.find(MenuItemId(99)).is_none());
  }

  #[test]
  fn context_menu_checks_position_index() {
    let items = [MenuItem::new("a"), MenuItem::new("b")];
    assert!(ContextMenu::build(&items, Point::new(1.0, 1.0), Some(1)).is_ok());
    assert!(matches!(
      ContextMenu::build(&items, Point::new(1.0, 1.0), Some(2)),
      Err(WindowError::InvalidArgument(_))
    ));
    assert!(ContextMenu::build(&items, Point::new(f64::NAN, 0.0), None).is_err());
  }
}
