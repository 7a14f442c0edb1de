//! Parent/child relationships.

mod common;

use std::future::Future;

use common::{ext, manager, window, window_with, Recorder};
use extwin::bridge::{NativeError, NativeResult, NativeWindow, WindowSpec};
use extwin::{
  EventKind, HeadlessBridge, NativeBridge, NativeChange, NativeHandle, WindowError, WindowId,
  WindowManager, WindowPatch, WindowProperties, WindowUpdate,
};

/// Headless bridge that fails every change matching `refuse`.
struct Refusing {
  inner: HeadlessBridge,
  refuse: fn(&NativeChange) -> bool,
}

impl NativeBridge for Refusing {
  fn create_window(
    &self,
    spec: &WindowSpec,
  ) -> impl Future<Output = NativeResult<NativeWindow>> + Send {
    self.inner.create_window(spec)
  }

  fn destroy_window(&self, handle: NativeHandle) -> impl Future<Output = NativeResult<()>> + Send {
    self.inner.destroy_window(handle)
  }

  fn apply_change(
    &self,
    handle: NativeHandle,
    change: &NativeChange,
  ) -> impl Future<Output = NativeResult<WindowPatch>> + Send {
    async move {
      if (self.refuse)(change) {
        return Err(NativeError::new("refused"));
      }
      self.inner.apply_change(handle, change).await
    }
  }
}

fn refusing(refuse: fn(&NativeChange) -> bool) -> WindowManager<Refusing> {
  let bridge = Refusing {
    inner: HeadlessBridge::new(),
    refuse,
  };
  WindowManager::new(bridge).unwrap()
}

#[tokio::test]
async fn parent_and_children_are_reported_both_ways() {
  let manager = manager();
  let parent = window(&manager).await;
  let first = window(&manager).await;
  let second = window(&manager).await;

  manager.set_parent_window(&first.id, &parent.id).await.unwrap();
  manager.set_parent_window(&second.id, &parent.id).await.unwrap();

  let children: Vec<WindowId> = manager
    .get_child_windows(&parent.id)
    .unwrap()
    .into_iter()
    .map(|r| r.id)
    .collect();
  assert_eq!(children, vec![first.id.clone(), second.id.clone()]);
  assert_eq!(
    manager.get_parent_window(&first.id).unwrap().map(|r| r.id),
    Some(parent.id.clone())
  );
  assert_eq!(manager.get_parent_window(&parent.id).unwrap(), None);
  assert!(matches!(
    manager.get_child_windows(&WindowId::from("window-ghost")),
    Err(WindowError::NotFound(_))
  ));
}

#[tokio::test]
async fn reparenting_sends_the_parent_handle() {
  let manager = manager();
  let parent = window(&manager).await;
  let child = window(&manager).await;
  let parent_handle = manager.handle_of(&parent.id).unwrap();
  let child_handle = manager.handle_of(&child.id).unwrap();

  manager.set_parent_window(&child.id, &parent.id).await.unwrap();
  manager.remove_parent_window(&child.id).await.unwrap();

  assert_eq!(
    manager.bridge().changes_for(child_handle),
    vec![
      NativeChange::SetParent {
        parent: Some(parent_handle),
        modal: false,
      },
      NativeChange::SetParent {
        parent: None,
        modal: false,
      },
    ]
  );
}

#[tokio::test]
async fn cycles_are_rejected_and_the_edge_survives() {
  let manager = manager();
  let a = window(&manager).await;
  let b = window(&manager).await;
  let c = window(&manager).await;

  manager.set_parent_window(&b.id, &a.id).await.unwrap();
  manager.set_parent_window(&c.id, &b.id).await.unwrap();

  let result = manager.set_parent_window(&a.id, &c.id).await;
  assert!(matches!(result, Err(WindowError::Cycle { .. })));
  let result = manager.set_parent_window(&a.id, &a.id).await;
  assert!(matches!(result, Err(WindowError::Cycle { .. })));

  assert_eq!(manager.get_parent_window(&a.id).unwrap(), None);
  assert_eq!(
    manager.get_parent_window(&c.id).unwrap().map(|r| r.id),
    Some(b.id.clone())
  );
}

#[tokio::test]
async fn missing_parent_is_not_found() {
  let manager = manager();
  let child = window(&manager).await;
  let result = manager
    .set_parent_window(&child.id, &WindowId::from("window-ghost"))
    .await;
  assert!(matches!(result, Err(WindowError::NotFound(_))));
}

#[tokio::test]
async fn removing_a_parent_promotes_children_and_clears_modal() {
  let manager = manager();
  let events = Recorder::attach(&manager);
  let parent = window(&manager).await;
  let child = window_with(
    &manager,
    WindowProperties {
      parent: Some(parent.id.clone()),
      modal: Some(true),
      ..WindowProperties::default()
    },
  )
  .await;
  assert!(manager.is_modal(&child.id).unwrap());

  manager.remove(&parent.id).await.unwrap();

  let promoted = manager.get(&child.id).unwrap();
  assert_eq!(promoted.parent, None);
  assert!(!promoted.modal);
  assert_eq!(events.kinds_for(&child.id), vec![EventKind::Created]);
}

#[tokio::test]
async fn detaching_a_modal_child_clears_modal() {
  let manager = manager();
  let parent = window(&manager).await;
  let child = window_with(
    &manager,
    WindowProperties {
      parent: Some(parent.id.clone()),
      modal: Some(true),
      ..WindowProperties::default()
    },
  )
  .await;

  manager.remove_parent_window(&child.id).await.unwrap();
  assert!(!manager.is_modal(&child.id).unwrap());
  assert!(manager.get_child_windows(&parent.id).unwrap().is_empty());
}

#[tokio::test]
async fn modal_without_a_parent_is_rejected() {
  let manager = manager();
  let props = WindowProperties {
    modal: Some(true),
    ..WindowProperties::default()
  };
  let result = manager.create(&common::ext(), props).await;
  assert!(matches!(result, Err(WindowError::InvalidArgument(_))));
  assert!(manager.bridge().calls().is_empty());
}

#[tokio::test]
async fn native_reparent_failure_rolls_back() {
  let manager = manager();
  let parent = window(&manager).await;
  let child = window(&manager).await;
  let handle = manager.handle_of(&child.id).unwrap();
  manager.bridge().set_failing(handle, true);

  let result = manager.set_parent_window(&child.id, &parent.id).await;
  assert!(matches!(result, Err(WindowError::NativeFailure { .. })));
  assert_eq!(manager.get_parent_window(&child.id).unwrap(), None);
  assert!(manager.get_child_windows(&parent.id).unwrap().is_empty());

  manager.bridge().set_failing(handle, false);
  manager.set_parent_window(&child.id, &parent.id).await.unwrap();
  assert_eq!(manager.get_child_windows(&parent.id).unwrap().len(), 1);
}

#[tokio::test]
async fn update_is_not_half_applied_when_fields_fail() {
  let manager = refusing(|change| matches!(change, NativeChange::Update { .. }));
  let parent = manager.create(&ext(), WindowProperties::default()).await.unwrap();
  let child = manager.create(&ext(), WindowProperties::default()).await.unwrap();
  let before = manager.get_title(&child.id).unwrap();
  let parent_handle = manager.handle_of(&parent.id).unwrap();
  let child_handle = manager.handle_of(&child.id).unwrap();

  let update = WindowUpdate {
    parent: Some(Some(parent.id.clone())),
    title: Some("x".into()),
    ..WindowUpdate::default()
  };
  let result = manager.update(&child.id, update).await;
  assert!(matches!(result, Err(WindowError::NativeFailure { .. })));

  assert_eq!(manager.get_parent_window(&child.id).unwrap(), None);
  assert!(manager.get_child_windows(&parent.id).unwrap().is_empty());
  assert_eq!(manager.get_title(&child.id).unwrap(), before);
  assert_eq!(
    manager.bridge().inner.changes_for(child_handle),
    vec![
      NativeChange::SetParent {
        parent: Some(parent_handle),
        modal: false,
      },
      NativeChange::SetParent {
        parent: None,
        modal: false,
      },
    ]
  );
}

#[tokio::test]
async fn failed_center_reverts_fields_already_sent() {
  let manager = refusing(|change| matches!(change, NativeChange::Center));
  let w = manager.create(&ext(), WindowProperties::default()).await.unwrap();
  let before = manager.get_title(&w.id).unwrap();
  let handle = manager.handle_of(&w.id).unwrap();

  let update = WindowUpdate {
    title: Some("x".into()),
    center: Some(true),
    ..WindowUpdate::default()
  };
  let result = manager.update(&w.id, update).await;
  assert!(matches!(result, Err(WindowError::NativeFailure { .. })));
  assert_eq!(manager.get_title(&w.id).unwrap(), before);

  let reverted = NativeChange::Update {
    patch: WindowPatch {
      title: Some(before),
      ..WindowPatch::default()
    },
    animate: false,
  };
  assert_eq!(manager.bridge().inner.changes_for(handle).last(), Some(&reverted));
}

#[tokio::test]
async fn update_rejects_a_cycle_before_queueing() {
  let manager = manager();
  let events = Recorder::attach(&manager);
  let parent = window(&manager).await;
  let child = window(&manager).await;
  manager.set_parent_window(&child.id, &parent.id).await.unwrap();
  manager.bridge().clear_calls();
  events.clear();

  let onto_child = WindowUpdate {
    parent: Some(Some(child.id.clone())),
    title: Some("x".into()),
    ..WindowUpdate::default()
  };
  let result = manager.update(&parent.id, onto_child).await;
  assert!(matches!(result, Err(WindowError::Cycle { .. })));

  let onto_self = WindowUpdate {
    parent: Some(Some(child.id.clone())),
    ..WindowUpdate::default()
  };
  let result = manager.update(&child.id, onto_self).await;
  assert!(matches!(result, Err(WindowError::Cycle { .. })));

  assert!(manager.bridge().calls().is_empty());
  assert!(events.all().is_empty());
  assert_eq!(manager.get_title(&parent.id).unwrap(), parent.title);
  assert_eq!(
    manager.get_parent_window(&child.id).unwrap().map(|r| r.id),
    Some(parent.id.clone())
  );
}
