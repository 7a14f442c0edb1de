//! Changes the toolkit reports on its own.

mod common;

use std::time::Duration;

use common::{manager, slow_manager, window, Recorder};
use extwin::{
  Bounds, ChangeOrigin, EventKind, NativeEvent, NativeHandle, PartialBounds, WindowError,
  WindowPatch,
};

fn moved_to(bounds: Bounds) -> NativeEvent {
  NativeEvent::Changed(WindowPatch {
    bounds: Some(bounds),
    ..WindowPatch::default()
  })
}

#[tokio::test]
async fn native_resize_commits_with_native_origin() {
  let manager = manager();
  let w = window(&manager).await;
  let events = Recorder::attach(&manager);
  let handle = manager.handle_of(&w.id).unwrap();

  let target = Bounds::new(12.0, 34.0, 500.0, 400.0);
  manager.on_native_event(handle, moved_to(target)).await.unwrap();

  assert_eq!(manager.get_bounds(&w.id).unwrap(), target);
  assert_eq!(
    events.origins_for(&w.id),
    vec![
      (EventKind::Moved, ChangeOrigin::Native),
      (EventKind::Resized, ChangeOrigin::Native),
    ]
  );
}

#[tokio::test]
async fn both_paths_reach_the_same_state() {
  let manager = manager();
  let by_extension = window(&manager).await;
  let by_toolkit = window(&manager).await;
  let events = Recorder::attach(&manager);
  let target = Bounds::new(40.0, 40.0, 640.0, 360.0);

  let partial = PartialBounds {
    x: Some(target.x),
    y: Some(target.y),
    width: Some(target.width),
    height: Some(target.height),
  };
  manager.set_bounds(&by_extension.id, partial, None).await.unwrap();
  manager.maximize(&by_extension.id).await.unwrap();

  let handle = manager.handle_of(&by_toolkit.id).unwrap();
  manager.on_native_event(handle, moved_to(target)).await.unwrap();
  let maximize = NativeEvent::Changed(WindowPatch {
    maximized: Some(true),
    bounds: manager.get_bounds(&by_extension.id).ok(),
    ..WindowPatch::default()
  });
  manager.on_native_event(handle, maximize).await.unwrap();

  assert!(manager.is_maximized(&by_extension.id).unwrap());
  assert!(manager.is_maximized(&by_toolkit.id).unwrap());
  assert_eq!(
    manager.get_bounds(&by_extension.id).unwrap(),
    manager.get_bounds(&by_toolkit.id).unwrap()
  );
  assert_eq!(
    manager.get_normal_bounds(&by_extension.id).unwrap(),
    manager.get_normal_bounds(&by_toolkit.id).unwrap()
  );
  assert_eq!(events.kinds_for(&by_extension.id), events.kinds_for(&by_toolkit.id));
}

#[tokio::test]
async fn native_close_drains_the_queue() {
  let manager = slow_manager(Duration::from_millis(50));
  let w = window(&manager).await;
  let events = Recorder::attach(&manager);
  let handle = manager.handle_of(&w.id).unwrap();

  let in_flight = manager.set_title(&w.id, "first");
  tokio::time::sleep(Duration::from_millis(10)).await;
  let second = manager.set_title(&w.id, "second");
  let third = manager.set_opacity(&w.id, 0.5);
  let closed = manager.on_native_event(handle, NativeEvent::Closed);

  assert_eq!(in_flight.await, Ok(()));
  assert_eq!(closed.await, Ok(()));
  assert_eq!(second.await, Err(WindowError::Closed(w.id.clone())));
  assert_eq!(third.await, Err(WindowError::Closed(w.id.clone())));

  assert_eq!(
    events.origins_for(&w.id),
    vec![
      (EventKind::Closed, ChangeOrigin::Native),
      (EventKind::Removed, ChangeOrigin::Native),
    ]
  );
  assert!(matches!(manager.get(&w.id), Err(WindowError::NotFound(_))));
}

#[tokio::test]
async fn queued_remove_succeeds_when_the_window_closes_first() {
  let manager = slow_manager(Duration::from_millis(50));
  let w = window(&manager).await;
  let handle = manager.handle_of(&w.id).unwrap();

  let in_flight = manager.set_title(&w.id, "busy");
  tokio::time::sleep(Duration::from_millis(10)).await;
  let removal = manager.remove(&w.id);
  let closed = manager.on_native_event(handle, NativeEvent::Closed);

  assert_eq!(in_flight.await, Ok(()));
  assert_eq!(closed.await, Ok(()));
  assert_eq!(removal.await, Ok(()));
}

#[tokio::test]
async fn unknown_handles_are_reported() {
  let manager = manager();
  let result = manager
    .on_native_event(NativeHandle(4242), NativeEvent::Closed)
    .await;
  assert_eq!(result, Err(WindowError::UnknownHandle(NativeHandle(4242))));

  let w = window(&manager).await;
  let handle = manager.handle_of(&w.id).unwrap();
  manager.remove(&w.id).await.unwrap();
  let result = manager.on_native_event(handle, moved_to(Bounds::default())).await;
  assert_eq!(result, Err(WindowError::UnknownHandle(handle)));
}

#[tokio::test]
async fn non_finite_bounds_are_ignored() {
  let manager = manager();
  let w = window(&manager).await;
  let before = manager.get_bounds(&w.id).unwrap();
  let events = Recorder::attach(&manager);
  let handle = manager.handle_of(&w.id).unwrap();

  let bogus = Bounds::new(f64::NAN, 0.0, f64::INFINITY, 10.0);
  manager.on_native_event(handle, moved_to(bogus)).await.unwrap();

  assert_eq!(manager.get_bounds(&w.id).unwrap(), before);
  assert!(events.all().is_empty());
}

#[tokio::test]
async fn queued_resize_keeps_a_native_move() {
  let manager = slow_manager(Duration::from_millis(30));
  let w = window(&manager).await;
  let handle = manager.handle_of(&w.id).unwrap();
  let size = manager.get_size(&w.id).unwrap();

  let in_flight = manager.set_title(&w.id, "busy");
  tokio::time::sleep(Duration::from_millis(5)).await;
  let resize = manager.set_size(&w.id, 500.0, 400.0, None);
  let moved = manager.on_native_event(
    handle,
    moved_to(Bounds::new(300.0, 200.0, size.width, size.height)),
  );

  in_flight.await.unwrap();
  moved.await.unwrap();
  resize.await.unwrap();

  assert_eq!(
    manager.get_bounds(&w.id).unwrap(),
    Bounds::new(300.0, 200.0, 500.0, 400.0)
  );
}
