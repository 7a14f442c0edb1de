//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use extwin::{
  ChangeOrigin, EventKind, ExtensionId, HeadlessBridge, HeadlessConfig, Listener, Window,
  WindowEvent, WindowId, WindowManager, WindowProperties,
};
use parking_lot::Mutex;

pub type Manager = WindowManager<HeadlessBridge>;

pub fn manager() -> Manager {
  WindowManager::new(HeadlessBridge::new()).unwrap()
}

/// Manager whose bridge takes `latency` for every call.
pub fn slow_manager(latency: Duration) -> Manager {
  let config = HeadlessConfig {
    latency: Some(latency),
    ..HeadlessConfig::default()
  };
  WindowManager::new(HeadlessBridge::with_config(config)).unwrap()
}

pub fn ext() -> ExtensionId {
  ExtensionId::from("com.example.test")
}

pub async fn window(manager: &Manager) -> Window {
  manager.create(&ext(), WindowProperties::default()).await.unwrap()
}

pub async fn window_with(manager: &Manager, props: WindowProperties) -> Window {
  manager.create(&ext(), props).await.unwrap()
}

/// Every event the manager emits, in emission order.
#[derive(Clone, Default)]
pub struct Recorder {
  events: Arc<Mutex<Vec<WindowEvent>>>,
}

impl Recorder {
  pub fn attach(manager: &Manager) -> Self {
    let recorder = Self::default();
    let events = Arc::clone(&recorder.events);
    let listener: Listener = Arc::new(move |event: &WindowEvent| events.lock().push(event.clone()));
    for kind in EventKind::ALL {
      manager.add_listener(kind, Arc::clone(&listener));
    }
    recorder
  }

  pub fn all(&self) -> Vec<WindowEvent> {
    self.events.lock().clone()
  }

  /// Event kinds for one window.
  pub fn kinds_for(&self, id: &WindowId) -> Vec<EventKind> {
    self
      .events
      .lock()
      .iter()
      .filter(|e| &e.target.id == id)
      .map(|e| e.kind)
      .collect()
  }

  pub fn count(&self, id: &WindowId, kind: EventKind) -> usize {
    self.kinds_for(id).into_iter().filter(|k| *k == kind).count()
  }

  pub fn origins_for(&self, id: &WindowId) -> Vec<(EventKind, ChangeOrigin)> {
    self
      .events
      .lock()
      .iter()
      .filter(|e| &e.target.id == id)
      .map(|e| (e.kind, e.origin))
      .collect()
  }

  pub fn clear(&self) {
    self.events.lock().clear();
  }
}
