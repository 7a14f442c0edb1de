/*!
Core window manager - owns window state, per-window queues and event dispatch.

# Module Structure

- `mod.rs` - `WindowManager` struct, builder, config, listeners, native reports
- `store/` - record store (source of truth) and parent/child hierarchy
- `sequencer.rs` - per-window worker that runs operations in order
- `ingest.rs` - applying native reports on the window's queue
- `request.rs` - update requests and their resolution at dequeue time
- `validation.rs` - argument checks run before anything is queued
- `completion.rs` - `Completion` future returned by mutating calls
- `dispatcher.rs` - listener registry and broadcast channel
- `lifecycle.rs` - `create()`, `get()`, `query()`, `remove()`, `update()`
- `queries.rs` - read-only getters
- `actions.rs` - geometry and state setters
- `parenting.rs` - parent/child operations
- `menus.rs` - application and context menus

# Example

```ignore
use extwin::{ExtensionId, HeadlessBridge, WindowManager, WindowProperties};

let manager = WindowManager::new(HeadlessBridge::new())?;
let ext = ExtensionId::from("com.example.notes");

let window = manager.create(&ext, WindowProperties::default()).await?;
manager.set_title(&window.id, "Notes").await?;

let mut events = manager.subscribe();
while let Ok(event) = events.recv().await {
    // handle event
}
```
*/

mod actions;
mod completion;
mod dispatcher;
mod ingest;
mod lifecycle;
mod menus;
mod parenting;
mod queries;
mod request;
mod sequencer;
mod store;
mod validation;

pub use completion::Completion;
pub use dispatcher::Listener;

use std::collections::HashMap;
use std::sync::Arc;

use async_broadcast::Receiver;
use parking_lot::RwLock;
use serde::Deserialize;
use tokio::runtime::Handle;

use crate::bridge::{NativeBridge, NativeEvent};
use crate::types::{
  EventKind, NativeHandle, Size, WindowError, WindowEvent, WindowId, WindowIds, WindowResult,
};
use dispatcher::Dispatcher;
use request::UpdateRequest;
use sequencer::{Command, WindowQueue};
use store::WindowStore;

const EVENT_CHANNEL_CAPACITY: usize = 5000;

/// Manager settings. Every field has a default, so a partial config file is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagerConfig {
  /// Capacity of the `subscribe()` channel. The oldest event is dropped on overflow.
  pub event_channel_capacity: usize,
  /// Size of a window created without `width`/`height`.
  pub default_size: Size,
  /// Background color of a window created without `backgroundColor`.
  pub default_background_color: String,
}

impl Default for ManagerConfig {
  fn default() -> Self {
    Self {
      event_channel_capacity: EVENT_CHANNEL_CAPACITY,
      default_size: Size::new(800.0, 600.0),
      default_background_color: "#FFFFFF".to_owned(),
    }
  }
}

pub(crate) struct Shared<B> {
  bridge: B,
  store: WindowStore,
  dispatcher: Dispatcher,
  queues: RwLock<HashMap<WindowId, Arc<WindowQueue>>>,
  config: ManagerConfig,
  runtime: Handle,
}

/// Window manager.
///
/// Clone is cheap (Arc bump) - share freely across tasks. Window queues stop
/// once the last clone is dropped.
pub struct WindowManager<B: NativeBridge> {
  shared: Arc<Shared<B>>,
}

impl<B: NativeBridge> Clone for WindowManager<B> {
  fn clone(&self) -> Self {
    Self {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<B: NativeBridge> std::fmt::Debug for WindowManager<B> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WindowManager")
      .field("windows", &self.shared.queues.read().len())
      .field("config", &self.shared.config)
      .finish_non_exhaustive()
  }
}

/// Builds a [`WindowManager`].
#[derive(Debug)]
pub struct WindowManagerBuilder<B> {
  bridge: B,
  config: ManagerConfig,
  runtime: Option<Handle>,
}

impl<B: NativeBridge> WindowManagerBuilder<B> {
  #[must_use]
  /// Replace the whole config.
  pub fn config(mut self, config: ManagerConfig) -> Self {
    self.config = config;
    self
  }

  #[must_use]
  /// Override only the `subscribe()` channel capacity.
  pub fn event_channel_capacity(mut self, capacity: usize) -> Self {
    self.config.event_channel_capacity = capacity;
    self
  }

  /// Runtime the window queues run on. Defaults to the current one.
  #[must_use]
  pub fn runtime(mut self, runtime: Handle) -> Self {
    self.runtime = Some(runtime);
    self
  }

  /// Fails when no runtime was given and none is current.
  pub fn build(self) -> WindowResult<WindowManager<B>> {
    let runtime = match self.runtime {
      Some(runtime) => runtime,
      None => Handle::try_current()
        .map_err(|e| WindowError::Internal(format!("no tokio runtime available: {e}")))?,
    };
    log::debug!("Starting window manager with {:?}", self.config);
    Ok(WindowManager {
      shared: Arc::new(Shared {
        bridge: self.bridge,
        store: WindowStore::new(),
        dispatcher: Dispatcher::new(self.config.event_channel_capacity),
        queues: RwLock::new(HashMap::new()),
        config: self.config,
        runtime,
      }),
    })
  }
}

impl<B: NativeBridge> WindowManager<B> {
  /// Create with default config on the current runtime.
  pub fn new(bridge: B) -> WindowResult<Self> {
    Self::builder(bridge).build()
  }

  /// Start configuring a manager around `bridge`.
  pub fn builder(bridge: B) -> WindowManagerBuilder<B> {
    WindowManagerBuilder {
      bridge,
      config: ManagerConfig::default(),
      runtime: None,
    }
  }

  /// The bridge native calls go through.
  pub fn bridge(&self) -> &B {
    &self.shared.bridge
  }

  /// Settings this manager was built with.
  pub fn config(&self) -> &ManagerConfig {
    &self.shared.config
  }

  /// Receive every event. Slow receivers lose the oldest events first.
  pub fn subscribe(&self) -> Receiver<WindowEvent> {
    self.shared.dispatcher.subscribe()
  }

  /// Register a listener for one event kind. Returns false if this exact
  /// listener was already registered for it.
  pub fn add_listener(&self, kind: EventKind, listener: Listener) -> bool {
    self.shared.dispatcher.add(kind, listener)
  }

  /// Returns false if the listener wasn't registered.
  pub fn remove_listener(&self, kind: EventKind, listener: &Listener) -> bool {
    self.shared.dispatcher.remove(kind, listener)
  }

  /// Report something the toolkit did on its own.
  ///
  /// Runs on the window's queue ahead of pending operations.
  pub fn on_native_event(&self, handle: NativeHandle, event: NativeEvent) -> Completion {
    let Some(id) = self.shared.store.id_for_handle(handle) else {
      log::warn!("Native {event:?} for unknown handle {handle}");
      return Completion::failed(WindowError::UnknownHandle(handle));
    };
    match self.queue(&id) {
      Ok(queue) => queue.report(event),
      Err(_) => Completion::failed(WindowError::Closed(id)),
    }
  }

  /// Native handle behind a window, for hosts that talk to the toolkit directly.
  pub fn handle_of(&self, id: &WindowId) -> WindowResult<NativeHandle> {
    self.shared.store.with_record(id, |r| r.handle)
  }

  fn queue(&self, id: &WindowId) -> WindowResult<Arc<WindowQueue>> {
    self
      .shared
      .queues
      .read()
      .get(id)
      .cloned()
      .ok_or_else(|| WindowError::NotFound(id.clone()))
  }

  fn submit(&self, id: &WindowId, command: Command) -> Completion {
    match self.queue(id) {
      Ok(queue) => queue.submit(command),
      Err(e) => Completion::failed(e),
    }
  }

  fn submit_update(&self, id: &WindowId, request: UpdateRequest) -> Completion {
    self.submit(id, Command::Update(request))
  }

  /// Fan out to each target. Unknown targets fail without affecting the rest.
  fn fan_out(&self, ids: WindowIds, f: impl Fn(&WindowQueue) -> Completion) -> Completion {
    let single = ids.is_single();
    let parts = ids
      .into_unique()
      .into_iter()
      .map(|id| {
        let completion = match self.queue(&id) {
          Ok(queue) => f(&queue),
          Err(e) => Completion::failed(e),
        };
        (id, completion)
      })
      .collect();
    Completion::batch(single, parts)
  }
}
