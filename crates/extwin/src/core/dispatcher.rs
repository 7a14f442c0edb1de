/*!
Event dispatch.

Listeners are kept per event kind, in registration order, and invoked
synchronously on the emitting task. Every event is then also broadcast to
`subscribe()` receivers.
*/

use std::collections::HashMap;
use std::sync::Arc;

use async_broadcast::{InactiveReceiver, Receiver, Sender, TrySendError};
use parking_lot::RwLock;

use crate::types::{EventKind, WindowEvent};

/// Event listener. Identity is the `Arc` allocation: registering a clone of
/// the same `Arc` twice is a no-op.
pub type Listener = Arc<dyn Fn(&WindowEvent) + Send + Sync>;

pub(crate) struct Dispatcher {
  listeners: RwLock<HashMap<EventKind, Vec<Listener>>>,
  events_tx: Sender<WindowEvent>,
  events_keepalive: InactiveReceiver<WindowEvent>,
}

impl std::fmt::Debug for Dispatcher {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Dispatcher").finish_non_exhaustive()
  }
}

impl Dispatcher {
  pub(crate) fn new(capacity: usize) -> Self {
    let (mut tx, rx) = async_broadcast::broadcast(capacity.max(1));
    tx.set_overflow(true); // Drop oldest messages when full
    Self {
      listeners: RwLock::new(HashMap::new()),
      events_tx: tx,
      events_keepalive: rx.deactivate(),
    }
  }

  /// Register a listener. Returns false if it was already registered.
  pub(crate) fn add(&self, kind: EventKind, listener: Listener) -> bool {
    let mut listeners = self.listeners.write();
    let list = listeners.entry(kind).or_default();
    if list.iter().any(|l| Arc::ptr_eq(l, &listener)) {
      return false;
    }
    list.push(listener);
    true
  }

  /// Unregister a listener. Returns false if it wasn't registered.
  pub(crate) fn remove(&self, kind: EventKind, listener: &Listener) -> bool {
    let mut listeners = self.listeners.write();
    let Some(list) = listeners.get_mut(&kind) else {
      return false;
    };
    let before = list.len();
    list.retain(|l| !Arc::ptr_eq(l, listener));
    before != list.len()
  }

  pub(crate) fn subscribe(&self) -> Receiver<WindowEvent> {
    self.events_keepalive.activate_cloned()
  }

  /// Deliver an event. Listeners run outside the registry lock, so they may
  /// register or remove listeners themselves.
  pub(crate) fn emit(&self, event: &WindowEvent) {
    let listeners: Vec<Listener> = self
      .listeners
      .read()
      .get(&event.kind)
      .cloned()
      .unwrap_or_default();

    log::debug!(
      "{} for {} ({:?}) -> {} listener(s)",
      event.kind.handler_name(),
      event.target.id,
      event.origin,
      listeners.len()
    );
    for listener in &listeners {
      listener(event);
    }

    match self.events_tx.try_broadcast(event.clone()) {
      Ok(None) | Err(TrySendError::Inactive(_)) => {}
      Ok(Some(dropped)) => {
        log::warn!(
          "Event channel full, dropped oldest {} for {}",
          dropped.kind.handler_name(),
          dropped.target.id
        );
      }
      Err(TrySendError::Full(_) | TrySendError::Closed(_)) => {
        log::warn!("Failed to broadcast {}", event.kind.handler_name());
      }
    }
  }
}
