/*!
In-memory native bridge.

Keeps just enough per-window geometry to answer like a real toolkit would:
centering, screen-filling fullscreen and maximize, content-size framing.
Every call is logged for inspection, and failures and latency can be injected.
*/

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use super::{NativeBridge, NativeChange, NativeError, NativeResult, NativeWindow, WindowSpec};
use crate::types::{Bounds, Insets, MenuRole, NativeHandle, WindowPatch};

/// Headless bridge settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessConfig {
  /// Screen area used for centering, fullscreen and maximize.
  pub screen: Bounds,
  /// Insets of framed windows. Frameless windows have none.
  pub frame_insets: Insets,
  /// Delay applied to every call, to widen race windows in tests.
  pub latency: Option<Duration>,
}

impl Default for HeadlessConfig {
  fn default() -> Self {
    Self {
      screen: Bounds::new(0.0, 0.0, 1920.0, 1080.0),
      frame_insets: Insets::title_bar(28.0),
      latency: None,
    }
  }
}

/// A call the bridge received.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
  Create(NativeHandle),
  Destroy(NativeHandle),
  Change(NativeHandle, NativeChange),
}

impl NativeCall {
  pub const fn handle(&self) -> NativeHandle {
    match self {
      Self::Create(h) | Self::Destroy(h) | Self::Change(h, _) => *h,
    }
  }
}

#[derive(Debug, Clone, Copy)]
struct HeadlessWindow {
  bounds: Bounds,
  fullscreen: bool,
  maximized: bool,
  restore: Option<Bounds>,
}

#[derive(Debug, Default)]
struct State {
  windows: HashMap<NativeHandle, HeadlessWindow>,
  calls: Vec<NativeCall>,
  failing: HashSet<NativeHandle>,
  fail_creates: bool,
  in_flight: HashSet<NativeHandle>,
  overlapped: bool,
}

/// Native bridge with no toolkit behind it.
#[derive(Debug, Default)]
pub struct HeadlessBridge {
  config: HeadlessConfig,
  next_handle: AtomicU64,
  state: Mutex<State>,
}

impl HeadlessBridge {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: HeadlessConfig) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  pub const fn config(&self) -> &HeadlessConfig {
    &self.config
  }

  /// Every call received so far, in order.
  pub fn calls(&self) -> Vec<NativeCall> {
    self.state.lock().calls.clone()
  }

  /// Changes received for one window, in order.
  pub fn changes_for(&self, handle: NativeHandle) -> Vec<NativeChange> {
    self
      .state
      .lock()
      .calls
      .iter()
      .filter_map(|call| match call {
        NativeCall::Change(h, change) if *h == handle => Some(change.clone()),
        NativeCall::Change(..) | NativeCall::Create(_) | NativeCall::Destroy(_) => None,
      })
      .collect()
  }

  pub fn clear_calls(&self) {
    self.state.lock().calls.clear();
  }

  /// Make every later call for `handle` fail (or stop failing).
  pub fn set_failing(&self, handle: NativeHandle, failing: bool) {
    let mut state = self.state.lock();
    if failing {
      state.failing.insert(handle);
    } else {
      state.failing.remove(&handle);
    }
  }

  /// Make `create_window` fail.
  pub fn set_fail_creates(&self, fail: bool) {
    self.state.lock().fail_creates = fail;
  }

  /// Whether two calls for the same window were ever in flight at once.
  pub fn overlapped(&self) -> bool {
    self.state.lock().overlapped
  }

  pub fn is_open(&self, handle: NativeHandle) -> bool {
    self.state.lock().windows.contains_key(&handle)
  }

  /// Frame bounds the bridge currently holds for a window.
  pub fn bounds_of(&self, handle: NativeHandle) -> Option<Bounds> {
    self.state.lock().windows.get(&handle).map(|w| w.bounds)
  }

  /// Log the call and mark the window busy. Fails for injected failures.
  fn begin(&self, call: NativeCall) -> NativeResult<()> {
    let handle = call.handle();
    let mut state = self.state.lock();
    state.calls.push(call);
    if !state.in_flight.insert(handle) {
      log::error!("Overlapping native calls for {handle}");
      state.overlapped = true;
    }
    if state.failing.contains(&handle) {
      state.in_flight.remove(&handle);
      return Err(NativeError::new(format!("injected failure for {handle}")));
    }
    Ok(())
  }

  fn end(&self, handle: NativeHandle) {
    self.state.lock().in_flight.remove(&handle);
  }

  async fn delay(&self) {
    if let Some(latency) = self.config.latency {
      tokio::time::sleep(latency).await;
    }
  }

  fn open(&self, spec: &WindowSpec) -> NativeWindow {
    let attrs = &spec.attributes;
    let insets = if attrs.frame {
      self.config.frame_insets
    } else {
      Insets::default()
    };

    let requested = attrs.bounds;
    let mut frame = if spec.use_content_size {
      let grown = requested.outset(insets);
      grown.with_position(requested.position())
    } else {
      requested
    };
    if spec.center || !spec.positioned {
      frame = frame.with_position(frame.centered_in(self.config.screen));
    }

    let filled = attrs.flags.fullscreen || attrs.flags.maximized;
    let handle = NativeHandle(self.next_handle.fetch_add(1, Ordering::Relaxed) + 1);
    let window = HeadlessWindow {
      bounds: if filled { self.config.screen } else { frame },
      fullscreen: attrs.flags.fullscreen,
      maximized: attrs.flags.maximized,
      restore: filled.then_some(frame),
    };
    self.state.lock().windows.insert(handle, window);

    NativeWindow {
      handle,
      bounds: window.bounds,
      insets,
      normal_bounds: window.restore,
    }
  }

  fn settle(&self, handle: NativeHandle, change: &NativeChange) -> NativeResult<WindowPatch> {
    let screen = self.config.screen;
    let mut state = self.state.lock();
    let Some(w) = state.windows.get_mut(&handle) else {
      return Err(NativeError::new(format!("no native window {handle}")));
    };

    let mut settled = WindowPatch::default();
    match change {
      NativeChange::Update { patch, .. } => {
        if let Some(bounds) = patch.bounds {
          w.bounds = bounds;
        }
        let was_filled = w.fullscreen || w.maximized;
        if let Some(fullscreen) = patch.fullscreen {
          w.fullscreen = fullscreen;
        }
        if let Some(maximized) = patch.maximized {
          w.maximized = maximized;
        }
        if (w.fullscreen || w.maximized) && w.bounds != screen {
          if !was_filled {
            w.restore = Some(w.bounds);
          }
          w.bounds = screen;
          settled.bounds = Some(screen);
        } else if was_filled && !w.fullscreen && !w.maximized {
          w.restore = None;
        }
      }
      NativeChange::Center => {
        w.bounds = w.bounds.with_position(w.bounds.centered_in(screen));
        settled.bounds = Some(w.bounds);
      }
      NativeChange::PerformRole(MenuRole::Minimize) => {
        settled.minimized = Some(true);
      }
      NativeChange::PerformRole(MenuRole::ToggleFullscreen) => {
        w.fullscreen = !w.fullscreen;
        settled.fullscreen = Some(w.fullscreen);
        if w.fullscreen {
          w.restore = w.restore.or(Some(w.bounds));
          w.bounds = screen;
        } else if let Some(restore) = w.restore.take() {
          w.bounds = restore;
        }
        settled.bounds = Some(w.bounds);
      }
      NativeChange::PerformRole(_)
      | NativeChange::MoveTop
      | NativeChange::SetParent { .. }
      | NativeChange::SetMenu(_)
      | NativeChange::OpenContextMenu(_)
      | NativeChange::CloseContextMenu => {}
    }
    Ok(settled)
  }
}

impl NativeBridge for HeadlessBridge {
  fn create_window(
    &self,
    spec: &WindowSpec,
  ) -> impl Future<Output = NativeResult<NativeWindow>> + Send {
    async move {
      self.delay().await;
      if self.state.lock().fail_creates {
        return Err(NativeError::new("injected create failure"));
      }
      let window = self.open(spec);
      self.state.lock().calls.push(NativeCall::Create(window.handle));
      log::debug!("Headless window {} opened at {:?}", window.handle, window.bounds);
      Ok(window)
    }
  }

  fn destroy_window(&self, handle: NativeHandle) -> impl Future<Output = NativeResult<()>> + Send {
    async move {
      self.begin(NativeCall::Destroy(handle))?;
      self.delay().await;
      let removed = self.state.lock().windows.remove(&handle);
      self.end(handle);
      removed
        .map(|_| ())
        .ok_or_else(|| NativeError::new(format!("no native window {handle}")))
    }
  }

  fn apply_change(
    &self,
    handle: NativeHandle,
    change: &NativeChange,
  ) -> impl Future<Output = NativeResult<WindowPatch>> + Send {
    async move {
      self.begin(NativeCall::Change(handle, change.clone()))?;
      self.delay().await;
      let settled = self.settle(handle, change);
      self.end(handle);
      settled
    }
  }
}
