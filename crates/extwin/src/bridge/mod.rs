/*!
Native bridge abstraction.

The bridge is the contract between the core and a real windowing toolkit.
Core code only talks to windows through this trait; toolkit-specific code
implements it.

Unsolicited changes (user resized a window, OS closed it) flow the other way,
through [`WindowManager::on_native_event`](crate::WindowManager::on_native_event).

- `headless.rs` - in-memory bridge for tests and the demo host
*/

mod headless;

pub use headless::{HeadlessBridge, HeadlessConfig, NativeCall};

use std::future::Future;

use crate::menu::{ContextMenu, Menu};
use crate::types::{
  Bounds, ExtensionId, Insets, MenuItemId, MenuRole, NativeHandle, WindowAttributes, WindowPatch,
};

/// Everything the toolkit needs to open a window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
  pub extension: ExtensionId,
  /// Resolved attributes. `bounds` is the requested frame, or the requested
  /// content area when `use_content_size` is set.
  pub attributes: WindowAttributes,
  /// Whether the caller gave an explicit position.
  pub positioned: bool,
  pub center: bool,
  pub use_content_size: bool,
  pub parent: Option<NativeHandle>,
}

/// A window the toolkit created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeWindow {
  pub handle: NativeHandle,
  /// Frame bounds the toolkit settled on.
  pub bounds: Bounds,
  /// Frame-to-content insets.
  pub insets: Insets,
  /// Geometry to restore to, when the window opened fullscreen or maximized.
  pub normal_bounds: Option<Bounds>,
}

/// A change the core asks the toolkit to make.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeChange {
  /// Apply field changes. `animate` is a hint for bounds transitions.
  Update { patch: WindowPatch, animate: bool },
  Center,
  MoveTop,
  SetParent {
    parent: Option<NativeHandle>,
    modal: bool,
  },
  /// Replace (`Some`) or remove (`None`) the application menu.
  SetMenu(Option<Menu>),
  OpenContextMenu(ContextMenu),
  CloseContextMenu,
  /// Run a role's built-in action.
  PerformRole(MenuRole),
}

/// A change the toolkit reports on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
  /// State changed outside the core's control.
  Changed(WindowPatch),
  MenuActivated(MenuItemId),
  ContextMenuActivated(MenuItemId),
  /// The open context menu was dismissed.
  ContextMenuClosed,
  /// The window is gone.
  Closed,
}

/// Toolkit failure, surfaced to callers as `WindowError::NativeFailure`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct NativeError {
  pub message: String,
}

impl NativeError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

pub type NativeResult<T> = Result<T, NativeError>;

/// Operations on native windows.
///
/// The core never issues two calls for the same handle concurrently. Calls for
/// different handles may overlap.
pub trait NativeBridge: Send + Sync + 'static {
  /// Open a window.
  fn create_window(&self, spec: &WindowSpec)
    -> impl Future<Output = NativeResult<NativeWindow>> + Send;

  /// Close and release a window.
  fn destroy_window(&self, handle: NativeHandle) -> impl Future<Output = NativeResult<()>> + Send;

  /// Apply a change. Completes once the toolkit has settled, including any
  /// animation. Returns state the toolkit derived on top of the request (the
  /// bounds a `Center` landed on, the screen-filling bounds of `fullscreen`).
  fn apply_change(
    &self,
    handle: NativeHandle,
    change: &NativeChange,
  ) -> impl Future<Output = NativeResult<WindowPatch>> + Send;
}
