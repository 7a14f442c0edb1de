/*!
Window lifecycle: `create()`, `get()`, `query()`, `remove()`, `update()`.
*/

use super::request::UpdateRequest;
use super::sequencer::{self, Command, WindowQueue};
use super::store::WindowRecord;
use super::validation;
use super::{Completion, WindowManager};
use crate::bridge::{NativeBridge, WindowSpec};
use crate::types::{
  Bounds, ChangeOrigin, EventDetails, EventKind, ExtensionId, Size, SizeLimit, Window,
  WindowAttributes, WindowError, WindowEvent, WindowFilter, WindowId, WindowIds, WindowProperties,
  WindowResult, WindowUpdate,
};

/// Fill `$attrs.flags` from the properties that are present.
macro_rules! apply_flags {
  ($props:expr, $attrs:expr, [$($flag:ident),* $(,)?]) => {
    $(
      if let Some(value) = $props.$flag {
        $attrs.flags.$flag = value;
      }
    )*
  };
}

impl<B: NativeBridge> WindowManager<B> {
  /// Open a window owned by `extension`.
  ///
  /// Resolves once the native window exists and `onCreated` has fired. A
  /// parent that is removed while the window is being created is dropped.
  pub async fn create(
    &self,
    extension: &ExtensionId,
    props: WindowProperties,
  ) -> WindowResult<Window> {
    validation::properties(&props)?;
    let parent = match &props.parent {
      Some(p) => Some((p.clone(), self.handle_of(p)?)),
      None => None,
    };

    let spec = WindowSpec {
      extension: extension.clone(),
      attributes: self.resolve_attributes(&props)?,
      positioned: props.position.is_some(),
      center: props.center.unwrap_or(false),
      use_content_size: props.use_content_size.unwrap_or(false),
      parent: parent.as_ref().map(|(_, handle)| *handle),
    };

    let id = WindowId::next();
    let native = self
      .shared
      .bridge
      .create_window(&spec)
      .await
      .map_err(|e| WindowError::NativeFailure {
        id: id.clone(),
        reason: e.message,
      })?;

    let mut attrs = spec.attributes;
    attrs.bounds = native.bounds;
    let record = WindowRecord {
      id: id.clone(),
      extension: extension.clone(),
      handle: native.handle,
      seq: self.shared.store.next_seq(),
      attrs,
      insets: native.insets,
      normal_bounds: native.normal_bounds,
      menu: None,
      context_menu: None,
    };
    let target = record.target();

    let queue = sequencer::spawn(&self.shared, target.clone(), native.handle);
    self.shared.queues.write().insert(id.clone(), queue);
    let window = self
      .shared
      .store
      .insert(record, parent.as_ref().map(|(p, _)| p));

    log::debug!("Created {id} for {extension} (native {})", native.handle);
    let event = WindowEvent::new(EventKind::Created, target, ChangeOrigin::Extension)
      .with_details(EventDetails::Window(Box::new(window.clone())));
    self.shared.dispatcher.emit(&event);
    Ok(window)
  }

  fn resolve_attributes(&self, props: &WindowProperties) -> WindowResult<WindowAttributes> {
    let config = &self.shared.config;
    let size = Size::new(
      props.width.unwrap_or(config.default_size.width),
      props.height.unwrap_or(config.default_size.height),
    );
    let position = props.position.unwrap_or_default();
    let background = props
      .background_color
      .clone()
      .unwrap_or_else(|| config.default_background_color.clone());

    let min_size = SizeLimit::new(props.min_width, props.min_height);
    let max_size = SizeLimit::new(props.max_width, props.max_height);
    let size = SizeLimit::clamp(size, min_size, max_size);

    let mut attrs = WindowAttributes::with_defaults(
      Bounds::new(position.x, position.y, size.width, size.height),
      background,
    );
    attrs.min_size = min_size;
    attrs.max_size = max_size;
    attrs.aspect_ratio = validation::aspect_ratio(props.aspect_ratio)?;
    if let Some(title) = &props.title {
      attrs.title.clone_from(title);
    }
    attrs.icon.clone_from(&props.icon);
    if let Some(opacity) = props.opacity {
      attrs.opacity = opacity;
    }
    attrs.title_buttons_position = props.title_buttons_position;
    attrs.frame = props.frame.unwrap_or(attrs.frame);
    attrs.transparent = props.transparent.unwrap_or(attrs.transparent);
    attrs.title_bar_style = props.title_bar_style;
    attrs.rounded_corners = props.rounded_corners.unwrap_or(attrs.rounded_corners);
    attrs.background_css.clone_from(&props.background_css);

    apply_flags!(props, attrs, [
      resizable, movable, minimizable, maximizable, closable, focusable, always_on_top,
      fullscreenable, fullscreen, skip_taskbar, visible, focused, maximized, minimized, enabled,
      modal, auto_hide_menu, auto_hide_cursor, menu_visible, flashing, shadow, vibrancy,
    ]);
    let flags = &mut attrs.flags;
    if !flags.visible || flags.minimized || !flags.focusable {
      flags.focused = false;
    }
    Ok(attrs)
  }

  /// Snapshot of one window.
  pub fn get(&self, id: &WindowId) -> WindowResult<Window> {
    self.shared.store.get(id)
  }

  /// Windows matching every field present in `filter`, oldest first.
  pub fn query(&self, filter: &WindowFilter) -> Vec<Window> {
    self.shared.store.query(filter)
  }

  /// Close windows. Resolves after `onClosed` and `onRemoved` have fired for
  /// each. Operations still queued behind the removal fail with
  /// `AlreadyRemoved`.
  pub fn remove(&self, ids: impl Into<WindowIds>) -> Completion {
    self.fan_out(ids.into(), WindowQueue::submit_remove)
  }

  /// Apply declared changes to one or more windows.
  ///
  /// The payload is validated once, up front, and a new parent is
  /// cycle-checked for each target before its operation is queued. Each
  /// window then resolves the payload against its own state when its queue
  /// gets to it.
  pub fn update(&self, ids: impl Into<WindowIds>, update: WindowUpdate) -> Completion {
    let store = &self.shared.store;
    let parent = match &update.parent {
      Some(Some(parent)) => {
        if !store.contains(parent) {
          return Completion::failed(WindowError::NotFound(parent.clone()));
        }
        Some(parent.clone())
      }
      Some(None) | None => None,
    };
    let request = match UpdateRequest::from_update(update) {
      Ok(request) => request,
      Err(e) => return Completion::failed(e),
    };
    self.fan_out(ids.into(), |queue| {
      if let Some(parent) = &parent {
        if let Err(e) = store.check_parent(queue.id(), parent) {
          return Completion::failed(e);
        }
      }
      queue.submit(Command::Update(request.clone()))
    })
  }
}
