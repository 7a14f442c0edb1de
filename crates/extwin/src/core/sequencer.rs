/*!
Per-window command sequencer.

Each window owns a worker task that runs its operations one at a time, in
submission order. Operations on different windows run concurrently; the
native bridge never sees two calls for the same handle in flight.

The worker serves two channels: queued commands from the facade, and native
reports. Native reports are preferred, so a command always resolves against
the freshest state the toolkit has told us about.
*/

use std::sync::{Arc, OnceLock, Weak};

use tokio::sync::mpsc;

use super::completion::{Completion, Reply};
use super::request::UpdateRequest;
use super::store::RecordChange;
use super::Shared;
use crate::bridge::{NativeBridge, NativeChange, NativeError, NativeEvent};
use crate::menu::{ContextMenu, Menu};
use crate::types::{
  ChangeOrigin, EventDetails, EventKind, NativeHandle, Window, WindowError, WindowEvent, WindowId,
  WindowPatch, WindowRef, WindowResult,
};

/// A queued command.
#[derive(Debug)]
pub(crate) enum Command {
  Update(UpdateRequest),
  Center,
  MoveTop,
  SetMenu(Option<Menu>),
  OpenContextMenu(ContextMenu),
  CloseContextMenu,
}

pub(super) enum Op {
  Run(Command, Reply),
  Remove(Reply),
}

pub(super) struct Report {
  pub(super) event: NativeEvent,
  pub(super) reply: Reply,
}

/// Submission side of a window's queue.
#[derive(Debug)]
pub(crate) struct WindowQueue {
  id: WindowId,
  ops: mpsc::UnboundedSender<Op>,
  native: mpsc::UnboundedSender<Report>,
  /// Why the queue stopped, once it has.
  stopped: OnceLock<WindowError>,
}

impl std::fmt::Debug for Op {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Run(command, _) => f.debug_tuple("Run").field(command).finish(),
      Self::Remove(_) => f.write_str("Remove"),
    }
  }
}

impl std::fmt::Debug for Report {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Report").field("event", &self.event).finish_non_exhaustive()
  }
}

impl WindowQueue {
  pub(crate) const fn id(&self) -> &WindowId {
    &self.id
  }

  pub(crate) fn submit(&self, command: Command) -> Completion {
    let (reply, completion) = Completion::channel(self.id.clone());
    log::trace!("Queue {} <- {command:?}", self.id);
    if let Err(mpsc::error::SendError(op)) = self.ops.send(Op::Run(command, reply)) {
      self.refuse(op);
    }
    completion
  }

  pub(crate) fn submit_remove(&self) -> Completion {
    let (reply, completion) = Completion::channel(self.id.clone());
    if let Err(mpsc::error::SendError(op)) = self.ops.send(Op::Remove(reply)) {
      self.refuse(op);
    }
    completion
  }

  pub(crate) fn report(&self, event: NativeEvent) -> Completion {
    let (reply, completion) = Completion::channel(self.id.clone());
    if let Err(mpsc::error::SendError(report)) = self.native.send(Report { event, reply }) {
      report.reply.send(Err(self.stop_reason())).ok();
    }
    completion
  }

  fn refuse(&self, op: Op) {
    let reply = match op {
      Op::Run(_, reply) | Op::Remove(reply) => reply,
    };
    reply.send(Err(self.stop_reason())).ok();
  }

  fn stop_reason(&self) -> WindowError {
    self
      .stopped
      .get()
      .cloned()
      .unwrap_or_else(|| WindowError::AlreadyRemoved(self.id.clone()))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
  Continue,
  Stop,
}

/// Parent edge replaced by an in-progress update.
#[derive(Debug)]
struct Relink {
  previous: Option<WindowId>,
  modal: bool,
}

enum Next {
  Native(Report),
  Op(Op),
}

/// Receiving side of a window's queue. Runs on the manager's runtime.
pub(super) struct Worker<B> {
  shared: Weak<Shared<B>>,
  queue: Weak<WindowQueue>,
  pub(super) target: WindowRef,
  pub(super) handle: NativeHandle,
  ops: mpsc::UnboundedReceiver<Op>,
  native: mpsc::UnboundedReceiver<Report>,
}

/// Start the worker for a new window and return its queue.
pub(super) fn spawn<B: NativeBridge>(
  shared: &Arc<Shared<B>>,
  target: WindowRef,
  handle: NativeHandle,
) -> Arc<WindowQueue> {
  let (ops_tx, ops_rx) = mpsc::unbounded_channel();
  let (native_tx, native_rx) = mpsc::unbounded_channel();
  let queue = Arc::new(WindowQueue {
    id: target.id.clone(),
    ops: ops_tx,
    native: native_tx,
    stopped: OnceLock::new(),
  });
  let worker = Worker {
    shared: Arc::downgrade(shared),
    queue: Arc::downgrade(&queue),
    target,
    handle,
    ops: ops_rx,
    native: native_rx,
  };
  shared.runtime.spawn(worker.run());
  queue
}

impl<B: NativeBridge> Worker<B> {
  async fn run(mut self) {
    log::debug!("Queue for {} started", self.target.id);
    loop {
      let next = tokio::select! {
        biased;
        Some(report) = self.native.recv() => Next::Native(report),
        Some(op) = self.ops.recv() => Next::Op(op),
        else => break,
      };
      let Some(shared) = self.shared.upgrade() else {
        break;
      };
      let flow = match next {
        Next::Native(report) => self.ingest(&shared, report).await,
        Next::Op(op) => self.execute(&shared, op).await,
      };
      if flow == Flow::Stop {
        break;
      }
    }
    log::debug!("Queue for {} stopped", self.target.id);
  }

  async fn execute(&mut self, shared: &Shared<B>, op: Op) -> Flow {
    match op {
      Op::Remove(reply) => self.remove(shared, reply).await,
      Op::Run(command, reply) => {
        let result = self.run_command(shared, command).await;
        if let Err(e) = &result {
          log::debug!("Operation on {} failed: {e}", self.target.id);
        }
        reply.send(result).ok();
        Flow::Continue
      }
    }
  }

  async fn run_command(&self, shared: &Shared<B>, command: Command) -> WindowResult<()> {
    match command {
      Command::Update(request) => self.update(shared, &request).await,
      Command::Center => {
        let settled = self.native_change(shared, &NativeChange::Center).await?;
        self.commit(shared, settled.into(), ChangeOrigin::Extension)
      }
      Command::MoveTop => {
        let settled = self.native_change(shared, &NativeChange::MoveTop).await?;
        self.commit(shared, settled.into(), ChangeOrigin::Extension)
      }
      Command::SetMenu(menu) => {
        let change = NativeChange::SetMenu(menu.clone());
        let settled = self.native_change(shared, &change).await?;
        let change = RecordChange {
          patch: settled,
          menu: Some(menu),
          ..RecordChange::default()
        };
        self.commit(shared, change, ChangeOrigin::Extension)
      }
      Command::OpenContextMenu(context_menu) => {
        let change = NativeChange::OpenContextMenu(context_menu.clone());
        let settled = self.native_change(shared, &change).await?;
        let change = RecordChange {
          patch: settled,
          context_menu: Some(Some(context_menu)),
          ..RecordChange::default()
        };
        self.commit(shared, change, ChangeOrigin::Extension)
      }
      Command::CloseContextMenu => {
        let open = shared
          .store
          .with_record(&self.target.id, |r| r.context_menu.is_some())?;
        if !open {
          return Ok(());
        }
        let settled = self
          .native_change(shared, &NativeChange::CloseContextMenu)
          .await?;
        let change = RecordChange {
          patch: settled,
          context_menu: Some(None),
          ..RecordChange::default()
        };
        self.commit(shared, change, ChangeOrigin::Extension)
      }
    }
  }

  /// Resolve against the current record, then parent, then fields, then
  /// centering. The fields commit once, after every native step succeeded;
  /// a failed step undoes the steps before it.
  async fn update(&self, shared: &Shared<B>, request: &UpdateRequest) -> WindowResult<()> {
    let id = &self.target.id;
    let patch = shared.store.with_record(id, |r| request.resolve(r))??;

    let relinked = match &request.parent {
      Some(parent) => self.reparent(shared, parent.clone()).await?,
      None => None,
    };

    let committed = match self.apply_fields(shared, patch, request).await {
      Ok(committed) => committed,
      Err(e) => {
        if let Some(link) = relinked {
          self.unlink(shared, link).await;
        }
        return Err(e);
      }
    };
    if committed.is_empty() {
      return Ok(());
    }
    self.commit(shared, committed.into(), ChangeOrigin::Extension)
  }

  /// Send the field changes and centering to the toolkit. Returns what to
  /// commit. Nothing is written to the store here.
  async fn apply_fields(
    &self,
    shared: &Shared<B>,
    patch: WindowPatch,
    request: &UpdateRequest,
  ) -> WindowResult<WindowPatch> {
    let mut committed = WindowPatch::default();
    if !patch.is_empty() {
      let change = NativeChange::Update {
        patch: patch.clone(),
        animate: request.animate,
      };
      let settled = self.native_change(shared, &change).await?;
      committed = patch;
      committed.merge(settled);
    }

    if request.center {
      match self.native_change(shared, &NativeChange::Center).await {
        Ok(settled) => committed.merge(settled),
        Err(e) => {
          if !committed.is_empty() {
            self.revert_fields(shared, &committed).await;
          }
          return Err(e);
        }
      }
    }
    Ok(committed)
  }

  /// Put the toolkit back to the recorded values of the fields in `sent`.
  async fn revert_fields(&self, shared: &Shared<B>, sent: &WindowPatch) {
    let id = &self.target.id;
    let previous = match shared.store.with_record(id, |r| sent.current_values(&r.attrs)) {
      Ok(previous) => previous,
      Err(e) => {
        log::error!("Cannot revert fields of {id}: {e}");
        return;
      }
    };
    let change = NativeChange::Update {
      patch: previous,
      animate: false,
    };
    if let Err(e) = self.native_change(shared, &change).await {
      log::error!("Failed to revert fields of {id}: {e}");
    }
  }

  /// Link in the store first so a concurrent cycle check sees the new edge,
  /// then tell the toolkit. Restores the previous edge if the toolkit fails.
  ///
  /// Returns the edge to restore should a later step of the same operation
  /// fail, or `None` when the parent was already `parent`.
  async fn reparent(
    &self,
    shared: &Shared<B>,
    parent: Option<WindowId>,
  ) -> WindowResult<Option<Relink>> {
    let id = &self.target.id;
    if let Some(p) = &parent {
      shared.store.check_parent(id, p)?;
    }
    let previous = shared.store.parent_of(id);
    if previous == parent {
      return Ok(None);
    }

    let modal = shared.store.with_record(id, |r| r.attrs.flags.modal)?;
    let parent_handle = match &parent {
      Some(p) => Some(shared.store.with_record(p, |r| r.handle)?),
      None => None,
    };

    let link = RecordChange {
      parent: Some(parent.clone()),
      ..RecordChange::default()
    };
    shared.store.apply(id, link)?;

    let relink = Relink { previous, modal };
    let change = NativeChange::SetParent {
      parent: parent_handle,
      modal: modal && parent.is_some(),
    };
    if let Err(e) = self.native_change(shared, &change).await {
      self.restore_link(shared, &relink);
      return Err(e);
    }
    Ok(Some(relink))
  }

  /// Undo a reparent the toolkit already accepted.
  async fn unlink(&self, shared: &Shared<B>, relink: Relink) {
    let id = &self.target.id;
    self.restore_link(shared, &relink);
    let parent = shared.store.parent_of(id);
    let parent_handle = parent
      .as_ref()
      .and_then(|p| shared.store.with_record(p, |r| r.handle).ok());
    let change = NativeChange::SetParent {
      parent: parent_handle,
      modal: relink.modal && parent_handle.is_some(),
    };
    if let Err(e) = self.native_change(shared, &change).await {
      log::error!("Failed to restore native parent of {id}: {e}");
    }
  }

  fn restore_link(&self, shared: &Shared<B>, relink: &Relink) {
    let id = &self.target.id;
    // The previous parent may have been removed in the meantime.
    let previous = relink
      .previous
      .clone()
      .filter(|p| shared.store.contains(p));
    let restore = RecordChange {
      patch: WindowPatch {
        modal: Some(relink.modal && previous.is_some()),
        ..WindowPatch::default()
      },
      parent: Some(previous),
      ..RecordChange::default()
    };
    if let Err(e) = shared.store.apply(id, restore) {
      log::error!("Failed to restore parent of {id}: {e}");
    }
  }

  async fn remove(&mut self, shared: &Shared<B>, reply: Reply) -> Flow {
    if let Err(e) = shared.bridge.destroy_window(self.handle).await {
      log::warn!("Failed to destroy {}: {e}", self.target.id);
      reply.send(Err(self.native_failure(e))).ok();
      return Flow::Continue;
    }
    let reason = WindowError::AlreadyRemoved(self.target.id.clone());
    self.finish(shared, &reason, ChangeOrigin::Extension, false);
    reply.send(Ok(())).ok();
    Flow::Stop
  }

  /// Tear the window down: refuse new work, fail what is queued, delete the
  /// record, then announce the removal.
  ///
  /// With `removes_succeed`, queued removals resolve successfully since the
  /// window is gone either way.
  pub(super) fn finish(
    &mut self,
    shared: &Shared<B>,
    reason: &WindowError,
    origin: ChangeOrigin,
    removes_succeed: bool,
  ) {
    let id = self.target.id.clone();
    shared.queues.write().remove(&id);
    if let Some(queue) = self.queue.upgrade() {
      queue.stopped.set(reason.clone()).ok();
    }
    self.ops.close();
    self.native.close();

    let mut drained = 0_usize;
    while let Ok(op) = self.ops.try_recv() {
      drained += 1;
      match op {
        Op::Remove(reply) if removes_succeed => {
          reply.send(Ok(())).ok();
        }
        Op::Remove(reply) | Op::Run(_, reply) => {
          reply.send(Err(reason.clone())).ok();
        }
      }
    }
    while let Ok(report) = self.native.try_recv() {
      drained += 1;
      report.reply.send(Err(reason.clone())).ok();
    }
    if drained > 0 {
      log::debug!("Dropped {drained} pending operation(s) for {id}");
    }

    match shared.store.delete(&id) {
      Ok(window) => self.announce_removal(shared, window, origin),
      Err(e) => log::error!("Record for {id} vanished before removal: {e}"),
    }
  }

  fn announce_removal(&self, shared: &Shared<B>, window: Window, origin: ChangeOrigin) {
    shared
      .dispatcher
      .emit(&WindowEvent::new(EventKind::Closed, self.target.clone(), origin));
    let removed = WindowEvent::new(EventKind::Removed, self.target.clone(), origin)
      .with_details(EventDetails::Window(Box::new(window)));
    shared.dispatcher.emit(&removed);
  }

  pub(super) async fn native_change(
    &self,
    shared: &Shared<B>,
    change: &NativeChange,
  ) -> WindowResult<WindowPatch> {
    shared
      .bridge
      .apply_change(self.handle, change)
      .await
      .map_err(|e| self.native_failure(e))
  }

  fn native_failure(&self, e: NativeError) -> WindowError {
    WindowError::NativeFailure {
      id: self.target.id.clone(),
      reason: e.message,
    }
  }

  /// Write to the store and emit the transitions it caused.
  pub(super) fn commit(
    &self,
    shared: &Shared<B>,
    change: RecordChange,
    origin: ChangeOrigin,
  ) -> WindowResult<()> {
    let transitions = shared.store.apply(&self.target.id, change)?;
    for kind in transitions {
      shared
        .dispatcher
        .emit(&WindowEvent::new(kind, self.target.clone(), origin));
    }
    Ok(())
  }
}
