/*!
Native change ingestion.

Reports from the toolkit run on the window's own queue, ahead of pending
commands, and commit through the same `apply` path as commands do. Only the
event origin differs.
*/

use super::completion::Reply;
use super::sequencer::{Flow, Report, Worker};
use super::store::RecordChange;
use super::Shared;
use crate::bridge::{NativeBridge, NativeChange, NativeEvent};
use crate::types::{
  ChangeOrigin, EventDetails, EventKind, MenuClicked, MenuItemId, WindowError, WindowEvent,
  WindowPatch, WindowResult,
};

impl<B: NativeBridge> Worker<B> {
  pub(super) async fn ingest(&mut self, shared: &Shared<B>, report: Report) -> Flow {
    let Report { event, reply } = report;
    log::trace!("Native {event:?} for {}", self.target.id);
    match event {
      NativeEvent::Closed => {
        self.closed(shared, reply);
        return Flow::Stop;
      }
      NativeEvent::Changed(patch) => {
        reply.send(self.changed(shared, patch)).ok();
      }
      NativeEvent::MenuActivated(item) => {
        reply.send(self.activated(shared, item, false).await).ok();
      }
      NativeEvent::ContextMenuActivated(item) => {
        reply.send(self.activated(shared, item, true).await).ok();
      }
      NativeEvent::ContextMenuClosed => {
        reply.send(self.context_menu_closed(shared)).ok();
      }
    }
    Flow::Continue
  }

  fn closed(&mut self, shared: &Shared<B>, reply: Reply) {
    log::debug!("Window {} closed natively", self.target.id);
    let reason = WindowError::Closed(self.target.id.clone());
    self.finish(shared, &reason, ChangeOrigin::Native, true);
    reply.send(Ok(())).ok();
  }

  fn changed(&self, shared: &Shared<B>, mut patch: WindowPatch) -> WindowResult<()> {
    if patch.bounds.is_some_and(|b| !b.is_finite()) {
      log::warn!(
        "Ignoring non-finite bounds {:?} reported for {}",
        patch.bounds,
        self.target.id
      );
      patch.bounds = None;
    }
    self.commit(shared, patch.into(), ChangeOrigin::Native)
  }

  /// Announce a click, then run the item's role if it has one.
  async fn activated(&self, shared: &Shared<B>, item: MenuItemId, context: bool) -> WindowResult<()> {
    let found = shared.store.with_record(&self.target.id, |r| {
      let menu = if context {
        r.context_menu.as_ref().map(|c| &c.menu)
      } else {
        r.menu.as_ref()
      };
      menu
        .and_then(|m| m.find(item))
        .map(|i| (i.tag.clone(), i.role))
    })?;
    let Some((tag, role)) = found else {
      log::warn!("Unknown menu item {item} activated on {}", self.target.id);
      return Err(WindowError::invalid(format!("no menu item {item}")));
    };

    let kind = if context {
      EventKind::ContextMenuClicked
    } else {
      EventKind::MenuClicked
    };
    let event = WindowEvent::new(kind, self.target.clone(), ChangeOrigin::Native)
      .with_details(EventDetails::MenuClicked(MenuClicked { tag }));
    shared.dispatcher.emit(&event);

    if let Some(role) = role {
      let settled = self
        .native_change(shared, &NativeChange::PerformRole(role))
        .await?;
      self.commit(shared, settled.into(), ChangeOrigin::Native)?;
    }
    Ok(())
  }

  fn context_menu_closed(&self, shared: &Shared<B>) -> WindowResult<()> {
    let open = shared
      .store
      .with_record(&self.target.id, |r| r.context_menu.is_some())?;
    if !open {
      return Ok(());
    }
    let change = RecordChange {
      context_menu: Some(None),
      ..RecordChange::default()
    };
    self.commit(shared, change, ChangeOrigin::Native)
  }
}
