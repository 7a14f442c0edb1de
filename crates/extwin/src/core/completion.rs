/*!
Completion signals for queued operations.

Every mutating call validates and enqueues immediately, then hands back a
`Completion` that settles once the window's queue has run the operation.
Dropping a `Completion` does not cancel the operation.
*/

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::types::{AggregateFailure, WindowError, WindowId, WindowResult};

pub(crate) type Reply = oneshot::Sender<WindowResult<()>>;

type BatchFuture = Pin<Box<dyn Future<Output = WindowResult<()>> + Send>>;

enum State {
  Ready(Option<WindowResult<()>>),
  Waiting {
    id: WindowId,
    rx: oneshot::Receiver<WindowResult<()>>,
  },
  Batch(BatchFuture),
}

/// Resolves to the outcome of a submitted operation.
#[must_use = "a Completion reports whether the operation succeeded"]
pub struct Completion {
  state: State,
}

impl std::fmt::Debug for Completion {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let state = match &self.state {
      State::Ready(_) => "ready",
      State::Waiting { .. } => "waiting",
      State::Batch(_) => "batch",
    };
    f.debug_struct("Completion").field("state", &state).finish()
  }
}

impl Completion {
  /// Already settled.
  pub(crate) const fn ready(result: WindowResult<()>) -> Self {
    Self {
      state: State::Ready(Some(result)),
    }
  }

  pub(crate) const fn failed(error: WindowError) -> Self {
    Self::ready(Err(error))
  }

  /// Pending on a queue reply for `id`.
  pub(crate) fn channel(id: WindowId) -> (Reply, Self) {
    let (tx, rx) = oneshot::channel();
    (
      tx,
      Self {
        state: State::Waiting { id, rx },
      },
    )
  }

  /// Settles once every per-window completion has settled.
  ///
  /// A single target reports its own error; a list reports
  /// `WindowError::Aggregate` naming each failed window.
  pub(crate) fn batch(single: bool, parts: Vec<(WindowId, Completion)>) -> Self {
    let attempted = parts.len();
    let fut = async move {
      let mut failures = Vec::new();
      for (id, part) in parts {
        if let Err(e) = part.await {
          failures.push((id, e));
        }
      }
      if failures.is_empty() {
        return Ok(());
      }
      if single && failures.len() == 1 {
        if let Some((_, e)) = failures.pop() {
          return Err(e);
        }
      }
      Err(WindowError::Aggregate(AggregateFailure {
        attempted,
        failures,
      }))
    };
    Self {
      state: State::Batch(Box::pin(fut)),
    }
  }
}

impl Future for Completion {
  type Output = WindowResult<()>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    match &mut self.get_mut().state {
      State::Ready(result) => Poll::Ready(
        result
          .take()
          .unwrap_or_else(|| Err(WindowError::Internal("completion polled after settling".into()))),
      ),
      State::Waiting { id, rx } => Pin::new(rx)
        .poll(cx)
        .map(|reply| reply.unwrap_or_else(|_| Err(WindowError::Closed(id.clone())))),
      State::Batch(fut) => fut.as_mut().poll(cx),
    }
  }
}
