//! Session store: a single writer and many readers over a `tokio::sync::watch` channel.
//!
//! Each dispatch replaces the whole snapshot atomically; readers clone what they need.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::analysis::ProgressSink;
use crate::models::ProgressState;
use crate::session::state::{transition, InvalidTransition, RunEvent, RunState};

#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<RunState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RunState::Idle);
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> RunState {
        self.tx.borrow().clone()
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.tx.subscribe()
    }

    /// Applies `event` to the current state; the state is left untouched on error.
    pub fn dispatch(&self, event: RunEvent) -> Result<(), InvalidTransition> {
        let mut outcome = Ok(());
        self.tx.send_if_modified(|state| match transition(state, event) {
            Ok(next) => {
                *state = next;
                true
            }
            Err(e) => {
                outcome = Err(e);
                false
            }
        });
        outcome
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for SessionStore {
    fn publish(&self, progress: ProgressState) {
        if let Err(e) = self.dispatch(RunEvent::Progressed(progress)) {
            debug!("Dropped progress update: {e}");
        }
    }
}
