//! Debouncing for keystroke-level action kinds.
//!
//! Fill and press actions arrive once per keystroke. Each occurrence
//! overwrites the tracker entry for its element and restarts the quiet-period
//! timer; only the occurrence that survives a full quiet period is treated as
//! final and dispatched for enhancement. The entry is an explicit state
//! machine: present means pending-completion, absent means idle, and a
//! generation counter decides whether a fired timer still speaks for the
//! latest occurrence.

use std::collections::hash_map::Entry;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use reforge_protocols::{Action, ActionContext};

use crate::keys;
use crate::session::EnhancementSession;

pub(crate) struct DebounceEntry {
    /// Start time of the first occurrence; the completion is keyed to it.
    pub(crate) first_start_time: u64,
    /// Bumped on every newer occurrence. A fired timer with a stale
    /// generation is a no-op.
    pub(crate) generation: u64,
    pub(crate) action: Action,
    pub(crate) context: ActionContext,
    pub(crate) code: String,
    pub(crate) timer: Option<JoinHandle<()>>,
}

impl EnhancementSession {
    /// Record one keystroke-level occurrence. Returns immediately; the caller
    /// keeps its original code. Must run inside a tokio runtime.
    pub(crate) fn record_keystroke(&self, code: &str, action: &Action, context: &ActionContext) {
        let quiet_ms = match action {
            Action::Fill { .. } => self.inner.config.enhancement.fill_quiet_period_ms,
            _ => self.inner.config.enhancement.press_quiet_period_ms,
        };
        let element_key = keys::element_key(action, context);

        let mut tracker = self.inner.debounce.lock();
        let generation = match tracker.entry(element_key.clone()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.generation += 1;
                entry.action = action.clone();
                entry.context = context.clone();
                entry.code = code.to_string();
                // Superseded timer; aborting it is an optimization only, a
                // stale fire is already a generation-mismatch no-op.
                if let Some(timer) = entry.timer.take() {
                    timer.abort();
                }
                entry.generation
            }
            Entry::Vacant(vacant) => {
                vacant.insert(DebounceEntry {
                    first_start_time: context.start_time,
                    generation: 0,
                    action: action.clone(),
                    context: context.clone(),
                    code: code.to_string(),
                    timer: None,
                });
                0
            }
        };

        let session = self.clone();
        let key = element_key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(quiet_ms)).await;
            session.complete_if_settled(&key, generation).await;
        });
        if let Some(entry) = tracker.get_mut(&element_key) {
            entry.timer = Some(handle);
        }
    }

    /// Quiet-period check. Dispatches the completion when no newer occurrence
    /// has arrived; the result is cached only, no live caller receives it.
    async fn complete_if_settled(&self, element_key: &str, generation: u64) {
        let entry = {
            let mut tracker = self.inner.debounce.lock();
            match tracker.get(element_key) {
                Some(entry) if entry.generation == generation => tracker.remove(element_key),
                _ => None,
            }
        };
        let Some(entry) = entry else {
            return;
        };

        debug!(element = element_key, "keystroke input settled, dispatching enhancement");
        let key = keys::completion_key(entry.action.kind(), entry.first_start_time);
        let _ = self
            .dispatch(key, &entry.code, &entry.action, &entry.context)
            .await;
    }
}
