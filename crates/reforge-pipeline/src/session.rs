//! Per-recording-session enhancement state and dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, warn};

use reforge_config::LLMConfig;
use reforge_protocols::{Action, ActionContext, GenerateOptions, LLMProvider, ProviderError};

use crate::debounce::DebounceEntry;
use crate::keys;
use crate::{codeblock, prompt};

/// In-flight enhancement shared between all callers of one action key.
/// Resolves to `Some(enhanced)` on success and `None` on failure, in which
/// case each caller falls back to its own original code.
pub(crate) type PendingFuture = Shared<BoxFuture<'static, Option<String>>>;

#[derive(Default)]
pub(crate) struct DispatchState {
    /// Enhanced code per action key. Insert on success, never evicted.
    pub(crate) cache: HashMap<String, String>,
    /// At most one in-flight request per action key.
    pub(crate) pending: HashMap<String, PendingFuture>,
}

pub(crate) struct SessionInner {
    pub(crate) provider: Arc<dyn LLMProvider>,
    pub(crate) config: Arc<LLMConfig>,
    pub(crate) state: Mutex<DispatchState>,
    pub(crate) debounce: Mutex<HashMap<String, DebounceEntry>>,
    pub(crate) script_cache: Mutex<HashMap<String, String>>,
}

/// One recording session's enhancement pipeline.
///
/// All state (result cache, pending requests, debounce tracker, script cache)
/// lives inside the session: construct one per recording session and drop it
/// at session end. Cloning is cheap and shares the same state.
#[derive(Clone)]
pub struct EnhancementSession {
    pub(crate) inner: Arc<SessionInner>,
}

impl EnhancementSession {
    pub fn new(provider: Arc<dyn LLMProvider>, config: Arc<LLMConfig>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                provider,
                config,
                state: Mutex::new(DispatchState::default()),
                debounce: Mutex::new(HashMap::new()),
                script_cache: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.config.enhancement.enabled
    }

    /// Enhance one generated code fragment. Total: never fails, worst case
    /// returns `code` unchanged.
    ///
    /// Keystroke-level kinds (fill, press) are debounced and return `code`
    /// immediately; their enhancement lands in the cache once the quiet
    /// period elapses.
    pub async fn enhance_action(
        &self,
        code: &str,
        action: &Action,
        context: &ActionContext,
    ) -> String {
        if !self.is_enabled() {
            return code.to_string();
        }

        if action.is_keystroke_kind() {
            self.record_keystroke(code, action, context);
            return code.to_string();
        }

        let key = keys::action_key(action.kind(), context.start_time);
        self.dispatch(key, code, action, context).await
    }

    /// Cached enhancement for an action key, if one has completed. Debounced
    /// completions are only reachable this way, under
    /// [`keys::completion_key`].
    pub fn cached_enhancement(&self, key: &str) -> Option<String> {
        self.inner.state.lock().cache.get(key).cloned()
    }

    /// Resolve once every currently tracked pending request has settled, or
    /// once the configured budget is spent. A request that never settles
    /// (e.g. a debounce completion that never fired) cannot hang the caller.
    pub async fn wait_for_all_pending(&self) {
        let budget = self.inner.config.enhancement.pending_wait_budget_secs;
        let deadline = Instant::now() + Duration::from_secs(budget);
        loop {
            let pending: Vec<PendingFuture> = {
                let state = self.inner.state.lock();
                state.pending.values().cloned().collect()
            };
            if pending.is_empty() {
                return;
            }
            if timeout_at(deadline, join_all(pending)).await.is_err() {
                warn!(
                    budget_secs = budget,
                    "timed out waiting for pending enhancements"
                );
                return;
            }
        }
    }

    /// Cache/pending/dispatch path shared by direct calls and debounce
    /// completions.
    ///
    /// The cache check, pending check and pending registration happen under
    /// one lock, so concurrent callers for the same key can never issue two
    /// backend calls.
    pub(crate) async fn dispatch(
        &self,
        key: String,
        code: &str,
        action: &Action,
        context: &ActionContext,
    ) -> String {
        let pending = {
            let mut state = self.inner.state.lock();
            if let Some(hit) = state.cache.get(&key) {
                debug!(key = %key, "enhancement cache hit");
                return hit.clone();
            }
            match state.pending.get(&key) {
                Some(in_flight) => in_flight.clone(),
                None => {
                    let fut = self.request_future(
                        key.clone(),
                        code.to_string(),
                        action.clone(),
                        context.clone(),
                    );
                    state.pending.insert(key.clone(), fut.clone());
                    fut
                }
            }
        };

        match pending.await {
            Some(enhanced) => enhanced,
            None => code.to_string(),
        }
    }

    fn request_future(
        &self,
        key: String,
        code: String,
        action: Action,
        context: ActionContext,
    ) -> PendingFuture {
        let session = self.clone();
        async move {
            let result = session.run_request(&code, &action, &context).await;
            let mut state = session.inner.state.lock();
            state.pending.remove(&key);
            match result {
                Ok(enhanced) => {
                    state.cache.insert(key, enhanced.clone());
                    Some(enhanced)
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "enhancement failed, keeping original code");
                    None
                }
            }
        }
        .boxed()
        .shared()
    }

    async fn run_request(
        &self,
        code: &str,
        action: &Action,
        context: &ActionContext,
    ) -> Result<String, ProviderError> {
        let config = &self.inner.config;
        let messages = prompt::action_messages(config, action, context, code);
        if config.debug {
            debug!(kind = action.kind(), prompt = %messages[1].content, "action enhancement prompt");
        }

        let options = GenerateOptions::new()
            .with_temperature(config.enhancement.action_temperature)
            .with_max_tokens(config.enhancement.max_tokens);

        let secs = config.enhancement.action_timeout_secs;
        let response = timeout(
            Duration::from_secs(secs),
            self.inner.provider.generate(&messages, options),
        )
        .await
        .map_err(|_| ProviderError::Timeout(secs))??;

        if config.debug {
            debug!(kind = action.kind(), response = %response, "action enhancement response");
        }

        let enhanced = codeblock::extract_code_block(&response);
        if enhanced.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(enhanced)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
