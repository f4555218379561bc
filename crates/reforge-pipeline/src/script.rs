//! Whole-script enhancement gate.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use reforge_protocols::GenerateOptions;

use crate::session::EnhancementSession;
use crate::{codeblock, prompt, safety};

impl EnhancementSession {
    /// Enhance the fully assembled script. Total: on any failure, or when the
    /// rewrite fails the structural safety check, the original script is
    /// returned unchanged.
    ///
    /// Waits for all pending per-action work first, so the whole-script call
    /// is strictly ordered after per-action settlement.
    pub async fn enhance_complete_script(&self, script: &str) -> String {
        if !self.is_enabled() {
            return script.to_string();
        }

        self.wait_for_all_pending().await;

        let hash = blake3::hash(script.as_bytes()).to_hex().to_string();
        if let Some(hit) = self.inner.script_cache.lock().get(&hash) {
            debug!("script enhancement cache hit");
            return hit.clone();
        }

        let config = &self.inner.config;
        let messages = prompt::script_messages(config, script);
        if config.debug {
            debug!(prompt = %messages[1].content, "script enhancement prompt");
        }

        let options = GenerateOptions::new()
            .with_temperature(config.enhancement.script_temperature)
            .with_max_tokens(config.enhancement.max_tokens);

        let secs = config.enhancement.script_timeout_secs;
        let response = match timeout(
            Duration::from_secs(secs),
            self.inner.provider.generate(&messages, options),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                warn!(error = %err, "script enhancement failed, keeping original script");
                return script.to_string();
            }
            Err(_) => {
                warn!(timeout_secs = secs, "script enhancement timed out, keeping original script");
                return script.to_string();
            }
        };

        let rewritten = codeblock::extract_code_block(&response);
        if rewritten.is_empty() {
            warn!("script enhancement returned an empty rewrite, keeping original script");
            return script.to_string();
        }

        let threshold = config.enhancement.safety_threshold;
        if !safety::rewrite_is_safe(script, &rewritten, threshold) {
            // Policy decision, not an error: the rewrite dropped operations.
            debug!(threshold, "rewritten script regressed operation counts, keeping original");
            return script.to_string();
        }

        self.inner
            .script_cache
            .lock()
            .insert(hash, rewritten.clone());
        rewritten
    }
}
