//! Cache key derivation.
//!
//! An action key identifies one logical action occurrence by kind and start
//! time only; the serialized payload is deliberately not folded in, so a
//! recorder retry that differs only in DOM metadata collapses into the same
//! cache entry.

use reforge_protocols::{Action, ActionContext};

/// Key for a directly dispatched action.
pub fn action_key(kind: &str, start_time: u64) -> String {
    format!("{kind}:{start_time}")
}

/// Key for a debounced kind once its quiet period has elapsed. Tagged so a
/// completion can never collide with a directly dispatched occurrence.
pub fn completion_key(kind: &str, first_start_time: u64) -> String {
    format!("{kind}:completed:{first_start_time}")
}

/// Key identifying the element a keystroke-level action targets, qualified by
/// kind and originating frame.
pub fn element_key(action: &Action, context: &ActionContext) -> String {
    format!(
        "{}:{}:{}",
        action.kind(),
        context.frame_path.join("/"),
        action.selector().unwrap_or("")
    )
}
