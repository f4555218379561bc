//! Enhancement pipeline: the stateful stage between the deterministic code
//! generator and an LLM backend.
//!
//! The pipeline memoizes enhancement results per logical action, joins
//! concurrent requests for the same action, debounces keystroke-level action
//! kinds, and gates a single whole-script rewrite behind a barrier plus a
//! structural safety check. Its entry points are total: on any internal
//! failure they return their input unchanged, so enhancement can never break
//! code generation.

mod codeblock;
mod debounce;
pub mod keys;
mod prompt;
mod safety;
mod sanitize;
mod script;
mod session;

pub use codeblock::extract_code_block;
pub use safety::rewrite_is_safe;
pub use sanitize::{sanitize_action, SanitizedAction};
pub use session::EnhancementSession;
