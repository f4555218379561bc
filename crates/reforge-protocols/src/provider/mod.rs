//! LLM provider contract.

mod options;
mod traits;

pub use options::GenerateOptions;
pub use traits::LLMProvider;
