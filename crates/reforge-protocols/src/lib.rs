//! Shared types and contracts for the reforge enhancement pipeline.
//!
//! This crate defines the recorded-action data model, the chat message types
//! exchanged with LLM backends, and the [`provider::LLMProvider`] trait that
//! every backend implements.

pub mod error;
pub mod provider;
pub mod types;

pub use error::ProviderError;
pub use provider::{GenerateOptions, LLMProvider};
pub use types::{Action, ActionContext, Dimensions, Message, MessageRole, Position, TargetInfo};
