//! Data types shared across the pipeline.

mod action;
mod message;

pub use action::{Action, ActionContext, Dimensions, Position, TargetInfo};
pub use message::{Message, MessageRole};
