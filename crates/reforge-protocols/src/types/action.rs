//! Recorded user actions and their DOM metadata.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One recorded, semantically meaningful user interaction.
///
/// Produced by the recorder, immutable once created. The `name` tag is the
/// discriminator used in the recorder's JSON wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    Click {
        selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        button: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        click_count: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_info: Option<TargetInfo>,
    },
    Fill {
        selector: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_info: Option<TargetInfo>,
    },
    Press {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        selector: Option<String>,
        key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_info: Option<TargetInfo>,
    },
    Check {
        selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_info: Option<TargetInfo>,
    },
    Uncheck {
        selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_info: Option<TargetInfo>,
    },
    Select {
        selector: String,
        #[serde(default)]
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_info: Option<TargetInfo>,
    },
    Navigate {
        url: String,
    },
    AssertText {
        selector: String,
        expected: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_info: Option<TargetInfo>,
    },
    AssertVisible {
        selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_info: Option<TargetInfo>,
    },
    Screenshot {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    ExtractText {
        selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_info: Option<TargetInfo>,
    },
}

impl Action {
    /// Discriminator name, matching the serialized `name` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::Fill { .. } => "fill",
            Self::Press { .. } => "press",
            Self::Check { .. } => "check",
            Self::Uncheck { .. } => "uncheck",
            Self::Select { .. } => "select",
            Self::Navigate { .. } => "navigate",
            Self::AssertText { .. } => "assertText",
            Self::AssertVisible { .. } => "assertVisible",
            Self::Screenshot { .. } => "screenshot",
            Self::ExtractText { .. } => "extractText",
        }
    }

    /// Selector targeted by this action, if any.
    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::Click { selector, .. }
            | Self::Fill { selector, .. }
            | Self::Check { selector, .. }
            | Self::Uncheck { selector, .. }
            | Self::Select { selector, .. }
            | Self::AssertText { selector, .. }
            | Self::AssertVisible { selector, .. }
            | Self::ExtractText { selector, .. } => Some(selector),
            Self::Press { selector, .. } => selector.as_deref(),
            Self::Navigate { .. } | Self::Screenshot { .. } => None,
        }
    }

    /// DOM metadata captured for the target element, if any.
    pub fn target_info(&self) -> Option<&TargetInfo> {
        match self {
            Self::Click { target_info, .. }
            | Self::Fill { target_info, .. }
            | Self::Press { target_info, .. }
            | Self::Check { target_info, .. }
            | Self::Uncheck { target_info, .. }
            | Self::Select { target_info, .. }
            | Self::AssertText { target_info, .. }
            | Self::AssertVisible { target_info, .. }
            | Self::ExtractText { target_info, .. } => target_info.as_ref(),
            Self::Navigate { .. } | Self::Screenshot { .. } => None,
        }
    }

    /// Whether the recorder emits this kind once per keystroke rather than
    /// once per logical user intent. These kinds go through the debouncer.
    pub fn is_keystroke_kind(&self) -> bool {
        matches!(self, Self::Fill { .. } | Self::Press { .. })
    }
}

/// DOM metadata captured for the element an action targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,

    /// Pixel coordinates at recording time. Never meaningful across page
    /// states; stripped before the action is shown to a model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Alternative XPath expressions for the element.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xpath: Vec<String>,

    /// Truncated outer-HTML sample of the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_html: Option<String>,
}

/// Element size in CSS pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Element position in viewport pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A recorded action together with its originating frame and timing.
///
/// `start_time` is the primary identity component for deduplication: two
/// contexts with the same action kind and start time are the same logical
/// action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionContext {
    /// Frame path from the main frame down to the frame the action ran in.
    #[serde(default)]
    pub frame_path: Vec<String>,

    /// Human-readable description of the action.
    #[serde(default)]
    pub description: String,

    /// Milliseconds since the epoch at which the action started.
    pub start_time: u64,
}

impl ActionContext {
    pub fn new(frame_path: Vec<String>, description: impl Into<String>, start_time: u64) -> Self {
        Self {
            frame_path,
            description: description.into(),
            start_time,
        }
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
