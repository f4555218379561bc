//! Action payload sanitization before prompting.
//!
//! Pixel coordinates are stripped entirely: they are not meaningful across
//! page states and must never appear in suggested code. DOM metadata is split
//! into a free-text "Element Information" summary and a JSON remainder; the
//! fields surfaced in the summary are removed from the JSON so nothing is
//! duplicated.

use serde_json::Value;

use reforge_protocols::Action;

/// Fields of the target metadata that the free-text summary covers.
const SUMMARIZED_FIELDS: &[&str] = &["tagName", "classes", "attributes", "xpath", "outerHtml"];

/// Sanitized view of an action, ready for template substitution.
#[derive(Debug, Clone)]
pub struct SanitizedAction {
    /// Pretty-printed JSON of the action with position data stripped and
    /// summarized metadata removed.
    pub action_json: String,

    /// Free-text element summary built from the target metadata.
    pub element_context: String,
}

/// Prepare an action for use as LLM context.
pub fn sanitize_action(action: &Action) -> SanitizedAction {
    let mut value = serde_json::to_value(action).unwrap_or(Value::Null);
    let mut element_context = String::from("No element information recorded.");

    if let Some(obj) = value.as_object_mut() {
        if let Some(info) = obj.get_mut("targetInfo").and_then(Value::as_object_mut) {
            element_context = summarize_target(info);
            info.remove("position");
            for field in SUMMARIZED_FIELDS {
                info.remove(*field);
            }
        }
        // Drop an emptied-out metadata object entirely.
        if obj
            .get("targetInfo")
            .and_then(Value::as_object)
            .is_some_and(|info| info.is_empty())
        {
            obj.remove("targetInfo");
        }
    }

    let action_json =
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());

    SanitizedAction {
        action_json,
        element_context,
    }
}

fn summarize_target(info: &serde_json::Map<String, Value>) -> String {
    let mut lines = Vec::new();

    if let Some(tag) = info.get("tagName").and_then(Value::as_str) {
        lines.push(format!("Tag: {tag}"));
    }

    if let Some(classes) = info.get("classes").and_then(Value::as_array) {
        let names: Vec<&str> = classes.iter().filter_map(Value::as_str).collect();
        if !names.is_empty() {
            lines.push(format!("Classes: {}", names.join(", ")));
        }
    }

    if let Some(attributes) = info.get("attributes").and_then(Value::as_object) {
        let mut pairs: Vec<String> = attributes
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| format!("{k}=\"{v}\"")))
            .collect();
        if !pairs.is_empty() {
            pairs.sort();
            lines.push(format!("Attributes: {}", pairs.join(", ")));
        }
    }

    if let Some(xpath) = info.get("xpath").and_then(Value::as_array) {
        let variants: Vec<&str> = xpath.iter().filter_map(Value::as_str).collect();
        if !variants.is_empty() {
            lines.push(format!("XPath variants: {}", variants.join(" | ")));
        }
    }

    if let Some(html) = info.get("outerHtml").and_then(Value::as_str) {
        lines.push(format!("Outer HTML: {html}"));
    }

    if lines.is_empty() {
        "No element information recorded.".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
