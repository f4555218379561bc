//! Fenced code block extraction from model responses.

use std::sync::OnceLock;

use regex::Regex;

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[a-zA-Z0-9_+\-]*\r?\n(.*?)```").unwrap())
}

/// Extract the first fenced code block from a response; if the response has
/// no fence, the whole response is used. The result is trimmed either way.
pub fn extract_code_block(response: &str) -> String {
    match fence_regex().captures(response) {
        Some(caps) => caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        None => response.trim().to_string(),
    }
}
