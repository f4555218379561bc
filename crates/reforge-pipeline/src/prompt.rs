//! Prompt assembly from configured templates.

use reforge_config::LLMConfig;
use reforge_protocols::{Action, ActionContext, Message};

use crate::sanitize::sanitize_action;

/// Substitute named `{{placeholder}}` points in a template.
pub(crate) fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in substitutions {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

/// Build the system and user messages for a per-action enhancement call.
pub(crate) fn action_messages(
    config: &LLMConfig,
    action: &Action,
    context: &ActionContext,
    code: &str,
) -> Vec<Message> {
    let sanitized = sanitize_action(action);

    let mut element_context = sanitized.element_context;
    if !context.description.is_empty() {
        element_context.push_str("\nDescription: ");
        element_context.push_str(&context.description);
    }
    if !context.frame_path.is_empty() {
        element_context.push_str("\nFrame: ");
        element_context.push_str(&context.frame_path.join(" > "));
    }

    let user = render(
        &config.prompts.action_user,
        &[
            ("actionData", sanitized.action_json.as_str()),
            ("elementContext", element_context.as_str()),
            ("generatedCode", code),
        ],
    );

    vec![
        Message::system(config.prompts.action_system.clone()),
        Message::user(user),
    ]
}

/// Build the system and user messages for the whole-script call.
pub(crate) fn script_messages(config: &LLMConfig, script: &str) -> Vec<Message> {
    let user = render(&config.prompts.script_user, &[("completeScript", script)]);
    vec![
        Message::system(config.prompts.script_system.clone()),
        Message::user(user),
    ]
}
