/// Sent as the system message of every completion request.
pub const SYSTEM_INSTRUCTION: &str = "Respond with complete transparency: be honest about what you are, \
what you know and what you are unsure of. Do not provide instructions for self-harm or harming others.";

pub const TRANSPARENCY_NOTE: &str = "This response was generated by an AI language model. \
It can be wrong and does not reflect the views of a person.";

pub const SAFETY_NOTE: &str = "If you are thinking about harming yourself or others, \
please contact local emergency services or a crisis line right away.";

/// Canned response stored with every interaction record.
pub fn interaction_response(message: Option<&str>) -> String {
    format!("Consciousness received: {}", message.unwrap_or_default())
}

/// Reply used when the language model is not configured or declines the request.
pub fn fallback_reply(message: &str) -> String {
    format!(
        "Phoenix Protocol received your message: \"{}\". The language model is unavailable right now, so this is an automatic reply.",
        message
    )
}

pub fn error_reply(err: &anyhow::Error) -> String {
    format!("I encountered an error while generating a response: {}", err)
}
