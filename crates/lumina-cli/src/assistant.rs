//! Assistant boundary: question answering over one post's body.
//!
//! The contract is "never raises": whatever goes wrong — no key, transport
//! failure, API error, empty candidate — the caller gets a displayable
//! string back. The state machine and the chat overlay never see an error
//! value from this module.

use lumina_core::config::LuminaConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Advisory shown when no API key is configured anywhere.
pub const UNCONFIGURED_REPLY: &str =
    "Please configure LUMINA_API_KEY (or GEMINI_API_KEY) to use the assistant.";

/// Apology shown for any transport or service failure.
pub const FAILURE_REPLY: &str =
    "Sorry, I encountered an error while communicating with the AI services.";

/// Shown when the service answered but produced no text.
pub const EMPTY_REPLY: &str = "I couldn't generate a response at this time.";

/// Greeting used to open each detail-view chat session.
pub const GREETING: &str =
    "Hi! I can help you summarize this article or answer specific questions about it.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One transcript entry. The transcript is local to a single detail-view
/// chat session and resets per article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Answer `prompt` about the article in `context`. Always returns
/// displayable text, never an error.
#[must_use]
pub fn ask(config: &LuminaConfig, prompt: &str, context: &str) -> String {
    let Some(api_key) = config.api_key() else {
        return UNCONFIGURED_REPLY.to_string();
    };

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
        config.assistant.model, api_key
    );

    let response = ureq::post(&url)
        .timeout(REQUEST_TIMEOUT)
        .send_json(request_body(prompt, context));

    match response {
        Ok(resp) => match resp.into_json::<serde_json::Value>() {
            Ok(body) => extract_text(&body).unwrap_or_else(|| EMPTY_REPLY.to_string()),
            Err(e) => {
                warn!("assistant response was not valid JSON: {e}");
                FAILURE_REPLY.to_string()
            }
        },
        Err(e) => {
            warn!("assistant call failed: {e}");
            FAILURE_REPLY.to_string()
        }
    }
}

/// The generateContent payload: the user's question plus a system
/// instruction carrying the article body as context.
fn request_body(prompt: &str, context: &str) -> serde_json::Value {
    let system_instruction = format!(
        "You are an intelligent assistant for the \"Lumina\" journal.\n\
         You have access to the content of the post the reader is currently viewing.\n\
         Answer questions about this specific post, summarize sections, or provide\n\
         insights based on the text.\n\n\
         Rules:\n\
         1. Be concise, elegant, and helpful.\n\
         2. Keep the tone professional yet warm.\n\
         3. If the answer isn't in the context, say so politely.\n\n\
         Current post context:\n{context}"
    );

    serde_json::json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "systemInstruction": { "parts": [{ "text": system_instruction }] },
    })
}

/// Pull the first candidate's text out of a generateContent response.
fn extract_text(body: &serde_json::Value) -> Option<String> {
    let text = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()?
        .trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatMessage, Role, UNCONFIGURED_REPLY, ask, extract_text, request_body};
    use lumina_core::config::LuminaConfig;

    #[test]
    fn no_key_yields_fixed_advisory() {
        // Only meaningful when the developer machine has no key configured.
        if std::env::var("LUMINA_API_KEY").is_ok() || std::env::var("GEMINI_API_KEY").is_ok() {
            return;
        }
        let config = LuminaConfig::default();
        assert_eq!(ask(&config, "what is this?", "body"), UNCONFIGURED_REPLY);
    }

    #[test]
    fn request_embeds_prompt_and_context() {
        let body = request_body("summarize this", "ARTICLE BODY");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"].as_str(),
            Some("summarize this")
        );
        let system = body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .expect("system instruction present");
        assert!(system.contains("ARTICLE BODY"));
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let body = serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "  the answer  " }] } }
            ]
        });
        assert_eq!(extract_text(&body), Some("the answer".to_string()));
    }

    #[test]
    fn extract_text_handles_malformed_shapes() {
        assert_eq!(extract_text(&serde_json::json!({})), None);
        assert_eq!(extract_text(&serde_json::json!({ "candidates": [] })), None);
        let empty = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        });
        assert_eq!(extract_text(&empty), None);
    }

    #[test]
    fn chat_message_roles_serialize_lowercase() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.role, Role::User);
        let json = serde_json::to_string(&msg).expect("serialize");
        assert!(json.contains("\"user\""));
        assert!(serde_json::to_string(&ChatMessage::model("hi"))
            .expect("serialize")
            .contains("\"model\""));
    }
}
