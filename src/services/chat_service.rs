// src/services/chat_service.rs
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_OUTPUT_TOKENS: u32 = 1000;
const TEMPERATURE: f64 = 0.7;

pub const SYSTEM_PROMPT: &str = "You are a helpful academic assistant helping students with their CGPA, courses, and academic planning. 
You should:
- Be friendly and encouraging
- Provide accurate academic advice
- Help with GPA calculations
- Suggest study strategies
- Assist with course planning
- Answer in a concise and clear manner

Always respond in a helpful, supportive tone.";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub message: String,
}

/// Builds the `generateContent` body: prior turns, then the new message.
///
/// The first message of a conversation carries the system prompt.
pub fn build_generate_request(message: &str, history: &[ChatTurn]) -> Value {
    let mut contents: Vec<Value> = history
        .iter()
        .map(|turn| {
            let role = if turn.role == "assistant" { "model" } else { "user" };
            json!({ "role": role, "parts": [{ "text": turn.content }] })
        })
        .collect();

    let text = if history.is_empty() {
        format!("{SYSTEM_PROMPT}\n\nStudent question: {message}")
    } else {
        message.to_string()
    };
    contents.push(json!({ "role": "user", "parts": [{ "text": text }] }));

    json!({
        "contents": contents,
        "generationConfig": {
            "maxOutputTokens": MAX_OUTPUT_TOKENS,
            "temperature": TEMPERATURE,
        }
    })
}

/// Pulls the reply text out of a `generateContent` response.
pub fn extract_reply(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    (!text.is_empty()).then_some(text)
}

pub async fn send_message(
    http: &reqwest::Client,
    api_key: Option<&str>,
    model: &str,
    request: &ChatRequest,
) -> AppResult<ChatReply> {
    let api_key = api_key.ok_or(AppError::NotConfigured("AI chat"))?;
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message is required".into()));
    }

    let body = build_generate_request(&request.message, &request.history);
    tracing::debug!("Sending chat message ({} prior turns) to {}", request.history.len(), model);

    let response = http
        .post(format!("{GEMINI_BASE_URL}/{model}:generateContent"))
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("chat request failed: {e}")))?;

    let status = response.status();
    let payload: Value = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("chat response unreadable: {e}")))?;

    if !status.is_success() {
        return Err(AppError::Upstream(format!("chat API returned {status}: {payload}")));
    }

    extract_reply(&payload)
        .map(|message| ChatReply { message })
        .ok_or_else(|| AppError::Upstream("chat API returned no text".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_carries_system_prompt() {
        let body = build_generate_request("How do I raise my CGPA?", &[]);
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        let text = contents[0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("You are a helpful academic assistant"));
        assert!(text.ends_with("Student question: How do I raise my CGPA?"));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
    }

    #[test]
    fn assistant_turns_become_model_turns() {
        let history = vec![
            ChatTurn { role: "user".into(), content: "hi".into() },
            ChatTurn { role: "assistant".into(), content: "hello".into() },
        ];
        let body = build_generate_request("next", &history);
        let roles: Vec<&str> = body["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, ["user", "model", "user"]);
        assert_eq!(body["contents"][2]["parts"][0]["text"], "next");
    }

    #[test]
    fn reply_text_is_joined_from_parts() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": "Study " }, { "text": "daily." }] } }]
        });
        assert_eq!(extract_reply(&response).as_deref(), Some("Study daily."));
        assert_eq!(extract_reply(&json!({ "candidates": [] })), None);
    }
}
