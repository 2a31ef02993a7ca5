use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::chat::Role;

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Single-shot chat completion request against an OpenAI compatible
/// API. One attempt, no retry, no request timeout: a hung provider
/// stalls the calling interaction.
pub async fn completion(
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<Value, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?
        .json()
        .await?;

    Ok(response)
}
