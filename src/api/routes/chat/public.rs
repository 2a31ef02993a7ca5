//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::chat::ChatTurn;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Serialize)]
pub struct ChatTranscriptResponse {
    pub transcript: Vec<ChatTurn>,
}
