use anyhow::{Error, Result};
use async_trait::async_trait;

use crate::chat::Role;
use crate::core::AppConfig;
use crate::openai::{Message, completion};

/// Fixed reply stored in the transcript when the provider answers with
/// no usable content.
pub const NO_RESPONSE_FALLBACK: &str = "⚠️ No valid response from AI.";

/// One provider round trip. The trait is the seam between the turn
/// state machine and the transport, so a streaming provider could be
/// dropped in without touching the controller.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send a single prompt and return its text content. `Ok(None)`
    /// means the call succeeded but carried no usable content.
    async fn complete(&self, prompt: &str) -> Result<Option<String>, Error>;
}

/// OpenAI compatible chat completions backend.
pub struct OpenAiBackend {
    api_hostname: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_hostname: config.openai_api_hostname.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, Error> {
        let messages = vec![Message::new(Role::User, prompt)];
        let resp = completion(&messages, &self.api_hostname, &self.api_key, &self.model).await?;

        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string());
        Ok(content)
    }
}

/// The reply destined for the transcript plus an optional transient
/// notice for the user. Provider failures are recovered into both: the
/// notice is shown once, the text is persisted with the turn.
pub struct CompletionOutcome {
    pub text: String,
    pub notice: Option<String>,
}

/// Build the single prompt sent to the provider: the fixed tutor
/// instruction followed by the user's raw question.
pub fn build_prompt(system_message: &str, user_text: &str) -> String {
    format!("{}\n\nQuestion: {}", system_message, user_text)
}

/// Ask the tutor one question. Never errors: an empty response or a
/// failed call is folded into the outcome text so the turn can still
/// complete and persist.
pub async fn get_response(
    backend: &dyn CompletionBackend,
    system_message: &str,
    user_text: &str,
) -> CompletionOutcome {
    let prompt = build_prompt(system_message, user_text);

    match backend.complete(&prompt).await {
        Ok(Some(text)) if !text.is_empty() => CompletionOutcome {
            text,
            notice: None,
        },
        Ok(_) => CompletionOutcome {
            text: NO_RESPONSE_FALLBACK.to_string(),
            notice: Some(
                "⚠️ No response generated. Check your API configuration and prompt format."
                    .to_string(),
            ),
        },
        Err(err) => {
            tracing::error!("Completion call failed: {}", err);
            CompletionOutcome {
                text: format!("⚠️ API Error: {}", err),
                notice: Some(format!("🚨 API Error: {}", err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Mutex;

    /// Backend double that records the prompt it was handed.
    struct MockBackend {
        reply: Result<Option<String>, String>,
        seen_prompt: Mutex<Option<String>>,
    }

    impl MockBackend {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(Some(text.to_string())),
                seen_prompt: Mutex::new(None),
            }
        }

        fn empty() -> Self {
            Self {
                reply: Ok(None),
                seen_prompt: Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for MockBackend {
        async fn complete(&self, prompt: &str) -> Result<Option<String>, Error> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Ok(content) => Ok(content.clone()),
                Err(message) => Err(anyhow!("{}", message)),
            }
        }
    }

    #[test]
    fn test_build_prompt_concatenates_instruction_and_question() {
        let prompt = build_prompt("You are a tutor.", "What is overfitting?");
        assert_eq!(prompt, "You are a tutor.\n\nQuestion: What is overfitting?");
    }

    #[tokio::test]
    async fn test_get_response_passes_through_content() {
        let backend = MockBackend::replying("Overfitting is ...");
        let outcome = get_response(&backend, "You are a tutor.", "What is overfitting?").await;
        assert_eq!(outcome.text, "Overfitting is ...");
        assert!(outcome.notice.is_none());

        let prompt = backend.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.starts_with("You are a tutor."));
        assert!(prompt.ends_with("Question: What is overfitting?"));
    }

    #[tokio::test]
    async fn test_get_response_empty_content_uses_fallback() {
        let backend = MockBackend::empty();
        let outcome = get_response(&backend, "sys", "hi").await;
        assert_eq!(outcome.text, NO_RESPONSE_FALLBACK);
        assert!(outcome.notice.is_some());
    }

    #[tokio::test]
    async fn test_get_response_blank_content_uses_fallback() {
        let backend = MockBackend::replying("");
        let outcome = get_response(&backend, "sys", "hi").await;
        assert_eq!(outcome.text, NO_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn test_get_response_embeds_error_text() {
        let backend = MockBackend::failing("connection refused");
        let outcome = get_response(&backend, "sys", "hi").await;
        assert_eq!(outcome.text, "⚠️ API Error: connection refused");
        assert_eq!(
            outcome.notice.as_deref(),
            Some("🚨 API Error: connection refused")
        );
    }

    #[tokio::test]
    async fn test_openai_backend_extracts_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "Use cross-validation."}, "finish_reason": "stop"}]}"#,
            )
            .create();

        let backend = OpenAiBackend {
            api_hostname: server.url(),
            api_key: "test-key".to_string(),
            model: "gpt-4.1-mini".to_string(),
        };
        let content = backend.complete("prompt").await.unwrap();

        mock.assert();
        assert_eq!(content.as_deref(), Some("Use cross-validation."));
    }

    #[tokio::test]
    async fn test_openai_backend_missing_content_is_none() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create();

        let backend = OpenAiBackend {
            api_hostname: server.url(),
            api_key: "test-key".to_string(),
            model: "gpt-4.1-mini".to_string(),
        };
        let content = backend.complete("prompt").await.unwrap();

        mock.assert();
        assert!(content.is_none());
    }
}
