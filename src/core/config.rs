use anyhow::{Result, bail};
use std::env;

/// Default tutor instruction sent ahead of every question.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are an AI Data Science Tutor.\n\
- Offer ML model suggestions, hyperparameter tuning, and dataset recommendations.\n\
- Explain concepts with examples and code snippets when needed.\n\
- Format responses using headings, bullet points, and markdown formatting.";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub history_path: String,
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub system_message: String,
}

impl AppConfig {
    /// Resolve configuration from the process environment. The API key
    /// is required; everything else falls back to a default.
    pub fn from_env() -> Result<Self> {
        let Ok(openai_api_key) = env::var("OPENAI_API_KEY") else {
            bail!("OpenAI API key is missing! Set the OPENAI_API_KEY environment variable.");
        };
        let history_path =
            env::var("TUTOR_HISTORY_PATH").unwrap_or_else(|_| "./chat_history.json".to_string());
        let openai_api_hostname =
            env::var("TUTOR_LLM_HOST").unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_model =
            env::var("TUTOR_LLM_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string());
        let system_message =
            env::var("TUTOR_SYSTEM_MESSAGE").unwrap_or_else(|_| DEFAULT_SYSTEM_MESSAGE.to_string());

        Ok(Self {
            history_path,
            openai_api_hostname,
            openai_api_key,
            openai_model,
            system_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        unsafe {
            env::remove_var("OPENAI_API_KEY");
        }
        let result = AppConfig::from_env();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key is missing"));
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        unsafe {
            env::set_var("OPENAI_API_KEY", "test-key");
            env::remove_var("TUTOR_HISTORY_PATH");
            env::remove_var("TUTOR_LLM_HOST");
            env::remove_var("TUTOR_LLM_MODEL");
            env::remove_var("TUTOR_SYSTEM_MESSAGE");
        }
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.openai_api_key, "test-key");
        assert_eq!(config.history_path, "./chat_history.json");
        assert_eq!(config.openai_api_hostname, "https://api.openai.com");
        assert_eq!(config.openai_model, "gpt-4.1-mini");
        assert_eq!(config.system_message, DEFAULT_SYSTEM_MESSAGE);
        unsafe {
            env::remove_var("OPENAI_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        unsafe {
            env::set_var("OPENAI_API_KEY", "test-key");
            env::set_var("TUTOR_HISTORY_PATH", "/tmp/history.json");
            env::set_var("TUTOR_LLM_MODEL", "local-model");
        }
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.history_path, "/tmp/history.json");
        assert_eq!(config.openai_model, "local-model");
        unsafe {
            env::remove_var("OPENAI_API_KEY");
            env::remove_var("TUTOR_HISTORY_PATH");
            env::remove_var("TUTOR_LLM_MODEL");
        }
    }
}
