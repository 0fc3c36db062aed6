use crate::sources::DefinitionSource;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use focloir_model::{Absence, Fetched};
use std::time::Duration;

pub const SYSTEM_PROMPT: &str = "You are a helpful Irish language tutor.";

/// The per-word request sent to the model.
pub fn user_prompt(word: &str) -> String {
    format!(
        "Explain the meaning of the Irish word '{word}' in simple English for a beginner. \
         Do not include the translation itself. Keep it to 1-2 sentences."
    )
}

/// Sampling and limits for definition requests.
#[derive(Debug, Clone)]
pub struct DefinitionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for DefinitionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_tokens: 100,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Generates beginner explanations with an OpenAI-compatible chat endpoint.
pub struct ChatDefiner {
    client: Client<OpenAIConfig>,
    settings: DefinitionSettings,
}

impl ChatDefiner {
    /// `api_key` falls back to `OPENAI_API_KEY` when `None`; `api_base`
    /// points at a compatible endpoint instead of api.openai.com.
    pub fn new(api_key: Option<String>, api_base: Option<String>, settings: DefinitionSettings) -> Self {
        let mut config = OpenAIConfig::new();
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }

        Self {
            client: Client::with_config(config),
            settings,
        }
    }

    fn messages(word: &str) -> Result<Vec<ChatCompletionRequestMessage>, Absence> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()
            .map_err(|e| Absence::Generation(e.to_string()))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(user_prompt(word))
            .build()
            .map_err(|e| Absence::Generation(e.to_string()))?;
        Ok(vec![system.into(), user.into()])
    }

    async fn complete(&self, word: &str) -> Fetched<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .messages(Self::messages(word)?)
            .temperature(self.settings.temperature)
            .max_completion_tokens(self.settings.max_tokens)
            .build()
            .map_err(|e| Absence::Generation(e.to_string()))?;

        let response = tokio::time::timeout(self.settings.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| Absence::Timeout)?
            .map_err(|e| Absence::Generation(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default();
        if content.is_empty() {
            return Err(Absence::Generation("empty reply".to_string()));
        }

        Ok(content.to_string())
    }
}

#[async_trait]
impl DefinitionSource for ChatDefiner {
    async fn define(&self, word: &str) -> Fetched<String> {
        let result = self.complete(word).await;
        if let Err(e) = &result {
            tracing::warn!(word = %word, error = %e, "Definition generation failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_word_and_constraints() {
        let prompt = user_prompt("fáilte");
        assert!(prompt.contains("'fáilte'"));
        assert!(prompt.contains("Do not include the translation"));
        assert!(prompt.contains("1-2 sentences"));
    }

    #[test]
    fn test_default_settings() {
        let settings = DefinitionSettings::default();
        assert!(settings.temperature <= 0.5);
        assert_eq!(settings.max_tokens, 100);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_absent() {
        // Bind then drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let settings = DefinitionSettings {
            timeout: Duration::from_secs(5),
            ..DefinitionSettings::default()
        };
        let definer = ChatDefiner::new(
            Some("test-key".into()),
            Some(format!("http://127.0.0.1:{port}/v1")),
            settings,
        );

        let result = definer.define("slán").await;
        assert!(
            matches!(result, Err(Absence::Generation(_)) | Err(Absence::Timeout)),
            "unexpected result: {result:?}"
        );
    }
}
