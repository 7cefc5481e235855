use super::types::VisionRequest;
use crate::{Error, Result, config::VisionConfig};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use tracing::debug;

/// A vision model that can look at one image and answer a text prompt.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Sends the prompt and image to the model and returns its raw text
    /// reply. No parsing happens at this layer.
    async fn analyze_image(&self, request: VisionRequest) -> Result<String>;
}

pub struct OpenAiVisionClient {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
}

impl OpenAiVisionClient {
    pub fn new(config: VisionConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url);
        }

        let client = Client::with_config(openai_config);

        Self {
            client,
            model: config.model,
            max_tokens: config.max_tokens,
        }
    }
}

#[async_trait]
impl VisionClient for OpenAiVisionClient {
    async fn analyze_image(&self, request: VisionRequest) -> Result<String> {
        debug!("Creating chat completion with model {}", self.model);

        let user_message = openai_types::ChatCompletionRequestUserMessageArgs::default()
            .content(vec![
                openai_types::ChatCompletionRequestMessageContentPartTextArgs::default()
                    .text(request.prompt.clone())
                    .build()?
                    .into(),
                openai_types::ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(
                        openai_types::ImageUrlArgs::default()
                            .url(request.data_url())
                            .build()?,
                    )
                    .build()?
                    .into(),
            ])
            .build()?;

        let openai_request = openai_types::CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![user_message.into()])
            .max_tokens(self.max_tokens)
            .build()?;

        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| Error::vision("chat completion contained no message content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExtractionStrategy, VisionProvider};
    use pretty_assertions::assert_eq;

    fn create_test_config() -> VisionConfig {
        VisionConfig {
            provider: VisionProvider::OpenAi,
            base_url: String::new(),
            api_key: "test-api-key".to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: 500,
            extraction: ExtractionStrategy::Json,
        }
    }

    #[test]
    fn test_openai_client_creation() {
        let client = OpenAiVisionClient::new(create_test_config());

        assert_eq!(client.model, "gpt-4o");
        assert_eq!(client.max_tokens, 500);
    }

    #[test]
    fn test_openai_client_with_custom_base_url() {
        let mut config = create_test_config();
        config.base_url = "https://custom.api.com".to_string();

        let client = OpenAiVisionClient::new(config);
        assert_eq!(client.model, "gpt-4o");
    }
}
