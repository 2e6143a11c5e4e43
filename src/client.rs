use crate::config::Config;
use crate::error::LlmError;
use crate::extract::extract_text;
use crate::prompt::GenerateRequest;
use crate::transport::Transport;

/// Question in, generated text out: prompt builder, transport and extractor
/// glued together for one model.
pub struct GeminiClient {
    transport: Transport,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one question and return the model's text, untrimmed.
    pub async fn ask(&self, question: &str) -> Result<String, LlmError> {
        let payload = GenerateRequest::new(&self.model, question);
        log::info!("asking {}: {question}", self.model);

        let exchange = self.transport.post(&payload).await?;
        log::debug!("HTTP {} from {}", exchange.status, self.model);

        extract_text(&exchange.body)
    }
}
