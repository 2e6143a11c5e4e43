//! HTTP exchange with the `generateContent` endpoint.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tokio::time::sleep;

use crate::config::{Config, RetryPolicy};
use crate::error::LlmError;
use crate::prompt::GenerateRequest;

pub const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_UTF8: &str = "application/json; charset=utf-8";

/// A successful (2xx) reply.
#[derive(Debug)]
pub struct Exchange {
    pub status: u16,
    pub body: String,
}

pub struct Transport {
    client: reqwest::Client,
    url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl Transport {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            url: config.generate_url(),
            api_key: config.api_key.clone(),
            retry: config.retry,
        })
    }

    /// POST the payload, retrying per the configured policy.
    pub async fn post(&self, payload: &GenerateRequest) -> Result<Exchange, LlmError> {
        let body = serde_json::to_string(payload).map_err(LlmError::Encode)?;
        let max = self.retry.max_attempts.max(1);

        let mut attempt = 1;
        loop {
            match self.post_once(&body).await {
                Ok(exchange) => return Ok(exchange),
                Err(err) if attempt < max && err.is_retryable() => {
                    log::warn!("attempt {attempt}/{max} to {} failed: {err}", self.url);
                    sleep(self.retry.delay_after(attempt)).await;
                    attempt += 1;
                }
                Err(err) => {
                    log::error!("request to {} failed after {attempt} attempt(s): {err}", self.url);
                    return Err(err);
                }
            }
        }
    }

    async fn post_once(&self, body: &str) -> Result<Exchange, LlmError> {
        let resp = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .body(body.to_owned())
            .send()
            .await
            .map_err(LlmError::Transport)?;

        let status = resp.status();
        // Reading the body consumes the response, releasing the connection on every path.
        let text = resp.text().await.map_err(LlmError::Transport)?;
        log::debug!("HTTP status {status}, raw body: {text}");

        if !status.is_success() {
            return Err(LlmError::RemoteRejection {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(Exchange {
            status: status.as_u16(),
            body: text,
        })
    }
}

fn build_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}
