use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use async_trait::async_trait;

use crate::classifier::{prompt, Classifier};
use crate::config::ClassifierConfig;
use crate::error::{AppError, Result};
use crate::models::IncomingEvent;

/// Remote chat-completions oracle client.
///
/// Sends a role-tagged conversation (system instruction + one user message)
/// with deterministic-leaning sampling and a bounded timeout. Any transport
/// failure, timeout or non-success status maps to
/// [`AppError::ClassifierUnavailable`]; retry policy, if any, belongs to the
/// caller.
#[derive(Clone)]
pub struct RemoteClassifier {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl RemoteClassifier {
    /// Create a new remote classifier
    pub fn new(
        endpoint: String,
        model: String,
        api_key: String,
        temperature: f32,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            model,
            api_key,
            temperature,
            max_tokens,
            timeout_secs,
        })
    }

    /// Build the client from configuration, resolving the API key from the
    /// configured environment variable. A missing key is tolerated: the
    /// oracle will reject the calls and triage degrades to the heuristic.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let api_key = config
            .api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .unwrap_or_default();

        if api_key.is_empty() {
            tracing::warn!(
                api_key_env = config.api_key_env.as_deref().unwrap_or(""),
                "Classifier API key not set; oracle calls will fail and triage will degrade to the heuristic"
            );
        }

        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            config.temperature,
            config.max_tokens,
            config.timeout_secs,
        )
    }

    async fn send(&self, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: 1.0,
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::ClassifierUnavailable(format!(
                        "oracle call timed out after {} seconds",
                        self.timeout_secs
                    ))
                } else if e.is_connect() {
                    AppError::ClassifierUnavailable(format!("failed to connect to oracle: {}", e))
                } else {
                    AppError::ClassifierUnavailable(format!("oracle request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(AppError::ClassifierUnavailable(format!(
                "oracle returned non-success status {}: {}",
                status,
                if body.is_empty() { "no response body" } else { &body }
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            AppError::ClassifierUnavailable(format!("failed to read oracle response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::ClassifierUnavailable("oracle answer contained no choices".to_string())
            })
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    async fn classify(&self, event: &IncomingEvent) -> Result<String> {
        let user_prompt = prompt::build_user_prompt(event);

        tracing::debug!(
            model = %self.model,
            prompt_bytes = user_prompt.len(),
            "Sending classification request to oracle"
        );

        let answer = self.send(&user_prompt).await?;

        tracing::debug!(answer_bytes = answer.len(), "Oracle answered");
        Ok(answer)
    }
}
