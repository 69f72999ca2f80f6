//! Outbound call-initiation vendor client.
//!
//! Sibling feature to triage: the triage core never calls this. It is thin
//! plumbing around the vendor's `/call` endpoint.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::TelephonyConfig;
use crate::error::{AppError, Result};

/// Telephony vendor client for initiating outbound calls
#[derive(Clone)]
pub struct CallInitiator {
    client: Client,
    endpoint: String,
    agent_id: String,
    auth_token: String,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct CallRequest<'a> {
    agent_id: &'a str,
    recipient_phone_number: &'a str,
}

impl CallInitiator {
    /// Create a new call initiator
    pub fn new(
        endpoint: String,
        agent_id: String,
        auth_token: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            agent_id,
            auth_token,
            timeout_secs,
        })
    }

    /// Build the client from configuration, resolving credentials from the
    /// configured environment variables
    pub fn from_config(config: &TelephonyConfig) -> Result<Self> {
        let agent_id = config
            .agent_id_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .unwrap_or_default();
        let auth_token = config
            .auth_token_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .unwrap_or_default();

        if agent_id.is_empty() || auth_token.is_empty() {
            tracing::warn!("Telephony credentials not fully configured; /make-call will fail");
        }

        Self::new(
            config.endpoint.clone(),
            agent_id,
            auth_token,
            config.timeout_secs,
        )
    }

    /// Initiate an outbound call to the given recipient
    pub async fn initiate_call(&self, recipient_phone_number: &str) -> Result<Value> {
        let request = CallRequest {
            agent_id: &self.agent_id,
            recipient_phone_number,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.auth_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(format!(
                        "vendor call timed out after {} seconds",
                        self.timeout_secs
                    ))
                } else {
                    AppError::Telephony(format!("vendor request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(AppError::Telephony(format!(
                "vendor returned non-success status {}: {}",
                status,
                if body.is_empty() { "no response body" } else { &body }
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::Telephony(format!("vendor returned non-JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_request_serialization() {
        let request = CallRequest {
            agent_id: "agent-1",
            recipient_phone_number: "555-1111",
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["agent_id"], "agent-1");
        assert_eq!(value["recipient_phone_number"], "555-1111");
    }

    #[test]
    fn test_initiator_creation() {
        let initiator = CallInitiator::new(
            "https://vendor.example.com/call".to_string(),
            "agent-1".to_string(),
            "token".to_string(),
            10,
        );
        assert!(initiator.is_ok());
    }
}
