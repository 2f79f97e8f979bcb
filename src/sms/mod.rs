// SPDX-License-Identifier: Apache-2.0

//! Twilio REST client
//!
//! Thin wrapper over the Messages/Calls endpoints. Auth uses HTTP basic
//! with the account SID and token; the token stays behind `Sensitive` so
//! it never leaks into logs.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use dojo_core::{AgentError, AgentResult};

use crate::config::TwilioConfig;
use crate::observability::Sensitive;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Summary of a message, as returned by the Messages list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSummary {
    pub sid: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
    pub date_sent: Option<String>,
    pub direction: Option<String>,
}

/// Details of a single call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallDetails {
    pub sid: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub direction: Option<String>,
}

pub struct TwilioClient {
    http: Client,
    account_sid: String,
    auth_token: Sensitive<String>,
    from_number: String,
    base_url: String,
}

impl TwilioClient {
    pub fn new(config: &TwilioConfig) -> Self {
        Self::with_base_url(config, TWILIO_API_BASE)
    }

    /// Base-url override for tests pointed at a local stub.
    pub fn with_base_url(config: &TwilioConfig, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            base_url: base_url.into(),
        }
    }

    pub fn from_number(&self) -> &str {
        &self.from_number
    }

    /// Send an SMS; returns the message SID.
    #[instrument(skip(self, body), fields(to = %to))]
    pub async fn send_sms(
        &self,
        to: &str,
        body: &str,
        from_override: Option<&str>,
    ) -> AgentResult<String> {
        let from = from_override.unwrap_or(&self.from_number);
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(self.auth_token.expose()))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await
            .map_err(|e| AgentError::sms(format!("Twilio request failed: {e}")))?;

        let status = response.status();
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AgentError::sms(format!("Twilio returned an unreadable response: {e}")))?;

        if !status.is_success() {
            return Err(AgentError::sms(
                extract_twilio_error(&payload).unwrap_or_else(|| format!("Twilio HTTP {status}")),
            ));
        }

        let sid = payload
            .get("sid")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::sms("Twilio response missing message SID"))?;
        info!(sid = %sid, "SMS accepted by Twilio");
        Ok(sid.to_string())
    }

    /// List the most recent messages on the account.
    pub async fn list_messages(&self, limit: u32) -> AgentResult<Vec<MessageSummary>> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let payload = self.get_json(&url, &[("PageSize", limit.to_string())]).await?;
        let messages = payload
            .get("messages")
            .cloned()
            .unwrap_or_else(|| serde_json::Value::Array(Vec::new()));

        serde_json::from_value(messages)
            .map_err(|e| AgentError::sms(format!("Unexpected message list shape: {e}")))
    }

    /// Fetch details about a specific call.
    pub async fn call_details(&self, call_sid: &str) -> AgentResult<CallDetails> {
        let url = format!(
            "{}/Accounts/{}/Calls/{}.json",
            self.base_url, self.account_sid, call_sid
        );

        let payload = self.get_json(&url, &[]).await?;
        serde_json::from_value(payload)
            .map_err(|e| AgentError::sms(format!("Unexpected call details shape: {e}")))
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AgentResult<serde_json::Value> {
        let response = self
            .http
            .get(url)
            .basic_auth(&self.account_sid, Some(self.auth_token.expose()))
            .query(query)
            .send()
            .await
            .map_err(|e| AgentError::sms(format!("Twilio request failed: {e}")))?;

        let status = response.status();
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AgentError::sms(format!("Twilio returned an unreadable response: {e}")))?;

        if !status.is_success() {
            return Err(AgentError::sms(
                extract_twilio_error(&payload).unwrap_or_else(|| format!("Twilio HTTP {status}")),
            ));
        }

        Ok(payload)
    }
}

/// Twilio error bodies carry a human-readable `message` field.
fn extract_twilio_error(payload: &serde_json::Value) -> Option<String> {
    payload
        .get("message")
        .and_then(|m| m.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_twilio_error_message() {
        let payload = json!({"code": 21211, "message": "The 'To' number is not valid."});
        assert_eq!(
            extract_twilio_error(&payload),
            Some("The 'To' number is not valid.".to_string())
        );
        assert_eq!(extract_twilio_error(&json!({})), None);
    }

    #[test]
    fn message_summary_deserializes_from_api_shape() {
        let payload = json!({
            "sid": "SM123",
            "from": "+15550001111",
            "to": "+15552223333",
            "body": "See you at class!",
            "status": "delivered",
            "date_sent": "Sat, 01 Feb 2025 18:00:00 +0000",
            "direction": "outbound-api",
        });
        let summary: MessageSummary = serde_json::from_value(payload).unwrap();
        assert_eq!(summary.sid, "SM123");
        assert_eq!(summary.status.as_deref(), Some("delivered"));
    }

    #[test]
    fn call_details_tolerate_nulls() {
        let payload = json!({
            "sid": "CA123",
            "from": "+15550001111",
            "to": "+15552223333",
            "status": "completed",
            "start_time": null,
            "end_time": null,
            "duration": null,
            "price": null,
            "direction": "inbound",
        });
        let details: CallDetails = serde_json::from_value(payload).unwrap();
        assert_eq!(details.sid, "CA123");
        assert!(details.duration.is_none());
    }
}
