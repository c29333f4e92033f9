// ABOUTME: Transport trait and the HTTPS transactional-email relay implementation.
// ABOUTME: Builds the JSON request and interprets the relay's success/message response.

use crate::config::RelayConfig;
use crate::error::{BookingError, Result};
use crate::summary::BookingSummary;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// One message for the relay to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage {
    pub subject: String,
    pub from_name: String,
    /// Recipient override. `None` delivers to the inbox registered with the relay.
    pub to: Option<String>,
    /// Address replies should go to.
    pub reply_to: Option<String>,
    pub html: String,
    pub text: String,
    /// Named fields sent alongside the formatted bodies.
    pub fields: Vec<(String, String)>,
}

impl RelayMessage {
    /// The booking notification for the site owner.
    pub fn booking(summary: &BookingSummary, reply_to: Option<&str>) -> Self {
        Self {
            subject: summary.subject(),
            from_name: format!("{} Website", summary.business_name()),
            to: None,
            reply_to: reply_to.map(str::to_string),
            html: summary.html_table(),
            text: summary.plain_text(),
            fields: summary
                .fields()
                .iter()
                .map(|(label, value)| (label.to_string(), value.clone()))
                .collect(),
        }
    }

    /// The acknowledgement addressed to the requester.
    pub fn confirmation(summary: &BookingSummary, to: &str, phone_number: &str) -> Self {
        let text = summary.confirmation_text(phone_number);
        Self {
            subject: summary.confirmation_subject(),
            from_name: summary.business_name().to_string(),
            to: Some(to.to_string()),
            reply_to: None,
            html: format!("<pre>{}</pre>", text.replace('&', "&amp;").replace('<', "&lt;")),
            text,
            fields: Vec::new(),
        }
    }

    /// JSON body for the relay, with the access key folded in.
    pub fn to_payload(&self, access_key: &str) -> Value {
        let mut body = Map::new();
        for (label, value) in &self.fields {
            body.insert(label.clone(), Value::String(value.clone()));
        }
        body.insert("access_key".into(), access_key.into());
        body.insert("subject".into(), self.subject.clone().into());
        body.insert("from_name".into(), self.from_name.clone().into());
        body.insert("message".into(), self.html.clone().into());
        body.insert("text".into(), self.text.clone().into());
        if let Some(to) = &self.to {
            body.insert("to".into(), to.clone().into());
        }
        if let Some(reply_to) = &self.reply_to {
            body.insert("email".into(), reply_to.clone().into());
            body.insert("replyto".into(), reply_to.clone().into());
        }
        Value::Object(body)
    }
}

/// A way of getting a message to a human.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Unique name for this transport, used in logs.
    fn name(&self) -> &'static str;

    /// Deliver one message. Any error means it was not accepted.
    async fn deliver(&self, message: &RelayMessage) -> Result<()>;
}

/// Relay reply body.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl RelayResponse {
    /// Accept only a 2xx status whose body says `success: true`.
    pub fn interpret(status: u16, body: &str) -> Result<()> {
        let parsed: Option<RelayResponse> = serde_json::from_str(body).ok();
        let ok_status = (200..300).contains(&status);

        match parsed {
            Some(resp) if ok_status && resp.success => Ok(()),
            Some(resp) => Err(BookingError::Relay {
                status,
                message: resp
                    .message
                    .unwrap_or_else(|| "relay reported failure".to_string()),
            }),
            None => Err(BookingError::Relay {
                status,
                message: if body.trim().is_empty() {
                    "empty response".to_string()
                } else {
                    format!("unreadable response: {}", truncate(body.trim(), 200))
                },
            }),
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Transactional-email relay reached over HTTPS with a JSON body.
pub struct RelayTransport {
    client: Client,
    endpoint: String,
    access_key: String,
}

impl RelayTransport {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            access_key: config.access_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for RelayTransport {
    fn name(&self) -> &'static str {
        "relay"
    }

    async fn deliver(&self, message: &RelayMessage) -> Result<()> {
        debug!(
            endpoint = %self.endpoint,
            subject = %message.subject,
            to = ?message.to,
            "Posting message to relay"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&message.to_payload(&self.access_key))
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        RelayResponse::interpret(status, &body)?;

        debug!(status, "Relay accepted message");
        Ok(())
    }
}
