use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ProviderConfig;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid provider response: {0}")]
    Decode(String),

    #[error("provider misconfigured: {0}")]
    Configuration(String),
}

/// Send primitives of the messaging provider. Responses are passed back untouched.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn send_sms(&self, message: &str, recipients: &[String]) -> Result<Value, ProviderError>;
    async fn send_whatsapp(&self, message: &str, recipient: &str) -> Result<Value, ProviderError>;
}

/// Resolves the provider once at startup. `None` means the relay runs in fake mode.
pub fn connect(config: &ProviderConfig) -> Option<Arc<dyn ProviderClient>> {
    let Some(api_key) = config.api_key.clone() else {
        warn!("Africa's Talking not available: AT_API_KEY is not set");
        return None;
    };

    match AfricasTalking::new(config, api_key) {
        Ok(client) => {
            info!("Africa's Talking ready (username: {})", config.username);
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("Africa's Talking not available: {}", e);
            None
        }
    }
}

pub struct AfricasTalking {
    client: Client,
    username: String,
    api_key: String,
    whatsapp_number: Option<String>,
    sms_url: String,
    whatsapp_url: String,
}

#[derive(Serialize)]
struct SmsForm<'a> {
    username: &'a str,
    to: String,
    message: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WhatsAppRequest<'a> {
    username: &'a str,
    wa_number: &'a str,
    phone_number: &'a str,
    body: WhatsAppBody<'a>,
}

#[derive(Serialize)]
struct WhatsAppBody<'a> {
    message: &'a str,
}

impl AfricasTalking {
    pub fn new(config: &ProviderConfig, api_key: String) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("notify-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            username: config.username.clone(),
            api_key,
            whatsapp_number: config.whatsapp_number.clone(),
            sms_url: config.sms_url.clone(),
            whatsapp_url: config.whatsapp_url.clone(),
        })
    }

    async fn read_response(response: reqwest::Response) -> Result<Value, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProviderClient for AfricasTalking {
    async fn send_sms(&self, message: &str, recipients: &[String]) -> Result<Value, ProviderError> {
        let form = SmsForm {
            username: &self.username,
            to: recipients.join(","),
            message,
        };

        let response = self
            .client
            .post(&self.sms_url)
            .header("apiKey", &self.api_key)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await?;

        Self::read_response(response).await
    }

    async fn send_whatsapp(&self, message: &str, recipient: &str) -> Result<Value, ProviderError> {
        let wa_number = self.whatsapp_number.as_deref().ok_or_else(|| {
            ProviderError::Configuration("AT_WHATSAPP_NUMBER is not set".to_string())
        })?;

        let request = WhatsAppRequest {
            username: &self.username,
            wa_number,
            phone_number: recipient,
            body: WhatsAppBody { message },
        };

        let response = self
            .client
            .post(&self.whatsapp_url)
            .header("apiKey", &self.api_key)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        Self::read_response(response).await
    }
}
