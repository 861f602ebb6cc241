use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
pub struct SendRequest {
    pub to: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Channel {
    #[serde(rename = "SMS")]
    Sms,
    WhatsApp,
}

impl Channel {
    pub fn fake_note(self) -> &'static str {
        match self {
            Channel::Sms => "AT not configured",
            Channel::WhatsApp => "WhatsApp test mode",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SendResult {
    Fake {
        to: String,
        message: String,
        note: &'static str,
    },
    Sent {
        provider: Channel,
        response: Value,
    },
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: &'static str,
    pub version: &'static str,
    pub mode: &'static str,
}
