use std::env;

const SANDBOX_USERNAME: &str = "sandbox";
const SANDBOX_SMS_URL: &str = "https://api.sandbox.africastalking.com/version1/messaging";
const LIVE_SMS_URL: &str = "https://api.africastalking.com/version1/messaging";
const WHATSAPP_URL: &str = "https://chat.africastalking.com/whatsapp/message/send";

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub username: String,
    pub api_key: Option<String>,
    pub whatsapp_number: Option<String>,
    pub sms_url: String,
    pub whatsapp_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("NOTIFY_API_PORT") {
            Some(p) => p
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid NOTIFY_API_PORT {:?}: {}", p, e))?,
            None => DEFAULT_PORT,
        };

        let username = var("AT_USERNAME").unwrap_or_else(|| SANDBOX_USERNAME.to_string());
        let default_sms_url = if username == SANDBOX_USERNAME {
            SANDBOX_SMS_URL
        } else {
            LIVE_SMS_URL
        };

        Ok(Self {
            port,
            provider: ProviderConfig {
                api_key: var("AT_API_KEY"),
                whatsapp_number: var("AT_WHATSAPP_NUMBER"),
                sms_url: var("AT_SMS_URL").unwrap_or_else(|| default_sms_url.to_string()),
                whatsapp_url: var("AT_WHATSAPP_URL").unwrap_or_else(|| WHATSAPP_URL.to_string()),
                username,
            },
        })
    }
}
