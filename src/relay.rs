use std::sync::Arc;

use log::info;

use crate::provider::{ProviderClient, ProviderError};
use crate::types::{Channel, SendResult};

/// Forwards send requests to the provider, or echoes them back when none was configured.
///
/// The provider is fixed at construction, so readiness never changes for the lifetime
/// of a relay.
#[derive(Clone)]
pub struct Relay {
    provider: Option<Arc<dyn ProviderClient>>,
}

impl Relay {
    pub fn new(provider: Option<Arc<dyn ProviderClient>>) -> Self {
        Self { provider }
    }

    pub fn is_ready(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn send_sms(&self, to: String, message: String) -> Result<SendResult, ProviderError> {
        let Some(provider) = &self.provider else {
            return Ok(fake(Channel::Sms, to, message));
        };

        info!("Sending SMS to {}", to);
        let response = provider.send_sms(&message, &[to]).await?;
        Ok(SendResult::Sent {
            provider: Channel::Sms,
            response,
        })
    }

    pub async fn send_whatsapp(
        &self,
        to: String,
        message: String,
    ) -> Result<SendResult, ProviderError> {
        let Some(provider) = &self.provider else {
            return Ok(fake(Channel::WhatsApp, to, message));
        };

        info!("Sending WhatsApp message to {}", to);
        let response = provider.send_whatsapp(&message, &to).await?;
        Ok(SendResult::Sent {
            provider: Channel::WhatsApp,
            response,
        })
    }
}

fn fake(channel: Channel, to: String, message: String) -> SendResult {
    SendResult::Fake {
        to,
        message,
        note: channel.fake_note(),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::provider::{ProviderClient, ProviderError};

    /// Records every call. A channel with a failure reason set rejects its sends.
    #[derive(Default)]
    pub struct MockProvider {
        pub sms_failure: Option<String>,
        pub whatsapp_failure: Option<String>,
        pub calls: AtomicU64,
        pub sms_args: Mutex<Vec<(String, Vec<String>)>>,
        pub whatsapp_args: Mutex<Vec<(String, String)>>,
    }

    impl MockProvider {
        pub fn failing(reason: &str) -> Self {
            Self {
                sms_failure: Some(reason.to_string()),
                whatsapp_failure: Some(reason.to_string()),
                ..Self::default()
            }
        }

        pub fn call_count(&self) -> u64 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn reject(reason: &str) -> ProviderError {
        ProviderError::Rejected {
            status: 500,
            body: reason.to_string(),
        }
    }

    #[async_trait]
    impl ProviderClient for MockProvider {
        async fn send_sms(
            &self,
            message: &str,
            recipients: &[String],
        ) -> Result<Value, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sms_args
                .lock()
                .unwrap()
                .push((message.to_string(), recipients.to_vec()));
            match &self.sms_failure {
                Some(reason) => Err(reject(reason)),
                None => Ok(json!({"SMSMessageData": {"Message": "Sent to 1/1"}})),
            }
        }

        async fn send_whatsapp(&self, message: &str, recipient: &str) -> Result<Value, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.whatsapp_args
                .lock()
                .unwrap()
                .push((message.to_string(), recipient.to_string()));
            match &self.whatsapp_failure {
                Some(reason) => Err(reject(reason)),
                None => Ok(json!({"messageId": "wa-1"})),
            }
        }
    }
}
