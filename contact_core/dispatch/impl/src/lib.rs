use std::{sync::Arc, time::Duration};

use contact_core_dispatch_contracts::{ContactDispatchError, ContactDispatchService};
use contact_extern_contracts::emailjs::{EmailJsApiService, EmailJsSendResponse};
use contact_models::{
    contact::ContactMessage,
    emailjs::EmailJsCredentials,
    form::{Channel, FormValues},
};
use tracing::{debug, error, warn};

#[derive(Debug, Clone)]
pub struct ContactDispatchServiceImpl<EmailJsApi> {
    emailjs_api: EmailJsApi,
    config: ContactDispatchServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactDispatchServiceConfig {
    pub emailjs: Arc<EmailJsCredentials>,
    /// Upper bound for a single delivery attempt.
    pub timeout: Duration,
}

impl<EmailJsApi> ContactDispatchServiceImpl<EmailJsApi> {
    pub fn new(emailjs_api: EmailJsApi, config: ContactDispatchServiceConfig) -> Self {
        Self {
            emailjs_api,
            config,
        }
    }
}

impl<EmailJsApi> ContactDispatchService for ContactDispatchServiceImpl<EmailJsApi>
where
    EmailJsApi: EmailJsApiService,
{
    async fn dispatch(&self, values: FormValues) -> Result<(), ContactDispatchError> {
        match values.channel {
            Some(Channel::Email) => self.send_email(values.into()).await,
            Some(channel @ Channel::Whatsapp) => {
                warn!(%channel, "Refusing to dispatch via unsupported channel");
                Err(ContactDispatchError::UnsupportedChannel(channel))
            }
            None => Err(ContactDispatchError::MissingChannel),
        }
    }
}

impl<EmailJsApi> ContactDispatchServiceImpl<EmailJsApi>
where
    EmailJsApi: EmailJsApiService,
{
    async fn send_email(&self, message: ContactMessage) -> Result<(), ContactDispatchError> {
        debug!(timeout = ?self.config.timeout, "Dispatching contact message via email");

        let send = self.emailjs_api.send(&self.config.emailjs, &message);
        let response = match tokio::time::timeout(self.config.timeout, send).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                error!("Failed to send contact message: {err:#}");
                return Err(err.into());
            }
            Err(_) => {
                warn!(timeout = ?self.config.timeout, "Sending contact message timed out");
                return Err(ContactDispatchError::Timeout(self.config.timeout));
            }
        };

        match response {
            EmailJsSendResponse::Sent => {
                debug!("Contact message sent");
                Ok(())
            }
            EmailJsSendResponse::Rejected { status, reason } => {
                warn!(status, reason = %reason, "Contact message was rejected");
                Err(ContactDispatchError::Rejected(reason))
            }
        }
    }
}
