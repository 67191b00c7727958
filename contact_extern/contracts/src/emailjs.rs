use std::future::Future;

use contact_models::{contact::ContactMessage, emailjs::EmailJsCredentials};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailJsApiService: Send + Sync + 'static {
    /// Send a message through the email service and template identified by
    /// `credentials`, using the message fields as template parameters.
    ///
    /// Returns an error only if no response could be obtained.
    fn send(
        &self,
        credentials: &EmailJsCredentials,
        template_params: &ContactMessage,
    ) -> impl Future<Output = anyhow::Result<EmailJsSendResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailJsSendResponse {
    Sent,
    /// The api answered with a non-success status.
    Rejected { status: u16, reason: String },
}

#[cfg(feature = "mock")]
impl MockEmailJsApiService {
    pub fn with_send(
        mut self,
        credentials: EmailJsCredentials,
        template_params: ContactMessage,
        result: EmailJsSendResponse,
    ) -> Self {
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(credentials),
                mockall::predicate::eq(template_params),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, error: &'static str) -> Self {
        self.expect_send()
            .once()
            .return_once(move |_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(error))))
            });
        self
    }

    /// Expect a single request that never gets a response.
    pub fn with_send_pending(mut self) -> Self {
        self.expect_send()
            .once()
            .return_once(|_, _| {
                Box::pin(std::future::pending::<anyhow::Result<EmailJsSendResponse>>())
            });
        self
    }
}
