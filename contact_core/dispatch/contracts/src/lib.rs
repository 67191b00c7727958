use std::{future::Future, time::Duration};

use contact_models::form::{Channel, FormValues};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactDispatchService: Send + Sync + 'static {
    /// Deliver the values of a validated contact form through the channel
    /// selected in `values`.
    ///
    /// Makes exactly one delivery attempt.
    fn dispatch(
        &self,
        values: FormValues,
    ) -> impl Future<Output = Result<(), ContactDispatchError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactDispatchError {
    #[error("No contact method has been selected.")]
    MissingChannel,
    #[error("Sending messages via {0} is not supported.")]
    UnsupportedChannel(Channel),
    #[error("The message was rejected by the email service: {0}")]
    Rejected(String),
    #[error("The email service did not respond within {0:?}.")]
    Timeout(Duration),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactDispatchService {
    pub fn with_dispatch(
        mut self,
        values: FormValues,
        result: Result<(), ContactDispatchError>,
    ) -> Self {
        self.expect_dispatch()
            .once()
            .with(mockall::predicate::eq(values))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
