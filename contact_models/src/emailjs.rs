use crate::Sensitive;

/// Identifies the EmailJS account, email service and template a message is
/// delivered through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsCredentials {
    pub service_id: String,
    pub template_id: String,
    /// Public key of the account, sent as `user_id`.
    pub account_id: String,
    /// Private key, required if the account enforces it for API calls.
    pub access_token: Option<Sensitive<String>>,
}
