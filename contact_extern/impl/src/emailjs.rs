use std::sync::Arc;

use anyhow::Context;
use contact_extern_contracts::emailjs::{EmailJsApiService, EmailJsSendResponse};
use contact_models::{contact::ContactMessage, emailjs::EmailJsCredentials};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::http::HttpClient;

/// https://www.emailjs.com/docs/rest-api/send/
const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceImpl {
    config: EmailJsApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceConfig {
    send_endpoint: Arc<Url>,
}

impl EmailJsApiServiceConfig {
    pub fn new(send_endpoint_override: Option<Url>) -> Self {
        Self {
            send_endpoint: send_endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
        }
    }

    pub fn send_endpoint(&self) -> &Url {
        &self.send_endpoint
    }
}

impl EmailJsApiServiceImpl {
    pub fn new(config: EmailJsApiServiceConfig) -> Self {
        Self {
            config,
            http: HttpClient::default(),
        }
    }
}

impl EmailJsApiService for EmailJsApiServiceImpl {
    async fn send(
        &self,
        credentials: &EmailJsCredentials,
        template_params: &ContactMessage,
    ) -> anyhow::Result<EmailJsSendResponse> {
        let request = SendRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.account_id,
            access_token: credentials.access_token.as_deref().map(String::as_str),
            template_params,
        };

        debug!(
            endpoint = %self.config.send_endpoint,
            service_id = request.service_id,
            template_id = request.template_id,
            "Sending emailjs request"
        );

        let response = self
            .http
            .post((*self.config.send_endpoint).clone())
            .json(&request)
            .send()
            .await
            .context("Failed to send emailjs request")?;

        let status = response.status();
        let reason = response
            .text()
            .await
            .context("Failed to read emailjs response")?;
        trace!(%status, reason = %reason, "Received emailjs response");

        Ok(if status.is_success() {
            EmailJsSendResponse::Sent
        } else {
            EmailJsSendResponse::Rejected {
                status: status.as_u16(),
                reason,
            }
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a ContactMessage,
}
