use std::{
    net::IpAddr,
    sync::{Arc, Mutex},
};

use anyhow::Context;
use axum::{extract::State, http::StatusCode, routing, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::info;

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsTestingConfig {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
}

/// A request accepted by the testing server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SentEmail {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    pub template_params: serde_json::Map<String, serde_json::Value>,
}

/// Requests accepted by a testing server, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Inbox(Arc<Mutex<Vec<SentEmail>>>);

impl Inbox {
    pub fn emails(&self) -> Vec<SentEmail> {
        self.lock().clone()
    }

    fn push(&self, email: SentEmail) {
        self.lock().push(email);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SentEmail>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<EmailJsTestingConfig>,
    inbox: Inbox,
}

pub fn router(config: EmailJsTestingConfig, inbox: Inbox) -> Router {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .with_state(AppState {
            config: config.into(),
            inbox,
        })
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    config: EmailJsTestingConfig,
) -> anyhow::Result<()> {
    info!("Starting emailjs testing server on {host}:{port}");
    info!("Send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!(
        "Accepted credentials: service_id={:?}, template_id={:?}, user_id={:?}",
        config.service_id, config.template_id, config.user_id
    );

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    serve(listener, config, Inbox::default()).await
}

/// Serve the testing api on an already bound listener.
pub async fn serve(
    listener: TcpListener,
    config: EmailJsTestingConfig,
    inbox: Inbox,
) -> anyhow::Result<()> {
    axum::serve(listener, router(config, inbox))
        .await
        .context("Failed to start HTTP server")
}

async fn send(
    State(state): State<AppState>,
    Json(email): Json<SentEmail>,
) -> (StatusCode, &'static str) {
    let config = &*state.config;
    if email.user_id != config.user_id {
        return (StatusCode::BAD_REQUEST, "The Public Key is invalid");
    }
    if email.service_id != config.service_id {
        return (StatusCode::BAD_REQUEST, "The service ID is invalid");
    }
    if email.template_id != config.template_id {
        return (StatusCode::BAD_REQUEST, "The template ID not found");
    }

    info!(template_params = ?email.template_params, "Accepted email");
    state.inbox.push(email);

    (StatusCode::OK, "OK")
}
