//! Webhook HTTP server handlers
//!
//! Implements the ValidatingAdmissionWebhook HTTP endpoint for RHMIConfig resources.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

use super::policies::{ValidationContext, validate_all};
use crate::clock::{Clock, SystemClock};
use crate::crd::RHMIConfig;
use crate::health::HealthState;

/// Kubernetes AdmissionReview request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReview {
    pub api_version: String,
    pub kind: String,
    pub request: Option<AdmissionRequest>,
}

/// AdmissionRequest contains the details of the admission request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRequest {
    pub uid: String,
    pub kind: GroupVersionKind,
    pub resource: GroupVersionResource,
    pub operation: String,
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub object: Option<serde_json::Value>,
    pub old_object: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupVersionResource {
    pub group: String,
    pub version: String,
    pub resource: String,
}

/// AdmissionReview response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReviewResponse {
    pub api_version: String,
    pub kind: String,
    pub response: AdmissionResponse,
}

/// AdmissionResponse contains the result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResponse {
    pub uid: String,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AdmissionStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionStatus {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Shared state for webhook handlers
pub struct WebhookState {
    /// Source of "now" for upgrade date checks
    pub clock: Arc<dyn Clock>,
    /// Health state for recording admission metrics
    pub health: Option<Arc<HealthState>>,
}

impl WebhookState {
    pub fn new(clock: Arc<dyn Clock>, health: Option<Arc<HealthState>>) -> Self {
        Self { clock, health }
    }
}

impl Default for WebhookState {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), None)
    }
}

/// Create the webhook router
pub fn create_webhook_router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/validate", post(validate_rhmi_config))
        .with_state(state)
}

/// Validate RHMIConfig admission webhook handler
pub(crate) async fn validate_rhmi_config(
    State(state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview>,
) -> impl IntoResponse {
    let request = match review.request {
        Some(req) => req,
        None => {
            error!("Admission review missing request");
            return (
                StatusCode::BAD_REQUEST,
                Json(create_response(
                    "",
                    false,
                    "Missing request in AdmissionReview",
                    None,
                )),
            );
        }
    };

    let started = Instant::now();
    let uid = request.uid.clone();
    let operation = request.operation.clone();
    info!(
        uid = %uid,
        operation = %operation,
        namespace = ?request.namespace,
        name = ?request.name,
        "Processing RHMIConfig admission request"
    );

    let (allowed, message, reason) = review_request(&state, request);

    if let Some(health) = &state.health {
        health.metrics.record_admission(
            &operation,
            allowed,
            started.elapsed().as_secs_f64(),
        );
        if let Some(reason) = &reason {
            health.metrics.record_denial(reason);
        }
    }

    if allowed {
        info!(uid = %uid, "RHMIConfig admission request allowed");
    } else {
        warn!(
            uid = %uid,
            reason = ?reason,
            message = %message,
            "RHMIConfig admission request denied"
        );
    }

    (
        StatusCode::OK,
        Json(create_response(&uid, allowed, &message, reason.as_deref())),
    )
}

/// Decide a single admission request
///
/// Returns `(allowed, message, reason)`.
fn review_request(
    state: &WebhookState,
    request: AdmissionRequest,
) -> (bool, String, Option<String>) {
    // Only writes carry scheduling values worth checking
    if request.operation != "CREATE" && request.operation != "UPDATE" {
        return (true, String::new(), None);
    }

    let config: RHMIConfig = match request.object {
        Some(obj) => match serde_json::from_value(obj) {
            Ok(c) => c,
            Err(e) => {
                error!(error = %e, "Failed to parse RHMIConfig");
                return (false, format!("Failed to parse object: {}", e), None);
            }
        },
        None => return (false, "Missing object in request".to_string(), None),
    };

    // An UPDATE without its old object would pass for a CREATE
    let old_config: Option<RHMIConfig> = match (request.operation.as_str(), request.old_object) {
        ("UPDATE", Some(obj)) => match serde_json::from_value(obj) {
            Ok(c) => Some(c),
            Err(e) => {
                error!(error = %e, "Failed to parse old RHMIConfig");
                return (false, format!("Failed to parse old object: {}", e), None);
            }
        },
        ("UPDATE", None) => {
            return (false, "Missing old object in UPDATE request".to_string(), None);
        }
        _ => None,
    };

    let ctx = ValidationContext::new(&config, old_config.as_ref(), state.clock.as_ref());
    let result = validate_all(&ctx);

    if result.allowed {
        return (true, String::new(), None);
    }

    let reason = result
        .reason
        .unwrap_or_else(|| "ValidationFailed".to_string());
    let message = result
        .message
        .unwrap_or_else(|| "Validation failed".to_string());
    (false, message, Some(reason))
}

/// Create an AdmissionReview response
fn create_response(
    uid: &str,
    allowed: bool,
    message: &str,
    reason: Option<&str>,
) -> AdmissionReviewResponse {
    AdmissionReviewResponse {
        api_version: "admission.k8s.io/v1".to_string(),
        kind: "AdmissionReview".to_string(),
        response: AdmissionResponse {
            uid: uid.to_string(),
            allowed,
            status: if allowed {
                None
            } else {
                Some(AdmissionStatus {
                    code: 403,
                    message: message.to_string(),
                    reason: reason.map(String::from),
                })
            },
        },
    }
}

/// Default path to webhook TLS certificate
pub const WEBHOOK_CERT_PATH: &str = "/etc/webhook/certs/tls.crt";
/// Default path to webhook TLS private key
pub const WEBHOOK_KEY_PATH: &str = "/etc/webhook/certs/tls.key";
/// Default webhook server port
pub const WEBHOOK_PORT: u16 = 8443;

/// Run the webhook server with TLS
///
/// Binds to 0.0.0.0:8443 and serves the /validate endpoint. The health state,
/// if any, is marked ready once the listener is bound and not ready again when
/// the server stops.
///
/// # Arguments
/// * `state` - Clock and health state shared with the handlers
/// * `cert_path` - Path to TLS certificate file (PEM format)
/// * `key_path` - Path to TLS private key file (PEM format)
pub async fn run_webhook_server(
    state: WebhookState,
    cert_path: &str,
    key_path: &str,
) -> Result<(), WebhookError> {
    use axum_server::tls_rustls::RustlsConfig;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let health = state.health.clone();
    let app = create_webhook_router(Arc::new(state));

    let config = RustlsConfig::from_pem_file(PathBuf::from(cert_path), PathBuf::from(key_path))
        .await
        .map_err(|e| WebhookError::TlsConfig(e.to_string()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], WEBHOOK_PORT));
    let handle = axum_server::Handle::new();

    let ready_task = {
        let handle = handle.clone();
        let health = health.clone();
        tokio::spawn(async move {
            if let Some(bound) = handle.listening().await {
                info!("Webhook server listening on {} with TLS", bound);
                if let Some(health) = health {
                    health.set_ready(true).await;
                }
            }
        })
    };

    let result = axum_server::bind_rustls(addr, config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| WebhookError::Server(e.to_string()));

    ready_task.abort();
    if let Some(health) = health {
        health.set_ready(false).await;
    }

    result
}

/// Errors that can occur when running the webhook server
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    #[error("Webhook server error: {0}")]
    Server(String),
}
