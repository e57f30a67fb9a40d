//! Admission webhooks for RHMIConfig validation
//!
//! This module implements a ValidatingAdmissionWebhook that rejects
//! RHMIConfig writes whose scheduling values are malformed or conflicting,
//! before they are persisted to etcd.

pub mod policies;
mod server;

pub use policies::{ValidationContext, ValidationResult, validate_all};
pub use server::{
    AdmissionRequest, AdmissionResponse, AdmissionReview, AdmissionReviewResponse, WEBHOOK_CERT_PATH,
    WEBHOOK_KEY_PATH, WEBHOOK_PORT, WebhookError, WebhookState, create_webhook_router,
    run_webhook_server,
};
