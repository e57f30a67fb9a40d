pub mod clock;
pub mod crd;
pub mod health;
pub mod registration;
pub mod validation;
pub mod webhooks;

pub use clock::{Clock, FixedClock, SystemClock};
pub use crd::{RHMIConfig, RHMIConfigSpec, RHMIConfigStatus};
pub use health::{HealthState, Metrics};
pub use registration::{RegistrationError, register_crd};
pub use validation::{ValidationError, validate_backup_and_maintenance, validate_upgrade_apply_on};
pub use webhooks::{
    WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, WEBHOOK_PORT, WebhookError, WebhookState,
    run_webhook_server,
};
