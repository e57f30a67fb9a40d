//! Admission webhook policies
//!
//! Each policy module exports a `validate` function that checks specific rules.

pub mod upgrade;
pub mod windows;

pub use upgrade::validate_upgrade_schedule;
pub use windows::validate_windows;

use crate::clock::Clock;
use crate::crd::RHMIConfig;
use crate::validation::ValidationError;

/// Result of a policy validation
#[derive(Debug)]
pub struct ValidationResult {
    pub allowed: bool,
    pub reason: Option<String>,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
            message: None,
        }
    }

    pub fn denied(reason: &str, message: &str) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.to_string()),
            message: Some(message.to_string()),
        }
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => ValidationResult::allowed(),
            Err(e) => ValidationResult::denied(e.reason(), &e.to_string()),
        }
    }
}

/// Context for validation including old object for UPDATE operations
pub struct ValidationContext<'a> {
    pub config: &'a RHMIConfig,
    pub old_config: Option<&'a RHMIConfig>,
    pub clock: &'a dyn Clock,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        config: &'a RHMIConfig,
        old_config: Option<&'a RHMIConfig>,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            config,
            old_config,
            clock,
        }
    }

    /// Check if this is a CREATE operation (no old object)
    pub fn is_create(&self) -> bool {
        self.old_config.is_none()
    }
}

/// Run all validation policies and return the first failure
pub fn validate_all(ctx: &ValidationContext) -> ValidationResult {
    let policies: [fn(&ValidationContext) -> ValidationResult; 2] =
        [validate_windows, validate_upgrade_schedule];

    for policy in policies {
        let result = policy(ctx);
        if !result.allowed {
            return result;
        }
    }

    ValidationResult::allowed()
}
