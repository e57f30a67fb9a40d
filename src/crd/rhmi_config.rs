//! RHMIConfig CRD definition
//!
//! An RHMIConfig holds the customer's scheduling preferences for the managed
//! installation: when upgrades may be applied, and the weekly maintenance and
//! daily backup windows. All times are UTC.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Layout of `spec.upgrade.applyOn`, written the way users see it in messages
pub const DATE_FORMAT: &str = "2 Jan 2006 15:04";

/// Layout of `spec.backup.applyOn`
pub const TIME_FORMAT: &str = "HH:mm";

/// Layout of `spec.maintenance.applyFrom`
pub const DAY_TIME_FORMAT: &str = "DDD HH:mm";

/// RHMIConfig is the Schema for the rhmiconfigs API
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, JsonSchema, PartialEq)]
#[kube(
    group = "integreatly.org",
    version = "v1alpha1",
    kind = "RHMIConfig",
    plural = "rhmiconfigs",
    namespaced,
    status = "RHMIConfigStatus",
    printcolumn = r#"{"name":"Maintenance", "type":"string", "jsonPath":".spec.maintenance.applyFrom"}"#,
    printcolumn = r#"{"name":"Backup", "type":"string", "jsonPath":".spec.backup.applyOn"}"#,
    printcolumn = r#"{"name":"Upgrade", "type":"string", "jsonPath":".spec.upgrade.applyOn"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct RHMIConfigSpec {
    /// Upgrade policy
    #[serde(default)]
    pub upgrade: Upgrade,

    /// Weekly maintenance window
    #[serde(default)]
    pub maintenance: Maintenance,

    /// Daily backup window
    #[serde(default)]
    pub backup: Backup,
}

/// Upgrade policy
#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    /// Comma separated list of contacts, e.g. "user1@example.com,user2@example.com"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contacts: String,

    /// Apply an upgrade as soon as it is available, whether service affecting or not.
    /// Takes precedence over all other options.
    #[serde(default)]
    pub always_immediately: bool,

    /// Apply an upgrade within the next maintenance window.
    /// Takes precedence over `applyOn`.
    #[serde(default)]
    pub during_next_maintenance: bool,

    /// Date to apply the upgrade on, e.g. "12 Jan 1980 23:00" (UTC).
    /// Reset to blank once the upgrade has completed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub apply_on: String,
}

/// Maintenance window configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    /// Start of the one hour maintenance window, e.g. "sun 23:00" (UTC)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub apply_from: String,
}

/// Backup window configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Start of the daily one hour backup window, e.g. "20:00" (UTC)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub apply_on: String,
}

/// Observed state of an RHMIConfig
///
/// Mirrors the spec values that were last accepted.
#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RHMIConfigStatus {
    #[serde(default)]
    pub maintenance: RHMIConfigStatusMaintenance,

    #[serde(default)]
    pub upgrade: RHMIConfigStatusUpgrade,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RHMIConfigStatusMaintenance {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub apply_from: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RHMIConfigStatusUpgrade {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub window: String,
}
