//! One-time RHMIConfig CRD registration at startup

use std::time::Duration;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::{Patch, PatchParams};
use kube::runtime::wait::{await_condition, conditions};
use kube::{Api, Client, CustomResourceExt, ResourceExt};
use thiserror::Error;

use crate::crd::RHMIConfig;

/// Field manager used for the server-side apply
pub const FIELD_MANAGER: &str = "rhmi-config-operator";

/// How long to wait for the CRD to become established
pub const ESTABLISH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("CRD establishment timeout")]
    EstablishmentTimeout,

    #[error("Wait error: {0}")]
    WaitError(#[from] kube::runtime::wait::Error),
}

/// Install or update the RHMIConfig CRD and wait until it is established
pub async fn register_crd(client: Client) -> Result<(), RegistrationError> {
    let crd = RHMIConfig::crd();
    let name = crd.name_any();

    let crds: Api<CustomResourceDefinition> = Api::all(client);
    let params = PatchParams::apply(FIELD_MANAGER).force();

    tracing::info!(crd = %name, "Applying RHMIConfig CRD");
    crds.patch(&name, &params, &Patch::Apply(&crd)).await?;

    let establish = await_condition(crds, &name, conditions::is_crd_established());

    tokio::time::timeout(ESTABLISH_TIMEOUT, establish)
        .await
        .map_err(|_| RegistrationError::EstablishmentTimeout)??;

    tracing::info!(crd = %name, "RHMIConfig CRD established");
    Ok(())
}
