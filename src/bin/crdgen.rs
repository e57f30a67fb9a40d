//! Prints the RHMIConfig CustomResourceDefinition as YAML

use kube::CustomResourceExt;
use rhmi_config_operator::RHMIConfig;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&RHMIConfig::crd())?);
    Ok(())
}
