mod rhmi_config;

pub use rhmi_config::*;
