use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse a scenario from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    // Open the configuration file
    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    // Parse YAML
    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    // Validate the configuration
    config.validate()?;

    info!(
        "Loaded {} devices, {} links ({} subnets, {} VLANs, {} zones)",
        config.devices.len(),
        config.links.len(),
        config.subnets.len(),
        config.vlans.len(),
        config.zones.len()
    );

    Ok(config)
}

/// Parse and validate a scenario from a YAML string
pub fn parse_config(yaml: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml).wrap_err("Failed to parse configuration")?;
    config.validate()?;
    Ok(config)
}
