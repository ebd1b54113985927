use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::Ipv4Addr;

use crate::topology::{DeviceKind, GroupError, Subnet};
use crate::utils::validation::ValidatorOptions;

/// A topology scenario as described in YAML
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Seed for the address allocator. Random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub validation: ValidatorOptions,
    /// Subnets in `a.b.c.d/len` notation
    #[serde(default)]
    pub subnets: Vec<String>,
    #[serde(default)]
    pub vlans: Vec<String>,
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
    /// Undirected links between device names
    #[serde(default)]
    pub links: Vec<(String, String)>,
}

/// One device entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeviceConfig {
    pub name: String,
    pub kind: DeviceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid subnet '{value}': {source}")]
    InvalidSubnet {
        value: String,
        #[source]
        source: GroupError,
    },
    #[error("Subnet '{value}' has host bits set (network address is {network})")]
    HostBitsSet { value: String, network: String },
    #[error("{category} '{name}' is declared more than once")]
    DuplicateGroup { category: &'static str, name: String },
    #[error("Device '{device}' references undeclared {category} '{name}'")]
    UndeclaredGroup {
        device: String,
        category: &'static str,
        name: String,
    },
    #[error("Link endpoint '{0}' is not a declared device")]
    UnknownLinkEndpoint(String),
    #[error("Invalid device configuration: {0}")]
    InvalidDevice(String),
    #[error("Invalid validation configuration: {0}")]
    InvalidValidation(String),
}

impl Config {
    /// Validate the configuration.
    ///
    /// Duplicate device names are accepted here; they are a topology-level
    /// validation outcome.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for value in &self.subnets {
            let subnet = value.parse::<Subnet>().map_err(|source| ConfigError::InvalidSubnet {
                value: value.clone(),
                source,
            })?;

            // Subnets are referenced by their literal text, so it must already be the network address
            let given = value
                .trim()
                .split_once('/')
                .and_then(|(addr, _)| addr.parse::<Ipv4Addr>().ok());
            if given != Some(subnet.network()) {
                return Err(ConfigError::HostBitsSet {
                    value: value.clone(),
                    network: subnet.to_string(),
                });
            }
        }

        let subnets = Self::declared("subnet", &self.subnets)?;
        let vlans = Self::declared("VLAN", &self.vlans)?;
        let zones = Self::declared("zone", &self.zones)?;

        if self.validation.max_same_vlan_neighbors == 0 {
            return Err(ConfigError::InvalidValidation(
                "max_same_vlan_neighbors must be at least 1".to_string(),
            ));
        }

        for device in &self.devices {
            if device.name.trim().is_empty() {
                return Err(ConfigError::InvalidDevice("device name cannot be empty".to_string()));
            }
            Self::check_reference(&device.name, "subnet", device.subnet.as_deref(), &subnets)?;
            Self::check_reference(&device.name, "VLAN", device.vlan.as_deref(), &vlans)?;
            Self::check_reference(&device.name, "zone", device.zone.as_deref(), &zones)?;
        }

        let device_names: HashSet<&str> = self.devices.iter().map(|d| d.name.as_str()).collect();
        for (a, b) in &self.links {
            for endpoint in [a, b] {
                if !device_names.contains(endpoint.as_str()) {
                    return Err(ConfigError::UnknownLinkEndpoint(endpoint.clone()));
                }
            }
        }

        Ok(())
    }

    fn declared<'a>(category: &'static str, names: &'a [String]) -> Result<HashSet<&'a str>, ConfigError> {
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateGroup {
                    category,
                    name: name.clone(),
                });
            }
        }
        Ok(seen)
    }

    fn check_reference(
        device: &str,
        category: &'static str,
        reference: Option<&str>,
        declared: &HashSet<&str>,
    ) -> Result<(), ConfigError> {
        match reference {
            Some(name) if !declared.contains(name) => Err(ConfigError::UndeclaredGroup {
                device: device.to_string(),
                category,
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
