//! Topology consistency validation.
//!
//! The validator walks the registered devices in insertion order and stops
//! at the first violation. Checks per device, in order:
//!
//! 1. the subnet is registered (a missing subnet counts as unknown)
//! 2. the VLAN is registered (skipped for devices without a VLAN)
//! 3. the zone is registered (a missing zone counts as unknown)
//! 4. no other device has the same name
//! 5. the device is not connected to itself
//! 6. at most `max_same_vlan_neighbors` direct neighbors share the device's
//!    VLAN (skipped for devices without a VLAN)
//!
//! With [`ValidatorOptions::legacy_vlan_exemption`] set, a device without a
//! VLAN skips every check instead of only the VLAN ones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::topology::{Device, DeviceId, Topology};

/// Classification of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    UnknownSubnet,
    UnknownVlan,
    UnknownZone,
    DuplicateName,
    SelfConnection,
    VlanFanOutViolation,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UnknownSubnet => "unknown subnet",
            Self::UnknownVlan => "unknown VLAN",
            Self::UnknownZone => "unknown zone",
            Self::DuplicateName => "duplicate name",
            Self::SelfConnection => "self connection",
            Self::VlanFanOutViolation => "VLAN fan-out violation",
        };
        f.write_str(label)
    }
}

/// First inconsistency found in a topology
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct Violation {
    pub kind: ViolationKind,
    pub device: DeviceId,
    pub device_name: String,
    pub detail: String,
}

impl Violation {
    fn new(kind: ViolationKind, device: &Device, detail: String) -> Self {
        Self {
            kind,
            device: device.id(),
            device_name: device.name().to_string(),
            detail,
        }
    }
}

/// Tunables for [`Validator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Skip every check for devices without a VLAN
    pub legacy_vlan_exemption: bool,
    /// Direct neighbors allowed to share a device's VLAN
    pub max_same_vlan_neighbors: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            legacy_vlan_exemption: false,
            max_same_vlan_neighbors: 1,
        }
    }
}

/// Single-pass, fail-fast topology checker
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate the topology, returning the first violation found
    pub fn validate(&self, topology: &Topology) -> Result<(), Violation> {
        for device in topology.devices() {
            if device.vlan().is_none() && self.options.legacy_vlan_exemption {
                log::debug!("Skipping {}: no VLAN (legacy exemption)", device.name());
                continue;
            }

            if let Err(violation) = self.check_device(topology, device) {
                log::warn!("Validation failed for {}: {}", violation.device_name, violation);
                return Err(violation);
            }
        }

        log::info!("Network configuration is valid.");
        Ok(())
    }

    fn check_device(&self, topology: &Topology, device: &Device) -> Result<(), Violation> {
        let name = device.name();

        if !device.subnet().map_or(false, |s| topology.has_subnet(s)) {
            return Err(Violation::new(
                ViolationKind::UnknownSubnet,
                device,
                format!("Device {} is not connected to a valid subnet.", name),
            ));
        }

        if let Some(vlan) = device.vlan() {
            if !topology.has_vlan(vlan) {
                return Err(Violation::new(
                    ViolationKind::UnknownVlan,
                    device,
                    format!("Device {} is not connected to a valid VLAN.", name),
                ));
            }
        }

        if !device.zone().map_or(false, |z| topology.has_zone(z)) {
            return Err(Violation::new(
                ViolationKind::UnknownZone,
                device,
                format!("Device {} is not connected to a valid zone.", name),
            ));
        }

        let same_name = topology.devices().iter().filter(|d| d.name() == name).count();
        if same_name > 1 {
            return Err(Violation::new(
                ViolationKind::DuplicateName,
                device,
                format!("Duplicate device name found - {}.", name),
            ));
        }

        if device.is_connected_to(device.id()) {
            return Err(Violation::new(
                ViolationKind::SelfConnection,
                device,
                format!("Device {} is connected to itself.", name),
            ));
        }

        if let Some(vlan) = device.vlan() {
            let same_vlan = topology
                .neighbors(device.id())
                .iter()
                .filter(|neighbor| neighbor.vlan() == Some(vlan))
                .count();
            if same_vlan > self.options.max_same_vlan_neighbors {
                return Err(Violation::new(
                    ViolationKind::VlanFanOutViolation,
                    device,
                    format!(
                        "Device {} is connected to {} devices in VLAN {}.",
                        name, same_vlan, vlan
                    ),
                ));
            }
        }

        Ok(())
    }
}

impl Topology {
    /// Validate with default options
    pub fn validate(&self) -> Result<(), Violation> {
        Validator::default().validate(self)
    }
}
