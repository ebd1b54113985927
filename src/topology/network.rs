//! The topology aggregate: registered groups and devices, plus membership
//! queries.
//!
//! Registration never checks anything. A device may reference groups that
//! were never added, and several devices may share a name; the validator
//! reports those states.

use super::device::Device;
use super::types::{DeviceId, Subnet, Vlan, Zone};

/// Errors raised by graph mutations that touch unregistered devices
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Device {0} is not registered in the topology")]
    UnknownDevice(DeviceId),
}

/// In-memory network topology
#[derive(Debug, Default)]
pub struct Topology {
    subnets: Vec<Subnet>,
    vlans: Vec<Vlan>,
    zones: Vec<Zone>,
    pub(super) devices: Vec<Device>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_subnet(&mut self, subnet: Subnet) {
        log::debug!("Registering subnet {}", subnet);
        self.subnets.push(subnet);
    }

    pub fn add_vlan(&mut self, vlan: Vlan) {
        log::debug!("Registering VLAN {}", vlan);
        self.vlans.push(vlan);
    }

    pub fn add_zone(&mut self, zone: Zone) {
        log::debug!("Registering zone {}", zone);
        self.zones.push(zone);
    }

    /// Register a device and return its id
    pub fn add_device(&mut self, device: Device) -> DeviceId {
        let id = device.id();
        log::debug!("Registering device {} ({})", device.name(), id);
        self.devices.push(device);
        id
    }

    pub fn subnets(&self) -> &[Subnet] {
        &self.subnets
    }

    pub fn vlans(&self) -> &[Vlan] {
        &self.vlans
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Registered devices in insertion order
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn has_subnet(&self, subnet: &Subnet) -> bool {
        self.subnets.contains(subnet)
    }

    pub fn has_vlan(&self, vlan: &Vlan) -> bool {
        self.vlans.contains(vlan)
    }

    pub fn has_zone(&self, zone: &Zone) -> bool {
        self.zones.contains(zone)
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id() == id)
    }

    pub(super) fn position(&self, id: DeviceId) -> Result<usize, TopologyError> {
        self.devices
            .iter()
            .position(|d| d.id() == id)
            .ok_or(TopologyError::UnknownDevice(id))
    }

    /// First device whose name matches exactly
    pub fn device_by_name(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name() == name)
    }

    /// First device whose name matches ignoring ASCII case
    pub fn find_device_ignore_case(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name().eq_ignore_ascii_case(name))
    }

    pub fn devices_in_subnet(&self, subnet: &Subnet) -> Vec<&Device> {
        self.devices
            .iter()
            .filter(|d| d.subnet() == Some(subnet))
            .collect()
    }

    pub fn devices_in_vlan(&self, vlan: &Vlan) -> Vec<&Device> {
        self.devices
            .iter()
            .filter(|d| d.vlan() == Some(vlan))
            .collect()
    }

    pub fn devices_in_zone(&self, zone: &Zone) -> Vec<&Device> {
        self.devices
            .iter()
            .filter(|d| d.zone() == Some(zone))
            .collect()
    }
}
