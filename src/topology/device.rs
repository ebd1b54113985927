//! Network devices and their adjacency sets.

use std::collections::BTreeSet;
use std::net::{Ipv4Addr, Ipv6Addr};

use super::types::{DeviceId, DeviceKind, Subnet, Vlan, Zone};
use crate::ip::{AddressAllocator, DeviceAddresses};

/// Group memberships of a device. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct Membership {
    pub subnet: Option<Subnet>,
    pub vlan: Option<Vlan>,
    pub zone: Option<Zone>,
}

impl Membership {
    pub fn new(subnet: Subnet, vlan: Vlan, zone: Zone) -> Self {
        Self {
            subnet: Some(subnet),
            vlan: Some(vlan),
            zone: Some(zone),
        }
    }
}

/// Symmetric connect/disconnect capability shared by every device kind
pub trait Connectable {
    /// Add a symmetric edge to `other`
    fn connect(&mut self, other: &mut Self);

    /// Remove the symmetric edge to `other`, if any
    fn disconnect_from(&mut self, other: &mut Self);
}

/// A node of the topology graph
#[derive(Debug, Clone)]
pub struct Device {
    id: DeviceId,
    name: String,
    kind: DeviceKind,
    addresses: DeviceAddresses,
    membership: Membership,
    connections: BTreeSet<DeviceId>,
}

impl Device {
    /// Create a device, drawing its addresses from `allocator`
    pub fn new(
        name: impl Into<String>,
        kind: DeviceKind,
        membership: Membership,
        allocator: &mut AddressAllocator,
    ) -> Self {
        let name = name.into();
        let addresses = allocator.allocate(membership.subnet.as_ref(), &name);
        Self::with_addresses(name, kind, membership, addresses)
    }

    /// Create a device with caller-supplied addresses
    pub fn with_addresses(
        name: impl Into<String>,
        kind: DeviceKind,
        membership: Membership,
        addresses: DeviceAddresses,
    ) -> Self {
        Self {
            id: DeviceId::next(),
            name: name.into(),
            kind,
            addresses,
            membership,
            connections: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn ipv4(&self) -> Ipv4Addr {
        self.addresses.ipv4
    }

    pub fn ipv6(&self) -> Ipv6Addr {
        self.addresses.ipv6
    }

    pub fn subnet(&self) -> Option<&Subnet> {
        self.membership.subnet.as_ref()
    }

    pub fn vlan(&self) -> Option<&Vlan> {
        self.membership.vlan.as_ref()
    }

    pub fn zone(&self) -> Option<&Zone> {
        self.membership.zone.as_ref()
    }

    /// Ids of directly connected devices, in ascending id order
    pub fn connections(&self) -> impl Iterator<Item = DeviceId> + '_ {
        self.connections.iter().copied()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_connected_to(&self, other: DeviceId) -> bool {
        self.connections.contains(&other)
    }

    /// Add `other` to this device's own set only
    pub(crate) fn add_connection(&mut self, other: DeviceId) {
        self.connections.insert(other);
    }

    /// Remove `other` from this device's own set only. The caller is
    /// responsible for the reverse direction.
    pub fn remove_connection(&mut self, other: DeviceId) -> bool {
        self.connections.remove(&other)
    }

    pub(crate) fn clear_connections(&mut self) {
        self.connections.clear();
    }
}

impl Connectable for Device {
    fn connect(&mut self, other: &mut Device) {
        self.add_connection(other.id);
        other.add_connection(self.id);
    }

    fn disconnect_from(&mut self, other: &mut Device) {
        self.remove_connection(other.id);
        other.remove_connection(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, kind: DeviceKind) -> Device {
        let mut allocator = AddressAllocator::from_seed(5);
        Device::new(name, kind, Membership::default(), &mut allocator)
    }

    #[test]
    fn test_connect_is_symmetric_and_idempotent() {
        let mut pc = device("PC1", DeviceKind::Pc);
        let mut switch = device("Switch1", DeviceKind::Switch);

        pc.connect(&mut switch);
        pc.connect(&mut switch);
        switch.connect(&mut pc);

        assert!(pc.is_connected_to(switch.id()));
        assert!(switch.is_connected_to(pc.id()));
        assert_eq!(pc.connection_count(), 1);
        assert_eq!(switch.connections().collect::<Vec<_>>(), vec![pc.id()]);
    }

    #[test]
    fn test_disconnect_from() {
        let mut router = device("Router1", DeviceKind::Router);
        let mut rpi = device("RPi1", DeviceKind::RaspberryPi);

        router.connect(&mut rpi);
        rpi.disconnect_from(&mut router);
        assert!(!router.is_connected_to(rpi.id()));
        assert!(!rpi.is_connected_to(router.id()));

        // No edge left: still a no-op
        rpi.disconnect_from(&mut router);
        assert_eq!(router.connection_count(), 0);
    }

    #[test]
    fn test_remove_connection_is_one_sided() {
        let mut a = device("A", DeviceKind::Pc);
        let mut b = device("B", DeviceKind::Pc);

        a.connect(&mut b);
        assert!(a.remove_connection(b.id()));
        assert!(!a.is_connected_to(b.id()));
        assert!(b.is_connected_to(a.id()));
        assert!(!a.remove_connection(b.id()));
    }

    #[test]
    fn test_ipv4_drawn_from_subnet() {
        let subnet: Subnet = "192.168.2.0/24".parse().unwrap();
        let mut allocator = AddressAllocator::from_seed(8);
        let membership = Membership::new(subnet.clone(), Vlan::new("VLAN2"), Zone::new("Zone2"));
        let rpi = Device::new("RPi1", DeviceKind::RaspberryPi, membership, &mut allocator);

        assert!(subnet.contains(rpi.ipv4()));
        assert_eq!(rpi.subnet(), Some(&subnet));
        assert_eq!(rpi.ipv6().octets()[0], 0xfd);
    }
}
