//! Topology type definitions.
//!
//! Group identifiers (Subnet, VLAN, Zone), device identities and device
//! kinds. Groups compare by identity: every constructed group gets a fresh
//! [`GroupId`], and clones share it.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_DEVICE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    fn next() -> Self {
        GroupId(NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Process-unique identity of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(u64);

impl DeviceId {
    pub(crate) fn next() -> Self {
        DeviceId(NEXT_DEVICE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised while constructing groups
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("Invalid prefix length /{0} (must be 0-32)")]
    InvalidPrefix(u8),

    #[error("Invalid subnet notation '{0}' (expected a.b.c.d/len)")]
    InvalidNotation(String),
}

/// An IPv4 subnet a device may belong to
#[derive(Debug, Clone)]
pub struct Subnet {
    id: GroupId,
    network: Ipv4Addr,
    prefix_len: u8,
}

impl Subnet {
    /// Create a new subnet. Host bits of `network` are cleared.
    pub fn new(network: Ipv4Addr, prefix_len: u8) -> Result<Self, GroupError> {
        if prefix_len > 32 {
            return Err(GroupError::InvalidPrefix(prefix_len));
        }
        let masked = u32::from(network) & prefix_mask(prefix_len);
        Ok(Self {
            id: GroupId::next(),
            network: Ipv4Addr::from(masked),
            prefix_len,
        })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Netmask as a 32-bit value
    pub fn mask(&self) -> u32 {
        prefix_mask(self.prefix_len)
    }

    /// Number of host bits in the subnet
    pub fn host_bits(&self) -> u32 {
        32 - u32::from(self.prefix_len)
    }

    /// Check whether an address falls inside this subnet
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & self.mask() == u32::from(self.network)
    }
}

fn prefix_mask(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        len => u32::MAX << (32 - u32::from(len)),
    }
}

impl FromStr for Subnet {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GroupError::InvalidNotation(s.to_string());
        let (addr, len) = s.trim().split_once('/').ok_or_else(invalid)?;
        let network = addr.parse::<Ipv4Addr>().map_err(|_| invalid())?;
        let prefix_len = len.parse::<u8>().map_err(|_| invalid())?;
        Subnet::new(network, prefix_len)
    }
}

impl PartialEq for Subnet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Subnet {}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// A VLAN (broadcast domain) a device may belong to
#[derive(Debug, Clone)]
pub struct Vlan {
    id: GroupId,
    name: String,
}

impl Vlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::next(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Vlan {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vlan {}

impl fmt::Display for Vlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A security zone a device may belong to
#[derive(Debug, Clone)]
pub struct Zone {
    id: GroupId,
    name: String,
}

impl Zone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::next(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Zone {}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Kind of network device. Informational only: every kind connects the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Pc,
    #[serde(rename = "rpi", alias = "raspberrypi")]
    RaspberryPi,
    Switch,
    Router,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pc => "PC",
            Self::RaspberryPi => "RPi",
            Self::Switch => "Switch",
            Self::Router => "Router",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_compare_by_identity() {
        let a = Vlan::new("VLAN1");
        let b = Vlan::new("VLAN1");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());

        let z1 = Zone::new("Zone1");
        let z2 = Zone::new("Zone1");
        assert_ne!(z1, z2);
    }

    #[test]
    fn test_same_prefix_subnets_are_distinct() {
        let a: Subnet = "192.168.1.0/24".parse().unwrap();
        let b: Subnet = "192.168.1.0/24".parse().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_subnet_parsing() {
        let subnet: Subnet = "10.1.2.3/16".parse().unwrap();
        assert_eq!(subnet.network(), Ipv4Addr::new(10, 1, 0, 0));
        assert_eq!(subnet.prefix_len(), 16);
        assert_eq!(subnet.to_string(), "10.1.0.0/16");
        assert!(subnet.contains(Ipv4Addr::new(10, 1, 200, 7)));
        assert!(!subnet.contains(Ipv4Addr::new(10, 2, 0, 1)));

        assert_eq!(
            "10.0.0.0/33".parse::<Subnet>().unwrap_err(),
            GroupError::InvalidPrefix(33)
        );
        assert!(matches!(
            "10.0.0.0".parse::<Subnet>(),
            Err(GroupError::InvalidNotation(_))
        ));
        assert!(matches!(
            "10.0.0/24".parse::<Subnet>(),
            Err(GroupError::InvalidNotation(_))
        ));
    }

    #[test]
    fn test_zero_prefix_subnet_contains_everything() {
        let any = Subnet::new(Ipv4Addr::new(1, 2, 3, 4), 0).unwrap();
        assert_eq!(any.network(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(any.host_bits(), 32);
        assert!(any.contains(Ipv4Addr::new(203, 0, 113, 9)));
    }

    #[test]
    fn test_device_kind_labels() {
        assert_eq!(DeviceKind::RaspberryPi.to_string(), "RPi");
        let kind: DeviceKind = serde_yaml::from_str("rpi").unwrap();
        assert_eq!(kind, DeviceKind::RaspberryPi);
        let kind: DeviceKind = serde_yaml::from_str("router").unwrap();
        assert_eq!(kind, DeviceKind::Router);
    }
}
