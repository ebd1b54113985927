//! Network topology module.
//!
//! This module contains the topology model: group identifiers, devices with
//! their adjacency sets, and the [`Topology`] aggregate with its mutation
//! and query operations.

pub mod types;
pub mod device;
pub mod network;
pub mod connections;

// Re-export key types for easier access
pub use types::{DeviceId, DeviceKind, GroupError, GroupId, Subnet, Vlan, Zone};
pub use device::{Connectable, Device, Membership};
pub use network::{Topology, TopologyError};
