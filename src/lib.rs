//! # netdevmgr - In-memory network topology model with consistency checks
//!
//! This library models a small logical network as a graph: devices (PCs,
//! Raspberry Pis, switches, routers) grouped by subnet, VLAN and security
//! zone, and connected by undirected links.
//!
//! ## Overview
//!
//! Groups and devices are built independently and then registered into a
//! [`topology::Topology`]. Registration never checks anything: a device may
//! reference an unregistered group, two devices may share a name, and a
//! device may even be connected to itself. The validator in
//! [`utils::validation`] walks the topology and reports the first such
//! inconsistency.
//!
//! ## Architecture
//!
//! - `topology`: groups, devices, the connection graph and membership queries
//! - `utils::validation`: the fail-fast consistency checker
//! - `ip`: IPv4/IPv6 address allocation for new devices
//! - `report`: text and JSON renderings of devices and the graph
//! - `config`: YAML scenario structures and their validation
//! - `config_loader`: scenario file loading
//! - `orchestrator`: building a topology from a scenario
//!
//! ## Example Usage
//!
//! ```rust
//! use netdevmgr::ip::AddressAllocator;
//! use netdevmgr::topology::{Device, DeviceKind, Membership, Subnet, Topology, Vlan, Zone};
//!
//! let subnet: Subnet = "192.168.1.0/24".parse()?;
//! let vlan = Vlan::new("VLAN1");
//! let zone = Zone::new("Zone1");
//!
//! let mut topology = Topology::new();
//! topology.add_subnet(subnet.clone());
//! topology.add_vlan(vlan.clone());
//! topology.add_zone(zone.clone());
//!
//! let mut allocator = AddressAllocator::from_seed(42);
//! let membership = Membership::new(subnet, vlan, zone);
//! let pc1 = topology.add_device(Device::new("PC1", DeviceKind::Pc, membership.clone(), &mut allocator));
//! let pc2 = topology.add_device(Device::new("PC2", DeviceKind::Pc, membership, &mut allocator));
//! topology.connect_devices(pc1, pc2)?;
//!
//! assert!(topology.validate().is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library types report failures through `thiserror` enums
//! ([`utils::validation::Violation`], [`topology::TopologyError`],
//! [`config::ConfigError`]). Scenario loading and building return
//! `color_eyre::Result` with context attached.

pub mod config;
pub mod config_loader;
pub mod ip;
pub mod orchestrator;
pub mod report;
pub mod topology;
pub mod utils;
