//! Report generation for topologies.
//!
//! Produces the human-readable graph listing, per-device detail blocks and
//! a JSON summary. Everything here goes through the public accessors of
//! [`Topology`] and [`Device`].

use std::fmt::Display;
use std::net::{Ipv4Addr, Ipv6Addr};

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::topology::{Device, DeviceId, DeviceKind, Topology};

fn or_dash<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Multi-line description of one device
pub fn device_info(topology: &Topology, device: &Device) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{} - {}", device.kind(), device.name()));
    lines.push(format!("   IPv4: {}", device.ipv4()));
    lines.push(format!("   IPv6: {}", device.ipv6()));
    lines.push(format!("   Subnet: {}", or_dash(device.subnet())));
    lines.push(format!("   VLAN: {}", or_dash(device.vlan())));
    lines.push(format!("   Zone: {}", or_dash(device.zone())));

    let neighbors: Vec<&str> = topology
        .neighbors(device.id())
        .into_iter()
        .map(Device::name)
        .collect();
    if neighbors.is_empty() {
        lines.push("   Connections: -".to_string());
    } else {
        lines.push(format!("   Connections: {}", neighbors.join(", ")));
    }

    lines.join("\n")
}

/// Detail block for a device looked up by name, ignoring case
pub fn device_info_by_name(topology: &Topology, name: &str) -> String {
    match topology.find_device_ignore_case(name) {
        Some(device) => format!(
            "Detailed Information for Device {}:\n{}\n",
            device.name(),
            device_info(topology, device)
        ),
        None => format!("Device {} not found.\n", name),
    }
}

fn push_group<G: Display>(lines: &mut Vec<String>, topology: &Topology, category: &str, group: &G, members: Vec<&Device>) {
    lines.push(format!("{} {} Devices:", category, group));
    for device in members {
        lines.push(device_info(topology, device));
    }
    lines.push(String::new());
}

/// Full graph listing: groups with their members, then every device's
/// connections by name
pub fn render_graph(topology: &Topology) -> String {
    let mut lines: Vec<String> = vec!["Network Graph:".to_string()];

    for subnet in topology.subnets() {
        push_group(&mut lines, topology, "Subnet", subnet, topology.devices_in_subnet(subnet));
    }
    for vlan in topology.vlans() {
        push_group(&mut lines, topology, "VLAN", vlan, topology.devices_in_vlan(vlan));
    }
    for zone in topology.zones() {
        push_group(&mut lines, topology, "Zone", zone, topology.devices_in_zone(zone));
    }

    lines.push("Connections:".to_string());
    for device in topology.devices() {
        lines.push(format!("{} is connected to:", device.name()));
        for neighbor in topology.neighbors(device.id()) {
            lines.push(format!("   {}", neighbor.name()));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Serializable view of a device
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSummary {
    pub name: String,
    pub kind: DeviceKind,
    pub ipv4: Ipv4Addr,
    pub ipv6: Ipv6Addr,
    pub subnet: Option<String>,
    pub vlan: Option<String>,
    pub zone: Option<String>,
    pub connections: Vec<String>,
}

/// Serializable view of a whole topology
#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    pub subnets: Vec<String>,
    pub vlans: Vec<String>,
    pub zones: Vec<String>,
    pub devices: Vec<DeviceSummary>,
    /// Undirected edges by device name, each listed once
    pub edges: Vec<(String, String)>,
}

impl GraphSummary {
    pub fn from_topology(topology: &Topology) -> Self {
        let name_of = |id: DeviceId| topology.device(id).map_or_else(|| id.to_string(), |d: &Device| d.name().to_string());

        let devices = topology
            .devices()
            .iter()
            .map(|device| DeviceSummary {
                name: device.name().to_string(),
                kind: device.kind(),
                ipv4: device.ipv4(),
                ipv6: device.ipv6(),
                subnet: device.subnet().map(ToString::to_string),
                vlan: device.vlan().map(ToString::to_string),
                zone: device.zone().map(ToString::to_string),
                connections: device.connections().map(name_of).collect(),
            })
            .collect();

        Self {
            subnets: topology.subnets().iter().map(ToString::to_string).collect(),
            vlans: topology.vlans().iter().map(ToString::to_string).collect(),
            zones: topology.zones().iter().map(ToString::to_string).collect(),
            devices,
            edges: topology
                .edges()
                .into_iter()
                .map(|(a, b)| (name_of(a), name_of(b)))
                .collect(),
        }
    }
}

/// Pretty-printed JSON summary of the topology
pub fn render_json(topology: &Topology) -> Result<String> {
    serde_json::to_string_pretty(&GraphSummary::from_topology(topology))
        .context("Failed to serialize topology summary to JSON")
}
