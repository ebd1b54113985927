//! Topology orchestrator.
//!
//! Turns a parsed [`Config`] into a populated [`Topology`]: one group
//! instance per declared group, devices in file order, then links in file
//! order.

use std::collections::HashMap;

use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::config::Config;
use crate::ip::AddressAllocator;
use crate::topology::{Device, Membership, Subnet, Topology, Vlan, Zone};
use crate::utils::validation::Validator;

/// Build an address allocator, preferring `seed_override` over the config seed
pub fn allocator_for(config: &Config, seed_override: Option<u64>) -> AddressAllocator {
    match seed_override.or(config.seed) {
        Some(seed) => {
            log::info!("Using address seed {}", seed);
            AddressAllocator::from_seed(seed)
        }
        None => AddressAllocator::from_entropy(),
    }
}

/// Validator configured from the scenario
pub fn validator_for(config: &Config) -> Validator {
    Validator::new(config.validation.clone())
}

/// Populate a topology from a scenario
pub fn build_topology(config: &Config, allocator: &mut AddressAllocator) -> Result<Topology> {
    let mut topology = Topology::new();

    // Register one instance per declared group
    let mut subnets: HashMap<&str, Subnet> = HashMap::new();
    for value in &config.subnets {
        let subnet: Subnet = value
            .parse()
            .wrap_err_with(|| format!("Invalid subnet '{}'", value))?;
        topology.add_subnet(subnet.clone());
        subnets.insert(value.as_str(), subnet);
    }

    let mut vlans: HashMap<&str, Vlan> = HashMap::new();
    for name in &config.vlans {
        let vlan = Vlan::new(name.as_str());
        topology.add_vlan(vlan.clone());
        vlans.insert(name.as_str(), vlan);
    }

    let mut zones: HashMap<&str, Zone> = HashMap::new();
    for name in &config.zones {
        let zone = Zone::new(name.as_str());
        topology.add_zone(zone.clone());
        zones.insert(name.as_str(), zone);
    }

    // Add devices in file order
    for entry in &config.devices {
        let membership = Membership {
            subnet: lookup(&subnets, entry.subnet.as_deref(), &entry.name, "subnet")?,
            vlan: lookup(&vlans, entry.vlan.as_deref(), &entry.name, "VLAN")?,
            zone: lookup(&zones, entry.zone.as_deref(), &entry.name, "zone")?,
        };
        let device = Device::new(entry.name.as_str(), entry.kind, membership, allocator);
        log::debug!("{} {} gets {} / {}", entry.kind, entry.name, device.ipv4(), device.ipv6());
        topology.add_device(device);
    }

    // Connect links; names resolve to the first device with that name
    for (a, b) in &config.links {
        let first = topology
            .device_by_name(a)
            .map(Device::id)
            .ok_or_else(|| eyre!("Link endpoint '{}' is not a declared device", a))?;
        let second = topology
            .device_by_name(b)
            .map(Device::id)
            .ok_or_else(|| eyre!("Link endpoint '{}' is not a declared device", b))?;
        topology.connect_devices(first, second)?;
    }

    log::info!(
        "Built topology with {} devices and {} edges",
        topology.devices().len(),
        topology.edges().len()
    );
    Ok(topology)
}

fn lookup<G: Clone>(
    groups: &HashMap<&str, G>,
    name: Option<&str>,
    device: &str,
    category: &str,
) -> Result<Option<G>> {
    match name {
        Some(name) => groups
            .get(name)
            .cloned()
            .map(Some)
            .ok_or_else(|| eyre!("Device '{}' references undeclared {} '{}'", device, category, name)),
        None => Ok(None),
    }
}
