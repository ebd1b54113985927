//! Address allocation logic.
//!
//! Every device receives an IPv4 address drawn from its subnet and an IPv6
//! unique-local address when it is constructed. A single seeded RNG drives
//! both, so a fixed seed reproduces the same addresses.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::registry::AddressRegistry;
use crate::topology::Subnet;

/// How many candidates to draw before accepting a collision
const MAX_ATTEMPTS: usize = 64;

/// The pair of addresses a device is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceAddresses {
    pub ipv4: Ipv4Addr,
    pub ipv6: Ipv6Addr,
}

/// Random address source shared by all devices of a scenario
#[derive(Debug)]
pub struct AddressAllocator {
    rng: StdRng,
    registry: AddressRegistry,
}

impl AddressAllocator {
    /// Deterministic allocator
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            registry: AddressRegistry::new(),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            registry: AddressRegistry::new(),
        }
    }

    pub fn registry(&self) -> &AddressRegistry {
        &self.registry
    }

    /// Allocate both addresses for a new device.
    ///
    /// A device without a subnet gets `0.0.0.0` as its IPv4 address.
    pub fn allocate(&mut self, subnet: Option<&Subnet>, owner: &str) -> DeviceAddresses {
        let ipv4 = match subnet {
            Some(subnet) => self.ipv4_in(subnet, owner),
            None => Ipv4Addr::UNSPECIFIED,
        };
        let ipv6 = self.ipv6_ula(owner);
        DeviceAddresses { ipv4, ipv6 }
    }

    /// Draw a host address inside `subnet`
    pub fn ipv4_in(&mut self, subnet: &Subnet, owner: &str) -> Ipv4Addr {
        let network = u32::from(subnet.network());
        let host_bits = subnet.host_bits();
        let mut candidate = subnet.network();

        for _ in 0..MAX_ATTEMPTS {
            let host = self.random_host(host_bits);
            candidate = Ipv4Addr::from(network | host);
            if self.claim(IpAddr::V4(candidate), owner) {
                return candidate;
            }
        }

        log::warn!(
            "Could not find a free address in {} for {} after {} attempts, reusing {}",
            subnet,
            owner,
            MAX_ATTEMPTS,
            candidate
        );
        candidate
    }

    /// Draw a unique-local IPv6 address (fd00::/8)
    pub fn ipv6_ula(&mut self, owner: &str) -> Ipv6Addr {
        let mut candidate = Ipv6Addr::UNSPECIFIED;

        for _ in 0..MAX_ATTEMPTS {
            let mut bytes = [0u8; 16];
            self.rng.fill(&mut bytes);
            bytes[0] = 0xfd;
            candidate = Ipv6Addr::from(bytes);
            if self.claim(IpAddr::V6(candidate), owner) {
                return candidate;
            }
        }

        log::warn!("Could not find a free IPv6 address for {}, reusing {}", owner, candidate);
        candidate
    }

    /// Random host part. Network and broadcast addresses are skipped when
    /// the subnet has room for at least one other host.
    fn random_host(&mut self, host_bits: u32) -> u32 {
        match host_bits {
            0 => 0,
            1 => self.rng.gen_range(0..=1),
            32 => self.rng.gen_range(1..u32::MAX),
            bits => {
                let max = (1u32 << bits) - 1;
                self.rng.gen_range(1..max)
            }
        }
    }

    fn claim(&mut self, address: IpAddr, owner: &str) -> bool {
        if self.registry.is_assigned(&address) {
            log::debug!("Address {} already taken, drawing again for {}", address, owner);
            return false;
        }
        self.registry.register(address, owner).is_ok()
    }
}

impl Default for AddressAllocator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
