//! Address registry.
//!
//! Tracks which addresses have been handed out and to whom, so the
//! allocator can avoid collisions.

use std::collections::HashMap;
use std::net::IpAddr;

/// Errors raised when registering an address
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Address {address} already assigned to {owner}")]
    AlreadyAssigned { address: IpAddr, owner: String },
}

/// Registry of assigned addresses
#[derive(Debug, Default)]
pub struct AddressRegistry {
    /// Address -> owner name
    assigned: HashMap<IpAddr, String>,
}

impl AddressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `address` as owned by `owner`.
    ///
    /// Re-registering an address for the same owner is accepted.
    pub fn register(&mut self, address: IpAddr, owner: &str) -> Result<(), RegistryError> {
        match self.assigned.get(&address) {
            Some(existing) if existing != owner => Err(RegistryError::AlreadyAssigned {
                address,
                owner: existing.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                self.assigned.insert(address, owner.to_string());
                Ok(())
            }
        }
    }

    pub fn is_assigned(&self, address: &IpAddr) -> bool {
        self.assigned.contains_key(address)
    }

    /// Get the owner of an address
    pub fn owner_of(&self, address: &IpAddr) -> Option<&str> {
        self.assigned.get(address).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
