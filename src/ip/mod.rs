//! IP address allocation and management module.
//!
//! Devices get their IPv4 and IPv6 addresses from an [`AddressAllocator`]
//! at construction time. Uniqueness is tracked by an [`AddressRegistry`]
//! but is assumed rather than guaranteed.

pub mod registry;
pub mod allocator;

// Re-export commonly used types
pub use registry::{AddressRegistry, RegistryError};
pub use allocator::{AddressAllocator, DeviceAddresses};
