//! Connection graph operations on a [`Topology`].
//!
//! Edges are symmetric and stored on both endpoints. Removing a device
//! cascades through every remaining device so no edge is left dangling.

use super::device::{Connectable, Device};
use super::network::{Topology, TopologyError};
use super::types::DeviceId;

impl Topology {
    /// Connect two registered devices.
    ///
    /// Connecting a device to itself records a self-loop; the validator
    /// reports it.
    pub fn connect_devices(&mut self, a: DeviceId, b: DeviceId) -> Result<(), TopologyError> {
        if a == b {
            let index = self.position(a)?;
            log::debug!("Connecting {} to itself", self.devices[index].name());
            self.devices[index].add_connection(a);
            return Ok(());
        }

        let (first, second) = self.pair_mut(a, b)?;
        log::debug!("Connecting {} <-> {}", first.name(), second.name());
        first.connect(second);
        Ok(())
    }

    /// Remove the edge between two devices, if any.
    ///
    /// Only one endpoint needs to be registered: its side of the edge is
    /// dropped even when the other device was never added to the topology.
    pub fn disconnect_devices(&mut self, a: DeviceId, b: DeviceId) -> Result<(), TopologyError> {
        if a == b {
            let index = self.position(a)?;
            self.devices[index].remove_connection(a);
            return Ok(());
        }

        match (self.position(a), self.position(b)) {
            (Ok(_), Ok(_)) => {
                let (first, second) = self.pair_mut(a, b)?;
                log::debug!("Disconnecting {} <-> {}", first.name(), second.name());
                first.disconnect_from(second);
            }
            (Ok(index), Err(_)) => {
                log::debug!("Disconnecting {} from unregistered {}", self.devices[index].name(), b);
                self.devices[index].remove_connection(b);
            }
            (Err(_), Ok(index)) => {
                log::debug!("Disconnecting {} from unregistered {}", self.devices[index].name(), a);
                self.devices[index].remove_connection(a);
            }
            (Err(err), Err(_)) => return Err(err),
        }
        Ok(())
    }

    /// Unregister a device and drop every edge pointing at it.
    ///
    /// The cascade runs even for an id that is not registered, so edges left
    /// behind by an unregistered peer are cleaned up too. Returns the removed
    /// device, with an empty connection set, when it was registered.
    pub fn remove_device(&mut self, id: DeviceId) -> Option<Device> {
        for other in self.devices.iter_mut() {
            other.remove_connection(id);
        }

        let index = self.position(id).ok()?;
        let mut removed = self.devices.remove(index);
        removed.clear_connections();

        log::debug!("Removed device {} ({})", removed.name(), id);
        Some(removed)
    }

    /// Devices directly connected to `id`, in ascending id order
    pub fn neighbors(&self, id: DeviceId) -> Vec<&Device> {
        match self.device(id) {
            Some(device) => device
                .connections()
                .filter_map(|neighbor| self.device(neighbor))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every undirected edge once, lower id first. Self-loops appear as `(a, a)`.
    ///
    /// Edges to devices that are not registered are listed as well.
    pub fn edges(&self) -> Vec<(DeviceId, DeviceId)> {
        let mut edges = Vec::new();
        for device in &self.devices {
            let id = device.id();
            for other in device.connections() {
                if id <= other {
                    edges.push((id, other));
                } else if self.device(other).is_none() {
                    edges.push((other, id));
                }
            }
        }
        edges.sort();
        edges
    }

    /// Mutable access to two distinct devices at once
    fn pair_mut(&mut self, a: DeviceId, b: DeviceId) -> Result<(&mut Device, &mut Device), TopologyError> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        debug_assert_ne!(i, j);

        if i < j {
            let (left, right) = self.devices.split_at_mut(j);
            Ok((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.devices.split_at_mut(i);
            Ok((&mut right[0], &mut left[j]))
        }
    }
}
