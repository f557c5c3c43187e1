//! Transfer accounting for dual-residency buffers.

use std::fmt;

use crate::buffer::MemorySide;

/// Counts of host↔device transfers performed by one buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Number of host→device copies.
    pub to_device: u64,
    /// Number of device→host copies.
    pub to_host: u64,
    /// Elements moved host→device, summed over all copies.
    pub elements_to_device: u64,
    /// Elements moved device→host, summed over all copies.
    pub elements_to_host: u64,
}

impl TransferStats {
    /// Record one transfer of `elements` items into `destination`.
    pub(crate) fn record(&mut self, destination: MemorySide, elements: usize) {
        match destination {
            MemorySide::Device => {
                self.to_device += 1;
                self.elements_to_device += elements as u64;
            }
            MemorySide::Host => {
                self.to_host += 1;
                self.elements_to_host += elements as u64;
            }
        }
    }

    /// Total number of transfers in either direction.
    pub fn total(&self) -> u64 {
        self.to_device + self.to_host
    }
}

impl fmt::Display for TransferStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "H→D {} ({} elems), D→H {} ({} elems)",
            self.to_device, self.elements_to_device, self.to_host, self.elements_to_host
        )
    }
}
