//! Host port allocation.
//!
//! Ports are handed out as `base + n` where `n` counts outstanding
//! allocations. Only the most recently issued port can be given back.

use crate::error::{Result, RuntimeError};

/// Counter-based host port allocator.
#[derive(Debug, Clone)]
pub struct PortAllocator {
    base: u16,
    issued: u32,
}

impl PortAllocator {
    /// Creates an allocator whose first port is `base`.
    #[must_use]
    pub const fn new(base: u16) -> Self {
        Self { base, issued: 0 }
    }

    /// Returns the first port this allocator hands out.
    #[must_use]
    pub const fn base(&self) -> u16 {
        self.base
    }

    /// Returns how many ports have been handed out.
    #[must_use]
    pub const fn issued(&self) -> u32 {
        self.issued
    }

    /// Hands out the next port.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::PortsExhausted`] once the next port would
    /// exceed `u16::MAX`.
    pub fn allocate(&mut self) -> Result<u16> {
        let port = u16::try_from(u32::from(self.base) + self.issued)
            .map_err(|_| RuntimeError::PortsExhausted { base: self.base })?;
        self.issued += 1;
        Ok(port)
    }

    /// Gives back `port` if it is the most recently issued one.
    ///
    /// Returns whether the counter moved back. Any other port stays
    /// consumed, since later ports are already in use above it.
    pub fn release(&mut self, port: u16) -> bool {
        let Some(last) = self.issued.checked_sub(1) else {
            return false;
        };
        if u32::from(port) != u32::from(self.base) + last {
            return false;
        }
        self.issued = last;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_sequentially_from_base() {
        let mut ports = PortAllocator::new(8081);
        assert_eq!(ports.allocate().unwrap(), 8081);
        assert_eq!(ports.allocate().unwrap(), 8082);
        assert_eq!(ports.allocate().unwrap(), 8083);
        assert_eq!(ports.issued(), 3);
        assert_eq!(ports.base(), 8081);
    }

    #[test]
    fn exhaustion_is_an_error_and_sticky() {
        let mut ports = PortAllocator::new(u16::MAX - 1);
        assert_eq!(ports.allocate().unwrap(), u16::MAX - 1);
        assert_eq!(ports.allocate().unwrap(), u16::MAX);
        assert!(matches!(
            ports.allocate(),
            Err(RuntimeError::PortsExhausted { base }) if base == u16::MAX - 1
        ));
        assert!(ports.allocate().is_err());
        assert_eq!(ports.issued(), 2);
    }

    #[test]
    fn releasing_last_port_hands_it_out_again() {
        let mut ports = PortAllocator::new(8081);
        let port = ports.allocate().unwrap();
        assert!(ports.release(port));
        assert_eq!(ports.issued(), 0);
        assert_eq!(ports.allocate().unwrap(), 8081);
    }

    #[test]
    fn releasing_an_older_port_is_ignored() {
        let mut ports = PortAllocator::new(8081);
        let first = ports.allocate().unwrap();
        let _ = ports.allocate().unwrap();

        assert!(!ports.release(first));
        assert!(!ports.release(9000));
        assert_eq!(ports.allocate().unwrap(), 8083);
    }

    #[test]
    fn releasing_on_fresh_allocator_is_ignored() {
        let mut ports = PortAllocator::new(8081);
        assert!(!ports.release(8081));
        assert!(!ports.release(8080));
        assert_eq!(ports.issued(), 0);
    }
}
