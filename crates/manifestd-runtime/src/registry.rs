//! In-memory manifest registry.
//!
//! One mutex guards both the entries and the port allocator, so a port
//! is computed and consumed inside a single critical section. The lock
//! is never held across a runtime invocation.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use manifestd_common::constants::DEFAULT_PORT_BASE;
use manifestd_common::manifest::StoredManifest;

use crate::error::Result;
use crate::ports::PortAllocator;

#[derive(Debug)]
struct Inner {
    entries: BTreeMap<String, StoredManifest>,
    ports: PortAllocator,
}

/// Concurrency-safe mapping from manifest name to its stored record.
#[derive(Debug)]
pub struct Registry {
    inner: Mutex<Inner>,
}

impl Registry {
    /// Creates an empty registry handing out ports from `port_base`.
    #[must_use]
    pub const fn new(port_base: u16) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: BTreeMap::new(),
                ports: PortAllocator::new(port_base),
            }),
        }
    }

    // Critical sections only touch the map and the counter, so a panic
    // elsewhere cannot leave them half-updated.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts or replaces the record for its name, returning the
    /// previous record if there was one.
    pub fn put(&self, record: StoredManifest) -> Option<StoredManifest> {
        let name = record.name().to_owned();
        let previous = self.lock().entries.insert(name.clone(), record);
        tracing::debug!(name, replaced = previous.is_some(), "registry updated");
        previous
    }

    /// Returns a copy of the record stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<StoredManifest> {
        self.lock().entries.get(name).cloned()
    }

    /// Returns a copy of every entry, ordered by name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, StoredManifest> {
        self.lock().entries.clone()
    }

    /// Returns the number of stored manifests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Picks the host port for a registration of `name`.
    ///
    /// A name that is already stored with a port keeps it; any other
    /// name gets a fresh port from the allocator.
    ///
    /// # Errors
    ///
    /// Returns an error when the allocator has run out of ports.
    pub fn reserve_port(&self, name: &str) -> Result<u16> {
        let mut inner = self.lock();
        if let Some(port) = inner.entries.get(name).and_then(|entry| entry.port) {
            return Ok(port);
        }
        inner.ports.allocate()
    }

    /// Gives back a port reserved for a registration that never stored.
    ///
    /// The port returns to the allocator only when it was the last one
    /// handed out and no stored record holds it, so the next new name
    /// gets `base + registry size` again after a failed run.
    pub fn release_port(&self, port: u16) {
        let mut inner = self.lock();
        if inner.entries.values().any(|entry| entry.port == Some(port)) {
            return;
        }
        let released = inner.ports.release(port);
        tracing::debug!(port, released, "port reservation dropped");
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DEFAULT_PORT_BASE)
    }
}
