//! Temporary display handles for accepted source files.
//!
//! A handle stands in for the short-lived URL a host uses to show the file
//! before it is decoded. It is revoked exactly once, either explicitly or
//! when dropped.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    live: HashSet<u64>,
    revoked: u64,
}

/// Issues handles and tracks which are still live.
#[derive(Clone, Debug, Default)]
pub struct DisplayHandles {
    inner: Arc<Mutex<Registry>>,
}

impl DisplayHandles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&self, name: &str) -> DisplayHandle {
        let mut reg = lock(&self.inner);
        reg.next_id += 1;
        let id = reg.next_id;
        reg.live.insert(id);
        debug!(id, name, "Allocated display handle");
        DisplayHandle {
            id,
            url: format!("blob:framecrop/{id}/{name}"),
            registry: Arc::clone(&self.inner),
            revoked: false,
        }
    }

    pub fn live_count(&self) -> usize {
        lock(&self.inner).live.len()
    }

    pub fn allocated_count(&self) -> u64 {
        lock(&self.inner).next_id
    }

    pub fn revoked_count(&self) -> u64 {
        lock(&self.inner).revoked
    }

    pub fn is_live(&self, id: u64) -> bool {
        lock(&self.inner).live.contains(&id)
    }
}

fn lock(inner: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug)]
pub struct DisplayHandle {
    id: u64,
    url: String,
    registry: Arc<Mutex<Registry>>,
    revoked: bool,
}

impl DisplayHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn revoke(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.revoked {
            return;
        }
        self.revoked = true;
        let mut reg = lock(&self.registry);
        if reg.live.remove(&self.id) {
            reg.revoked += 1;
            debug!(id = self.id, "Revoked display handle");
        }
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        self.release();
    }
}
