//! Pre-allocated connection handles
//!
//! A `HandlePool` is built once by test setup and shared (cheaply cloned) by
//! every recorder that hands out connections. Handles are never destroyed:
//! removing a connection is an event on a recorder, not a deallocation, so a
//! handle stays comparable across every assertion of a test run.

use crate::error::{unsupported, Error, Result};
use rrcheck_common::Address;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Number of handles in a pool unless configured otherwise
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// Label prefix for handles unless configured otherwise
pub const DEFAULT_LABEL_PREFIX: &str = "sc";

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
struct HandleInner {
    pool_id: u64,
    index: usize,
    label: String,
}

/// Opaque identifier standing in for a live connection
///
/// Equality is identity: two handles are equal only if they are the same slot
/// of the same pool, regardless of their labels.
#[derive(Clone)]
pub struct ConnectionHandle {
    inner: Arc<HandleInner>,
}

impl ConnectionHandle {
    /// Position of this handle in its pool
    pub fn index(&self) -> usize {
        self.inner.index
    }

    /// Human readable label, e.g. "sc3"
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Start connecting. Handles carry no transport, so this only traces.
    pub fn connect(&self) {
        tracing::trace!(handle = %self, "connect");
    }

    /// Changing a connection's addresses in place is not modeled.
    pub fn update_addresses(&self, _addresses: &[Address]) {
        unsupported("ConnectionHandle::update_addresses")
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.pool_id == other.inner.pool_id && self.inner.index == other.inner.index
    }
}

impl Eq for ConnectionHandle {}

impl Hash for ConnectionHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.pool_id.hash(state);
        self.inner.index.hash(state);
    }
}

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.label)
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionHandle({})", self.inner.label)
    }
}

/// Fixed, ordered set of distinguishable connection handles
///
/// # Example
///
/// ```
/// use rrcheck_core::pool::HandlePool;
///
/// let pool = HandlePool::new(4);
/// assert_eq!(pool.handle_at(2).unwrap().to_string(), "sc2");
/// assert!(pool.handle_at(4).is_err());
/// ```
#[derive(Clone)]
pub struct HandlePool {
    handles: Arc<[ConnectionHandle]>,
}

impl HandlePool {
    /// Create a pool of `capacity` handles labeled "sc0".."sc{capacity-1}"
    pub fn new(capacity: usize) -> Self {
        Self::with_prefix(capacity, DEFAULT_LABEL_PREFIX)
    }

    /// Create a pool whose labels use `prefix` instead of "sc"
    pub fn with_prefix(capacity: usize, prefix: &str) -> Self {
        let pool_id = NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed);
        let handles = (0..capacity)
            .map(|index| ConnectionHandle {
                inner: Arc::new(HandleInner { pool_id, index, label: format!("{prefix}{index}") }),
            })
            .collect();

        Self { handles }
    }

    /// Get the i-th handle
    pub fn handle_at(&self, index: usize) -> Result<ConnectionHandle> {
        self.handles
            .get(index)
            .cloned()
            .ok_or(Error::HandleIndex { index, capacity: self.handles.len() })
    }

    pub fn handles(&self) -> &[ConnectionHandle] {
        &self.handles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConnectionHandle> {
        self.handles.iter()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for HandlePool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

impl fmt::Debug for HandlePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.handles.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_pool_labels() {
        let pool = HandlePool::default();
        assert_eq!(pool.len(), DEFAULT_POOL_CAPACITY);

        let labels: Vec<String> = pool.iter().map(|h| h.to_string()).collect();
        assert_eq!(labels.first().map(String::as_str), Some("sc0"));
        assert_eq!(labels.last().map(String::as_str), Some("sc15"));
    }

    #[test]
    fn test_handle_at_out_of_range() {
        let pool = HandlePool::new(3);
        assert_eq!(pool.handle_at(2).unwrap().index(), 2);
        assert_eq!(pool.handle_at(3), Err(Error::HandleIndex { index: 3, capacity: 3 }));
    }

    #[test]
    fn test_handles_are_identities() {
        let pool = HandlePool::new(2);
        let a = pool.handle_at(0).unwrap();
        assert_eq!(a, pool.handle_at(0).unwrap());
        assert_ne!(a, pool.handle_at(1).unwrap());

        // Same label, different pool
        let other = HandlePool::new(2);
        assert_eq!(other.handle_at(0).unwrap().label(), a.label());
        assert_ne!(other.handle_at(0).unwrap(), a);
    }

    #[test]
    fn test_clone_shares_identities() {
        let pool = HandlePool::new(4);
        let shared = pool.clone();
        assert_eq!(pool.handle_at(3).unwrap(), shared.handle_at(3).unwrap());
    }

    #[test]
    fn test_handles_as_map_keys() {
        let pool = HandlePool::with_prefix(3, "conn-");
        let mut counts: HashMap<ConnectionHandle, usize> = HashMap::new();
        for h in pool.iter().chain(pool.iter().take(1)) {
            *counts.entry(h.clone()).or_insert(0) += 1;
        }
        assert_eq!(counts[&pool.handle_at(0).unwrap()], 2);
        assert_eq!(counts[&pool.handle_at(2).unwrap()], 1);
        assert_eq!(pool.handle_at(2).unwrap().label(), "conn-2");
    }

    #[test]
    fn test_empty_pool() {
        let pool = HandlePool::new(0);
        assert!(pool.is_empty());
        assert!(pool.handle_at(0).is_err());
    }

    #[test]
    #[should_panic(expected = "ConnectionHandle::update_addresses")]
    fn test_update_addresses_is_unsupported() {
        let pool = HandlePool::new(1);
        pool.handle_at(0).unwrap().update_addresses(&[Address::new("10.0.0.1:80")]);
    }
}
