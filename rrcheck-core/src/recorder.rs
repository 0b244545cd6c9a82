//! Recording client connection
//!
//! `RecordingClientConn` is the only world a policy under test sees. Every
//! call the policy makes is traced and buffered so the test can inspect it
//! afterwards:
//!
//! - addresses used for each `new_connection` call (history queue)
//! - handles created (history queue)
//! - handles removed (history queue)
//! - latest published connectivity state and latest picker (single slots)
//!
//! No method ever blocks the policy. History queues lose events on overflow
//! according to their `OverflowPolicy`; the state and picker slots are
//! overwritten on each publication so a reader only ever sees the newest one.

use crate::balancer::{BalancerState, ClientConn, Picker};
use crate::config::HarnessConfig;
use crate::error::{unsupported, Error, Result};
use crate::pool::{ConnectionHandle, HandlePool};
use crate::queue::{HistoryQueue, OverflowPolicy};
use parking_lot::Mutex;
use rrcheck_common::{Address, ConnectivityState, NewConnectionOptions, ResolveNowOptions};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Events kept per history queue unless configured otherwise
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Latest publication, split so state and picker can be consumed separately
#[derive(Default)]
struct Published {
    state: Option<ConnectivityState>,
    picker: Option<Arc<dyn Picker>>,
}

/// Mock client connection that records what a policy does with it
pub struct RecordingClientConn {
    pool: HandlePool,
    /// Index of the next pool handle to hand out
    cursor: AtomicUsize,

    new_connection_addrs: HistoryQueue<Vec<Address>>,
    new_connections: HistoryQueue<ConnectionHandle>,
    removed_connections: HistoryQueue<ConnectionHandle>,

    published: Mutex<Published>,
}

impl RecordingClientConn {
    /// Create a recorder over `pool` with the default history capacity
    pub fn new(pool: HandlePool) -> Self {
        Self::with_capacity(pool, DEFAULT_HISTORY_CAPACITY, OverflowPolicy::default())
    }

    /// Create a recorder whose history queues hold `history_capacity` events
    ///
    /// # Panics
    /// Panics if `history_capacity` is zero.
    pub fn with_capacity(
        pool: HandlePool,
        history_capacity: usize,
        overflow: OverflowPolicy,
    ) -> Self {
        Self {
            pool,
            cursor: AtomicUsize::new(0),
            new_connection_addrs: HistoryQueue::new(history_capacity, overflow),
            new_connections: HistoryQueue::new(history_capacity, overflow),
            removed_connections: HistoryQueue::new(history_capacity, overflow),
            published: Mutex::new(Published::default()),
        }
    }

    /// Create a recorder using the queue settings in `config`
    pub fn from_config(pool: HandlePool, config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_capacity(pool, config.history_capacity, config.overflow))
    }

    pub fn pool(&self) -> &HandlePool {
        &self.pool
    }

    /// Number of handles claimed from the pool so far
    pub fn created(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Addresses passed to the oldest buffered `new_connection` call
    pub fn try_recv_created_addresses(&self) -> Option<Vec<Address>> {
        self.new_connection_addrs.try_recv()
    }

    /// Oldest buffered created handle
    pub fn try_recv_created(&self) -> Option<ConnectionHandle> {
        self.new_connections.try_recv()
    }

    /// Oldest buffered removed handle
    pub fn try_recv_removed(&self) -> Option<ConnectionHandle> {
        self.removed_connections.try_recv()
    }

    /// Take the latest published state
    pub fn try_recv_state(&self) -> Option<ConnectivityState> {
        self.published.lock().state.take()
    }

    /// Take the latest published picker
    pub fn try_recv_picker(&self) -> Option<Arc<dyn Picker>> {
        self.published.lock().picker.take()
    }

    /// Latest published state, without consuming it
    pub fn latest_state(&self) -> Option<ConnectivityState> {
        self.published.lock().state
    }

    /// Latest published picker, without consuming it
    pub fn latest_picker(&self) -> Option<Arc<dyn Picker>> {
        self.published.lock().picker.clone()
    }

    /// All buffered creation address lists, oldest first
    pub fn drain_created_addresses(&self) -> Vec<Vec<Address>> {
        self.new_connection_addrs.drain()
    }

    /// All buffered created handles, oldest first
    pub fn drain_created(&self) -> Vec<ConnectionHandle> {
        self.new_connections.drain()
    }

    /// All buffered removed handles, oldest first
    pub fn drain_removed(&self) -> Vec<ConnectionHandle> {
        self.removed_connections.drain()
    }

    fn claim_handle(&self) -> Result<ConnectionHandle> {
        let capacity = self.pool.len();
        let index = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| (i < capacity).then_some(i + 1))
            .map_err(|_| Error::PoolExhausted { capacity })?;
        self.pool.handle_at(index)
    }
}

impl ClientConn for RecordingClientConn {
    fn new_connection(
        &self,
        addresses: &[Address],
        opts: NewConnectionOptions,
    ) -> Result<ConnectionHandle> {
        let handle = match self.claim_handle() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(
                    "RecordingClientConn: new_connection({:?}, {:?}) failed: {}",
                    addresses,
                    opts,
                    e
                );
                return Err(e);
            }
        };

        tracing::debug!(
            "RecordingClientConn: new_connection({:?}, {:?}) => {}",
            addresses,
            opts,
            handle
        );

        if !self.new_connection_addrs.push(addresses.to_vec()) {
            tracing::trace!("RecordingClientConn: address history full, event dropped");
        }
        if !self.new_connections.push(handle.clone()) {
            tracing::trace!("RecordingClientConn: created history full, event dropped");
        }

        Ok(handle)
    }

    fn remove_connection(&self, handle: &ConnectionHandle) {
        tracing::debug!("RecordingClientConn: remove_connection({})", handle);
        if !self.removed_connections.push(handle.clone()) {
            tracing::trace!("RecordingClientConn: removed history full, event dropped");
        }
    }

    fn update_state(&self, state: BalancerState) {
        tracing::debug!("RecordingClientConn: update_state({:?})", state);
        let mut published = self.published.lock();
        published.state = Some(state.connectivity_state);
        published.picker = Some(state.picker);
    }

    fn update_balancer_state(&self, _state: ConnectivityState, _picker: Arc<dyn Picker>) {
        unsupported("ClientConn::update_balancer_state")
    }

    fn resolve_now(&self, _opts: ResolveNowOptions) {
        unsupported("ClientConn::resolve_now")
    }

    fn target(&self) -> String {
        unsupported("ClientConn::target")
    }
}

impl fmt::Debug for RecordingClientConn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingClientConn")
            .field("pool_capacity", &self.pool.len())
            .field("created", &self.created())
            .field("new_connections", &self.new_connections)
            .field("removed_connections", &self.removed_connections)
            .finish()
    }
}
