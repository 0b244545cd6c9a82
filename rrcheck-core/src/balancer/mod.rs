//! Capability traits between a balancing policy and its client connection
//!
//! A policy under test only sees the world through a `ClientConn`: it asks it
//! for connections and publishes its routing decisions to it as a
//! `BalancerState`. The harness supplies a recording `ClientConn` and drives
//! the policy through the `Balancer` trait.
//!
//! ## Architecture
//!
//! ```text
//! test ──ClientConnState──▶ Balancer (policy under test)
//!                              │ new_connection / remove_connection
//!                              │ update_state(BalancerState)
//!                              ▼
//!                          ClientConn (RecordingClientConn)
//!                              │ buffered events
//!                              ▼
//! test ◀── created / removed / latest picker ── is_round_robin_picker()
//! ```

pub mod const_balancer;
pub mod picker;
pub mod registry;

use crate::error::{Error, Result};
use crate::pool::ConnectionHandle;
use rrcheck_common::{
    Address, BuildOptions, ClientConnState, ConnectionState, ConnectivityState,
    NewConnectionOptions, PickInfo, ResolveNowOptions,
};
use std::fmt;
use std::sync::Arc;

pub use const_balancer::{ConstBalancer, ConstBalancerBuilder, CONST_BALANCER_NAME};
pub use picker::{ConstPicker, RoundRobinPicker, CONST_PICKER_ERROR};
pub use registry::BalancerRegistry;

/// Successful outcome of a pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickResult {
    pub connection: ConnectionHandle,
}

impl PickResult {
    pub fn new(connection: ConnectionHandle) -> Self {
        Self { connection }
    }
}

/// Selects one connection per call
///
/// Pickers are published behind an `Arc` and may be called from any thread,
/// so implementations keep their cursor state in atomics or locks.
pub trait Picker: Send + Sync {
    /// Pick a connection for the call described by `info`
    ///
    /// Returns exactly one of a connection or an error.
    fn pick(&self, info: &PickInfo) -> Result<PickResult>;
}

/// Connectivity state and picker, published as one unit
#[derive(Clone)]
pub struct BalancerState {
    pub connectivity_state: ConnectivityState,
    pub picker: Arc<dyn Picker>,
}

impl BalancerState {
    pub fn new(connectivity_state: ConnectivityState, picker: Arc<dyn Picker>) -> Self {
        Self { connectivity_state, picker }
    }
}

impl fmt::Debug for BalancerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalancerState")
            .field("connectivity_state", &self.connectivity_state)
            .field("picker", &format_args!("{:p}", Arc::as_ptr(&self.picker)))
            .finish()
    }
}

/// The client-connection surface a policy calls back into
pub trait ClientConn: Send + Sync {
    /// Create a connection to `addresses`
    fn new_connection(
        &self,
        addresses: &[Address],
        opts: NewConnectionOptions,
    ) -> Result<ConnectionHandle>;

    /// Tear down a connection previously returned by `new_connection`
    fn remove_connection(&self, handle: &ConnectionHandle);

    /// Publish a new connectivity state together with its picker
    fn update_state(&self, state: BalancerState);

    /// Legacy two-argument form of `update_state`
    fn update_balancer_state(&self, state: ConnectivityState, picker: Arc<dyn Picker>);

    /// Ask the resolver to resolve again
    fn resolve_now(&self, opts: ResolveNowOptions);

    /// Target URI of the owning client connection
    fn target(&self) -> String;
}

/// A balancing policy
pub trait Balancer: Send {
    /// The resolver produced a new set of addresses
    fn update_client_conn_state(&mut self, state: ClientConnState) -> Result<()>;

    /// The resolver failed
    fn resolver_error(&mut self, err: Error);

    /// One of this policy's connections changed state
    fn update_connection_state(&mut self, handle: &ConnectionHandle, state: ConnectionState);

    /// Release everything the policy holds
    fn close(&mut self);
}

/// Constructs policies bound to a client connection
pub trait BalancerBuilder: Send + Sync {
    fn build(&self, cc: Arc<dyn ClientConn>, opts: BuildOptions) -> Box<dyn Balancer>;

    /// Name the builder is registered under
    fn name(&self) -> &'static str;
}
