//! rrcheck Core Library
//!
//! Deterministic harness for verifying connection-pool load-balancing
//! policies from the outside. It provides a pool of pre-allocated connection
//! handles, a recording client connection that a policy under test talks to,
//! a reference policy for self-tests, and a checker that decides whether a
//! picker's output is a (weighted) round robin.
//!
//! ```
//! use std::sync::Arc;
//! use rrcheck_common::ClientConnState;
//! use rrcheck_core::balancer::{Balancer, ConstBalancer, RoundRobinPicker};
//! use rrcheck_core::conformance::is_round_robin_picker;
//! use rrcheck_core::{HandlePool, RecordingClientConn};
//!
//! let pool = HandlePool::new(3);
//! let cc = Arc::new(RecordingClientConn::new(pool.clone()));
//!
//! let mut policy = ConstBalancer::new(cc.clone());
//! policy.update_client_conn_state(ClientConnState::from_addresses(["10.0.0.1:80"])).unwrap();
//! assert_eq!(cc.try_recv_created(), pool.handle_at(0).ok());
//!
//! let picker = RoundRobinPicker::new(pool.handles().to_vec());
//! assert!(is_round_robin_picker(pool.handles(), &picker).is_ok());
//! ```

pub mod balancer;
pub mod config;
pub mod conformance;
pub mod error;
pub mod pool;
pub mod queue;
pub mod recorder;

pub use balancer::{Balancer, BalancerBuilder, BalancerState, ClientConn, PickResult, Picker};
pub use config::HarnessConfig;
pub use conformance::{is_round_robin, is_round_robin_picker, try_is_round_robin};
pub use error::{Error, Result, RoundRobinMismatch};
pub use pool::{ConnectionHandle, HandlePool};
pub use queue::{HistoryQueue, OverflowPolicy};
pub use recorder::RecordingClientConn;
