//! Common types for rrcheck
//!
//! This crate holds the data model shared between the harness and the
//! balancing policies it drives:
//! - `address`: resolved backend addresses
//! - `connectivity`: connectivity states of connections and of a whole policy
//! - `resolver`: resolver output handed to a policy
//! - `options`: per-call option structs

pub mod address;
pub mod connectivity;
pub mod options;
pub mod resolver;

pub use address::Address;
pub use connectivity::{ConnectionState, ConnectivityState};
pub use options::{BuildOptions, NewConnectionOptions, PickInfo, ResolveNowOptions};
pub use resolver::{ClientConnState, ResolverState};
