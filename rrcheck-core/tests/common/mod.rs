//! Shared helpers for rrcheck integration tests

#![allow(dead_code)]

pub mod round_robin;

use rrcheck_common::Address;
use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install a tracing subscriber once per test binary
///
/// Honors `RUST_LOG`; defaults to `warn` so recorder traces stay quiet unless
/// asked for.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

pub fn addrs(list: &[&str]) -> Vec<Address> {
    list.iter().map(|a| Address::new(*a)).collect()
}

/// Address carrying a "weight" attribute understood by `WeightedRoundRobin`
pub fn weighted(addr: &str, weight: usize) -> Address {
    Address::new(addr).with_attribute("weight", weight.to_string())
}
