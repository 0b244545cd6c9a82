//! Name-indexed set of balancer builders

use super::{Balancer, BalancerBuilder, ClientConn};
use rrcheck_common::BuildOptions;
use std::collections::HashMap;
use std::sync::Arc;

/// Builders looked up by name
///
/// Owned by the test that needs it rather than living in a process global,
/// so tests registering different builders do not see each other.
#[derive(Default)]
pub struct BalancerRegistry {
    builders: HashMap<&'static str, Arc<dyn BalancerBuilder>>,
}

impl BalancerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `builder` under its own name, replacing any previous builder
    /// of that name
    pub fn register(
        &mut self,
        builder: Arc<dyn BalancerBuilder>,
    ) -> Option<Arc<dyn BalancerBuilder>> {
        let name = builder.name();
        tracing::debug!(name, "registering balancer builder");
        self.builders.insert(name, builder)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn BalancerBuilder>> {
        self.builders.get(name).cloned()
    }

    /// Build a policy with the builder registered as `name`
    pub fn build(
        &self,
        name: &str,
        cc: Arc<dyn ClientConn>,
        opts: BuildOptions,
    ) -> Option<Box<dyn Balancer>> {
        self.builders.get(name).map(|builder| builder.build(cc, opts))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.builders.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
