//! Resolver output handed to a balancing policy

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// Addresses produced by one resolution
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolverState {
    pub addresses: Vec<Address>,
}

impl ResolverState {
    pub fn new(addresses: Vec<Address>) -> Self {
        Self { addresses }
    }
}

/// Update delivered to a policy whenever the client connection's resolver state changes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientConnState {
    pub resolver_state: ResolverState,
}

impl ClientConnState {
    pub fn from_addresses<I, A>(addresses: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Address>,
    {
        Self { resolver_state: ResolverState::new(addresses.into_iter().map(Into::into).collect()) }
    }

    pub fn addresses(&self) -> &[Address] {
        &self.resolver_state.addresses
    }
}
