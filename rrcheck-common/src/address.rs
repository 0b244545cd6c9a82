//! Resolved backend addresses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single resolved backend address
///
/// `attributes` is an ordered map so that two addresses built from the same
/// input always print identically in recorder traces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Address {
    /// Network address, e.g. "10.0.0.1:443"
    pub addr: String,
    /// Optional authority override used for this backend
    #[serde(default)]
    pub server_name: Option<String>,
    /// Free-form metadata attached by the resolver
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into(), server_name: None, attributes: BTreeMap::new() }
    }

    pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.server_name {
            Some(name) => write!(f, "{}({})", self.addr, name),
            None => write!(f, "{}", self.addr),
        }
    }
}

impl From<&str> for Address {
    fn from(addr: &str) -> Self {
        Self::new(addr)
    }
}
