//! Option structs passed along with policy and client-connection calls

/// Options for creating a connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewConnectionOptions {
    /// Request a health-checked connection
    pub health_check_enabled: bool,
}

/// Options passed to a builder when a policy is constructed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Authority the owning client connection dials
    pub authority: Option<String>,
}

/// Options for a re-resolution request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveNowOptions;

/// Information about the call a picker is routing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickInfo {
    /// Full method name, e.g. "/pkg.Service/Method"
    pub full_method_name: String,
}

impl PickInfo {
    pub fn new(full_method_name: impl Into<String>) -> Self {
        Self { full_method_name: full_method_name.into() }
    }
}
