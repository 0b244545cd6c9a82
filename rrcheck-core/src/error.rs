use std::fmt;

/// Result type alias for rrcheck core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for rrcheck core operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Handle index past the end of the pool
    HandleIndex { index: usize, capacity: usize },

    /// A recorder tried to claim more handles than its pool holds
    PoolExhausted { capacity: usize },

    /// Observed picks are not a round robin over the expected handles
    NotRoundRobin(RoundRobinMismatch),

    /// A picker failed to pick
    Pick(String),

    /// An unsupported capability was invoked
    Unsupported(&'static str),

    /// Resolver errors delivered to a policy
    Resolver(String),

    /// Configuration errors
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::HandleIndex { index, capacity } => {
                write!(f, "Handle index {index} out of range for pool of {capacity}")
            }
            Error::PoolExhausted { capacity } => {
                write!(f, "Handle pool exhausted: all {capacity} handles already claimed")
            }
            Error::NotRoundRobin(mismatch) => write!(f, "{mismatch}"),
            Error::Pick(msg) => write!(f, "Pick error: {msg}"),
            Error::Unsupported(op) => write!(f, "Unsupported operation: {op} is not implemented"),
            Error::Resolver(msg) => write!(f, "Resolver error: {msg}"),
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Config(format!("{err:#}"))
    }
}

impl From<RoundRobinMismatch> for Error {
    fn from(mismatch: RoundRobinMismatch) -> Self {
        Error::NotRoundRobin(mismatch)
    }
}

/// Where a round-robin check went wrong
///
/// Sequences are stored as display labels so the error does not depend on
/// the handle type the check ran over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundRobinMismatch {
    /// The first cycle returned a handle more often than `want` allows.
    /// `got` holds the first cycle up to and including the extra pick.
    ExtraPick { want: Vec<String>, got: Vec<String> },

    /// A later cycle diverged from the first one. `second` holds the repeated
    /// picks up to and including the mismatch.
    CycleMismatch { first: Vec<String>, second: Vec<String> },
}

impl fmt::Display for RoundRobinMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundRobinMismatch::ExtraPick { want, got } => {
                write!(
                    f,
                    "non-roundrobin want: [{}], result: [{}]",
                    want.join(", "),
                    got.join(", ")
                )
            }
            RoundRobinMismatch::CycleMismatch { first, second } => write!(
                f,
                "non-roundrobin, first iter: [{}], second iter: [{}]",
                first.join(", "),
                second.join(", ")
            ),
        }
    }
}

/// Abort on a capability this harness deliberately does not model
///
/// Reaching one of these means the harness is being used outside its scope,
/// so the test process must stop rather than carry on with a silent no-op.
#[track_caller]
pub fn unsupported(op: &'static str) -> ! {
    let err = Error::Unsupported(op);
    tracing::error!(operation = op, "{err}");
    panic!("{err}")
}
