//! Picker implementations used by the harness and its tests

use super::{PickResult, Picker};
use crate::error::{Error, Result};
use crate::pool::ConnectionHandle;
use rrcheck_common::PickInfo;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Error message returned by the reference policy's picker
pub const CONST_PICKER_ERROR: &str = "const picker error";

/// Picker that returns the same outcome on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstPicker {
    Error(String),
    Connection(ConnectionHandle),
}

impl ConstPicker {
    pub fn with_error(msg: impl Into<String>) -> Self {
        ConstPicker::Error(msg.into())
    }

    pub fn with_handle(handle: ConnectionHandle) -> Self {
        ConstPicker::Connection(handle)
    }
}

impl Picker for ConstPicker {
    fn pick(&self, info: &PickInfo) -> Result<PickResult> {
        tracing::trace!(method = %info.full_method_name, picker = ?self, "pick");
        match self {
            ConstPicker::Error(msg) => Err(Error::Pick(msg.clone())),
            ConstPicker::Connection(handle) => Ok(PickResult::new(handle.clone())),
        }
    }
}

/// Picker that cycles through a fixed list of handles
///
/// Repeating a handle in the list weights it: `[a, a, b]` sends two picks to
/// `a` for every pick to `b`.
#[derive(Debug)]
pub struct RoundRobinPicker {
    handles: Vec<ConnectionHandle>,
    next: AtomicUsize,
}

impl RoundRobinPicker {
    pub fn new(handles: Vec<ConnectionHandle>) -> Self {
        Self::starting_at(handles, 0)
    }

    /// Begin the cycle at `offset` instead of the first handle
    pub fn starting_at(handles: Vec<ConnectionHandle>, offset: usize) -> Self {
        Self { handles, next: AtomicUsize::new(offset) }
    }

    pub fn handles(&self) -> &[ConnectionHandle] {
        &self.handles
    }
}

impl Picker for RoundRobinPicker {
    fn pick(&self, info: &PickInfo) -> Result<PickResult> {
        if self.handles.is_empty() {
            return Err(Error::Pick("no connections available".to_string()));
        }

        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.handles.len();
        let handle = &self.handles[idx];
        tracing::trace!(method = %info.full_method_name, %handle, "pick");
        Ok(PickResult::new(handle.clone()))
    }
}
