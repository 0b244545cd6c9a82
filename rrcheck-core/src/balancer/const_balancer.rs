//! Reference policy with fixed behavior
//!
//! `ConstBalancer` creates a single connection the first time it sees a
//! non-empty address list, and answers every connection state change by
//! publishing `READY` with a picker that always fails. It exists to exercise
//! the recorder and the checker, not to balance anything.

use super::{Balancer, BalancerBuilder, BalancerState, ClientConn, ConstPicker, CONST_PICKER_ERROR};
use crate::error::{unsupported, Error, Result};
use crate::pool::ConnectionHandle;
use rrcheck_common::{
    BuildOptions, ClientConnState, ConnectionState, ConnectivityState, NewConnectionOptions,
};
use std::sync::Arc;

/// Name the reference policy registers under
pub const CONST_BALANCER_NAME: &str = "test-const-balancer";

/// Builder for `ConstBalancer`
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstBalancerBuilder;

impl BalancerBuilder for ConstBalancerBuilder {
    fn build(&self, cc: Arc<dyn ClientConn>, _opts: BuildOptions) -> Box<dyn Balancer> {
        Box::new(ConstBalancer::new(cc))
    }

    fn name(&self) -> &'static str {
        CONST_BALANCER_NAME
    }
}

pub struct ConstBalancer {
    cc: Arc<dyn ClientConn>,
    /// Set once the single connection has been created
    connection: Option<ConnectionHandle>,
}

impl ConstBalancer {
    pub fn new(cc: Arc<dyn ClientConn>) -> Self {
        Self { cc, connection: None }
    }

    /// The connection this policy created, if any
    pub fn connection(&self) -> Option<&ConnectionHandle> {
        self.connection.as_ref()
    }
}

impl Balancer for ConstBalancer {
    fn update_client_conn_state(&mut self, state: ClientConnState) -> Result<()> {
        if state.addresses().is_empty() || self.connection.is_some() {
            return Ok(());
        }

        let handle = self.cc.new_connection(state.addresses(), NewConnectionOptions::default())?;
        self.connection = Some(handle);
        Ok(())
    }

    fn resolver_error(&mut self, _err: Error) {
        unsupported("ConstBalancer::resolver_error")
    }

    fn update_connection_state(&mut self, _handle: &ConnectionHandle, _state: ConnectionState) {
        let picker = Arc::new(ConstPicker::with_error(CONST_PICKER_ERROR));
        self.cc.update_state(BalancerState::new(ConnectivityState::Ready, picker));
    }

    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::HandlePool;
    use crate::recorder::RecordingClientConn;
    use rrcheck_common::PickInfo;

    fn setup() -> (Arc<RecordingClientConn>, ConstBalancer) {
        let cc = Arc::new(RecordingClientConn::new(HandlePool::new(4)));
        let balancer = ConstBalancer::new(cc.clone());
        (cc, balancer)
    }

    #[test]
    fn test_empty_addresses_is_noop() {
        let (cc, mut balancer) = setup();
        balancer.update_client_conn_state(ClientConnState::default()).unwrap();
        assert!(balancer.connection().is_none());
        assert!(cc.try_recv_created().is_none());
        assert_eq!(cc.created(), 0);
    }

    #[test]
    fn test_creates_exactly_one_connection() {
        let (cc, mut balancer) = setup();
        balancer
            .update_client_conn_state(ClientConnState::from_addresses(["10.0.0.1:80"]))
            .unwrap();
        balancer
            .update_client_conn_state(ClientConnState::from_addresses([
                "10.0.0.1:80",
                "10.0.0.2:80",
            ]))
            .unwrap();

        assert_eq!(cc.created(), 1);
        let created = cc.try_recv_created().unwrap();
        assert_eq!(created.index(), 0);
        assert_eq!(balancer.connection(), Some(&created));
        assert!(cc.try_recv_created().is_none());
    }

    #[test]
    fn test_state_change_publishes_error_picker() {
        let (cc, mut balancer) = setup();
        balancer
            .update_client_conn_state(ClientConnState::from_addresses(["10.0.0.1:80"]))
            .unwrap();
        let handle = cc.try_recv_created().unwrap();

        balancer.update_connection_state(&handle, ConnectionState::new(ConnectivityState::Ready));

        assert_eq!(cc.try_recv_state(), Some(ConnectivityState::Ready));
        let picker = cc.try_recv_picker().unwrap();
        let err = picker.pick(&PickInfo::default()).unwrap_err();
        assert_eq!(err, Error::Pick(CONST_PICKER_ERROR.to_string()));
    }

    #[test]
    fn test_builder_name() {
        assert_eq!(ConstBalancerBuilder.name(), "test-const-balancer");
    }

    #[test]
    #[should_panic(expected = "ConstBalancer::resolver_error")]
    fn test_resolver_error_is_unsupported() {
        let (_cc, mut balancer) = setup();
        balancer.resolver_error(Error::Resolver("no such host".to_string()));
    }
}
