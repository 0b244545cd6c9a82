//! A small weighted round-robin policy used as a policy under test

use rrcheck_common::{
    Address, ClientConnState, ConnectionState, ConnectivityState, NewConnectionOptions,
};
use rrcheck_core::balancer::{Balancer, BalancerState, ClientConn, ConstPicker, RoundRobinPicker};
use rrcheck_core::{ConnectionHandle, Error, Result};
use std::sync::Arc;

struct Backend {
    handle: ConnectionHandle,
    weight: usize,
    state: ConnectivityState,
}

/// One connection per address; READY connections are picked in address order,
/// each repeated `weight` times per cycle
pub struct WeightedRoundRobin {
    cc: Arc<dyn ClientConn>,
    /// Keyed by address, in the order addresses were last resolved
    backends: Vec<(String, Backend)>,
}

impl WeightedRoundRobin {
    pub fn new(cc: Arc<dyn ClientConn>) -> Self {
        Self { cc, backends: Vec::new() }
    }

    fn weight_of(address: &Address) -> usize {
        address.attributes.get("weight").and_then(|w| w.parse().ok()).unwrap_or(1)
    }

    fn regenerate_picker(&self) {
        let ready: Vec<ConnectionHandle> = self
            .backends
            .iter()
            .filter(|(_, b)| b.state == ConnectivityState::Ready)
            .flat_map(|(_, b)| std::iter::repeat(b.handle.clone()).take(b.weight))
            .collect();

        let state = if ready.is_empty() {
            BalancerState::new(
                ConnectivityState::Connecting,
                Arc::new(ConstPicker::with_error("no ready connections")),
            )
        } else {
            BalancerState::new(ConnectivityState::Ready, Arc::new(RoundRobinPicker::new(ready)))
        };
        self.cc.update_state(state);
    }

    fn backend(&self, addr: &str) -> Option<&Backend> {
        self.backends.iter().find(|(a, _)| a == addr).map(|(_, b)| b)
    }

    /// Remove connections created by an update that did not complete
    fn discard_new(&self, partial: &[(String, Backend)]) {
        for (_, backend) in partial {
            if !self.backends.iter().any(|(_, b)| b.handle == backend.handle) {
                self.cc.remove_connection(&backend.handle);
            }
        }
    }
}

impl Balancer for WeightedRoundRobin {
    fn update_client_conn_state(&mut self, state: ClientConnState) -> Result<()> {
        let mut backends: Vec<(String, Backend)> = Vec::with_capacity(state.addresses().len());

        for address in state.addresses() {
            // A repeated address keeps its first entry
            if backends.iter().any(|(addr, _)| *addr == address.addr) {
                continue;
            }
            let weight = Self::weight_of(address);
            let backend = match self.backend(&address.addr) {
                Some(old) => Backend { handle: old.handle.clone(), weight, state: old.state },
                None => {
                    let opts = NewConnectionOptions::default();
                    match self.cc.new_connection(std::slice::from_ref(address), opts) {
                        Ok(handle) => {
                            handle.connect();
                            Backend { handle, weight, state: ConnectivityState::Idle }
                        }
                        Err(err) => {
                            self.discard_new(&backends);
                            return Err(err);
                        }
                    }
                }
            };
            backends.push((address.addr.clone(), backend));
        }

        let mut gone: Vec<&ConnectionHandle> = self
            .backends
            .iter()
            .filter(|(addr, _)| !backends.iter().any(|(kept, _)| kept == addr))
            .map(|(_, b)| &b.handle)
            .collect();
        gone.sort_by_key(|h| h.index());
        for handle in gone {
            self.cc.remove_connection(handle);
        }

        self.backends = backends;
        self.regenerate_picker();
        Ok(())
    }

    fn resolver_error(&mut self, err: Error) {
        tracing::warn!("resolver error: {}", err);
    }

    fn update_connection_state(&mut self, handle: &ConnectionHandle, state: ConnectionState) {
        if let Some((_, backend)) = self.backends.iter_mut().find(|(_, b)| b.handle == *handle) {
            backend.state = state.state;
            self.regenerate_picker();
        }
    }

    fn close(&mut self) {
        for (_, backend) in self.backends.drain(..) {
            self.cc.remove_connection(&backend.handle);
        }
    }
}
