//! A network handle that can be shared across threads.
//!
//! Each call locks the whole network, so a process step or a `receive_all`
//! runs to completion before any other caller observes the network.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use super::Network;

#[derive(Debug, Clone, Default)]
pub struct SharedNetwork {
    inner: Arc<Mutex<Network>>,
}

impl SharedNetwork {
    pub fn new(network: Network) -> Self {
        Self {
            inner: Arc::new(Mutex::new(network)),
        }
    }

    /// Locks the network for the lifetime of the guard.
    pub fn lock(&self) -> MutexGuard<'_, Network> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access to the network.
    pub fn with<T>(&self, f: impl FnOnce(&mut Network) -> T) -> T {
        let mut network = self.inner.lock();
        f(&mut network)
    }

    /// Returns the network if this is the last handle.
    pub fn try_unwrap(self) -> Result<Network, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Network> for SharedNetwork {
    fn from(network: Network) -> Self {
        Self::new(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Agent, FixedContent, Source};
    use std::thread;

    #[test]
    fn test_concurrent_receivers_see_whole_steps() {
        let mut net = Network::new();
        let agents: Vec<_> = (0..4).map(|_| net.add_agent(Agent::new()).unwrap()).collect();
        let source = net
            .add_source_global(Source::new(FixedContent("11".to_string())))
            .unwrap();
        net.broadcast(source).unwrap();

        let shared = SharedNetwork::new(net);
        let handles: Vec<_> = agents
            .iter()
            .map(|&agent| {
                let shared = shared.clone();
                thread::spawn(move || shared.with(|n| n.receive_all(agent).unwrap()))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_some());
        }

        let net = shared.try_unwrap().unwrap();
        for agent in agents {
            assert_eq!(net.contents_of(agent), Some("11"));
            assert!(net.pending_for(agent).is_empty());
        }
    }
}
