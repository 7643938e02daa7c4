//! Identifiers
//!
//! Nodes and networks are identified by UUIDs so they can exist before they
//! are attached. Infos, vectors and transmissions are numbered by the network
//! that creates them; their ids remember that network so a foreign id is never
//! mistaken for a local one.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(pub Uuid);

impl NetworkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NetworkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name {
            network: NetworkId,
            seq: u64,
        }

        impl $name {
            pub(crate) fn new(network: NetworkId, seq: u64) -> Self {
                Self { network, seq }
            }

            /// The network that created this record.
            pub fn network(&self) -> NetworkId {
                self.network
            }

            /// 1-based position in creation order within the network.
            pub fn seq(&self) -> u64 {
                self.seq
            }

            /// Arena slot, if the id belongs to `network`.
            pub(crate) fn slot_in(&self, network: NetworkId) -> Option<usize> {
                if self.network == network && self.seq > 0 {
                    Some((self.seq - 1) as usize)
                } else {
                    None
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{:06}"), self.seq)
            }
        }
    };
}

record_id!(
    /// Identifier of an info, unique within its network.
    InfoId,
    "info"
);
record_id!(
    /// Identifier of a vector, unique within its network.
    VectorId,
    "vec"
);
record_id!(
    /// Identifier of a transmission, unique within its network.
    TransmissionId,
    "tx"
);
