//! Info Records
//!
//! An info is an immutable piece of content. Evolutionary change between
//! generations creates a new info; an existing one is never edited.

use netdrift_events::{InfoSnapshot, Stamp};

use super::ids::{InfoId, NodeId};

/// Immutable content record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    id: InfoId,
    origin: NodeId,
    contents: String,
    created: Stamp,
}

impl Info {
    pub(crate) fn new(id: InfoId, origin: NodeId, contents: String, created: Stamp) -> Self {
        Self {
            id,
            origin,
            contents,
            created,
        }
    }

    pub fn id(&self) -> InfoId {
        self.id
    }

    /// The node that created this info.
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn created(&self) -> Stamp {
        self.created
    }

    pub fn to_snapshot(&self) -> InfoSnapshot {
        InfoSnapshot {
            info_id: self.id.to_string(),
            origin_id: self.origin.to_string(),
            contents: self.contents.clone(),
            created: self.created,
        }
    }
}
