//! Node - a registered mesh participant

use crate::NodeState;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Caller-supplied node identifier.
///
/// Opaque beyond equality and ordering; the coordinator never parses it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by NodeId be queried with plain &str.
impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A registered participant in the mesh.
///
/// Owned exclusively by the registry; everything else refers to nodes by id.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub state: NodeState,
    /// Millisecond timestamp set at registration, never mutated.
    pub registered_at: u64,
    /// Externally injected deviation signal. The mesh only ever reads it;
    /// no producer exists inside the coordinator.
    pub drift_score: f64,
}

impl Node {
    /// A freshly registered node: dormant, zero drift.
    pub fn new(id: NodeId, registered_at: u64) -> Self {
        Self {
            id,
            state: NodeState::Dormant,
            registered_at,
            drift_score: 0.0,
        }
    }
}
