//! Node lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle state of a mesh node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Registered but not yet participating
    Dormant,
    /// Coming up
    Awakening,
    /// Fully participating in the mesh
    Active,
    /// Processing propagated content
    Dreaming,
    /// Mid-walk during a synchronization pass
    Synchronizing,
    /// Drift score breached the threshold
    Drifting,
}

impl NodeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeState::Dormant => "dormant",
            NodeState::Awakening => "awakening",
            NodeState::Active => "active",
            NodeState::Dreaming => "dreaming",
            NodeState::Synchronizing => "synchronizing",
            NodeState::Drifting => "drifting",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dormant" => Some(NodeState::Dormant),
            "awakening" => Some(NodeState::Awakening),
            "active" => Some(NodeState::Active),
            "dreaming" => Some(NodeState::Dreaming),
            "synchronizing" => Some(NodeState::Synchronizing),
            "drifting" => Some(NodeState::Drifting),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
