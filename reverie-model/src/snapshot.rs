//! Topology snapshot - point-in-time serializable view of the mesh

use crate::{NodeId, NodeState};
use serde::Serialize;
use std::collections::BTreeMap;

/// A point-in-time view of node states and the connection graph.
///
/// Assembled by the registry under the owner task, so it never reflects a
/// half-applied mutation. BTreeMaps keep the serialized form deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TopologySnapshot {
    pub nodes: BTreeMap<NodeId, NodeState>,
    pub connections: BTreeMap<NodeId, Vec<NodeId>>,
    /// Count of nodes currently active.
    pub sync_health: usize,
}

impl TopologySnapshot {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
