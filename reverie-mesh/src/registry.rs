//! NodeRegistry - owns nodes, lifecycle state, and the adjacency relation

use reverie_model::{Node, NodeId, NodeState, TopologySnapshot};
use std::collections::{BTreeMap, BTreeSet};

/// Owns the set of known nodes and the symmetric connection graph.
///
/// Invariant: if `b` appears in `a`'s adjacency set, `a` appears in `b`'s.
/// Every operation is total; invalid references return `false` without
/// mutating anything.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<NodeId, Node>,
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node in `Dormant` state with an empty connection set and
    /// zero drift. Returns false if the id is already taken; the existing
    /// node is left untouched.
    pub fn register(&mut self, id: NodeId, now_ms: u64) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.adjacency.insert(id.clone(), BTreeSet::new());
        self.nodes.insert(id.clone(), Node::new(id, now_ms));
        true
    }

    /// Connect two nodes symmetrically. Both endpoints must already be
    /// registered; repeated connects are idempotent.
    pub fn connect(&mut self, a: &NodeId, b: &NodeId) -> bool {
        if !self.nodes.contains_key(a) || !self.nodes.contains_key(b) {
            return false;
        }
        if let Some(set) = self.adjacency.get_mut(a) {
            set.insert(b.clone());
        }
        if let Some(set) = self.adjacency.get_mut(b) {
            set.insert(a.clone());
        }
        true
    }

    /// Set a node's lifecycle state. Unknown ids are ignored.
    pub fn set_state(&mut self, id: &NodeId, state: NodeState) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.state = state;
        }
    }

    /// Inject an externally computed drift score. Returns false on unknown
    /// id. This is the only producer the coordinator has for drift.
    pub fn set_drift_score(&mut self, id: &NodeId, score: f64) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.drift_score = score;
                true
            }
            None => false,
        }
    }

    pub fn state(&self, id: &NodeId) -> Option<NodeState> {
        self.nodes.get(id).map(|n| n.state)
    }

    pub fn drift_score(&self, id: &NodeId) -> Option<f64> {
        self.nodes.get(id).map(|n| n.drift_score)
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All registered ids, in deterministic order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build a point-in-time topology snapshot. Pure read.
    pub fn snapshot(&self) -> TopologySnapshot {
        let nodes = self
            .nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.state))
            .collect();
        let connections = self
            .adjacency
            .iter()
            .map(|(id, set)| (id.clone(), set.iter().cloned().collect()))
            .collect();
        let sync_health = self
            .nodes
            .values()
            .filter(|n| n.state == NodeState::Active)
            .count();
        TopologySnapshot {
            nodes,
            connections,
            sync_health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = NodeRegistry::new();
        assert!(registry.register(id("a"), 100));
        assert!(!registry.register(id("a"), 200));
        assert_eq!(registry.len(), 1);
        // First registration wins; the timestamp is never overwritten.
        assert_eq!(registry.get(&id("a")).unwrap().registered_at, 100);
    }

    #[test]
    fn test_connect_requires_both_endpoints() {
        let mut registry = NodeRegistry::new();
        registry.register(id("a"), 0);

        assert!(!registry.connect(&id("a"), &id("ghost")));
        assert!(!registry.connect(&id("ghost"), &id("a")));
        let snapshot = registry.snapshot();
        assert!(snapshot.connections[&id("a")].is_empty());
    }

    #[test]
    fn test_connect_is_symmetric_and_idempotent() {
        let mut registry = NodeRegistry::new();
        registry.register(id("a"), 0);
        registry.register(id("b"), 0);

        assert!(registry.connect(&id("a"), &id("b")));
        assert!(registry.connect(&id("a"), &id("b")));
        assert!(registry.connect(&id("b"), &id("a")));

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.connections[&id("a")], vec![id("b")]);
        assert_eq!(snapshot.connections[&id("b")], vec![id("a")]);
    }

    #[test]
    fn test_set_state_ignores_unknown_id() {
        let mut registry = NodeRegistry::new();
        registry.register(id("a"), 0);
        registry.set_state(&id("ghost"), NodeState::Active);
        registry.set_state(&id("a"), NodeState::Active);
        assert_eq!(registry.state(&id("a")), Some(NodeState::Active));
        assert_eq!(registry.state(&id("ghost")), None);
    }

    #[test]
    fn test_drift_score_injection() {
        let mut registry = NodeRegistry::new();
        registry.register(id("a"), 0);

        assert_eq!(registry.drift_score(&id("a")), Some(0.0));
        assert!(registry.set_drift_score(&id("a"), 0.4));
        assert_eq!(registry.drift_score(&id("a")), Some(0.4));
        assert!(!registry.set_drift_score(&id("ghost"), 0.4));
    }

    #[test]
    fn test_snapshot_counts_active_nodes() {
        let mut registry = NodeRegistry::new();
        registry.register(id("a"), 0);
        registry.register(id("b"), 0);
        registry.register(id("c"), 0);
        registry.set_state(&id("a"), NodeState::Active);
        registry.set_state(&id("b"), NodeState::Active);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.node_count(), 3);
        assert_eq!(snapshot.sync_health, 2);
    }
}
