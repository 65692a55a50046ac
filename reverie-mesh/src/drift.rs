//! DriftMonitor - check-and-flag drift evaluation

use crate::registry::NodeRegistry;
use reverie_model::{NodeId, NodeState};
use std::collections::BTreeMap;
use tracing::warn;

/// Evaluates injected drift scores against a caller-supplied threshold.
///
/// `check` is not a pure query: a breach flips the node to `Drifting` as
/// part of the read. Callers that want a passive view should read the
/// topology snapshot instead.
#[derive(Debug, Default)]
pub struct DriftMonitor;

impl DriftMonitor {
    pub fn new() -> Self {
        Self
    }

    /// Compare the node's stored score against `threshold`. Strictly
    /// greater counts as a breach: the node is flagged `Drifting` and true
    /// is returned. Unknown ids return false without side effects.
    pub fn check(&self, registry: &mut NodeRegistry, id: &NodeId, threshold: f64) -> bool {
        let Some(score) = registry.drift_score(id) else {
            return false;
        };
        if score > threshold {
            registry.set_state(id, NodeState::Drifting);
            warn!(node = %id, score, threshold, "node drifting");
            true
        } else {
            false
        }
    }

    /// Check every registered node. The result map reflects the checks
    /// themselves, including the false entries; any resynchronization of
    /// flagged nodes happens afterwards and is not visible here.
    pub fn sweep(&self, registry: &mut NodeRegistry, threshold: f64) -> BTreeMap<NodeId, bool> {
        let mut results = BTreeMap::new();
        for id in registry.node_ids() {
            let drifting = self.check(registry, &id, threshold);
            results.insert(id, drifting);
        }
        results
    }
}
