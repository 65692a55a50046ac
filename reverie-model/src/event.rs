//! Mesh events and routing outcomes
//!
//! Events are a closed variant set: the three known kinds plus a catch-all,
//! matched exhaustively by the router. Adding an event kind is a
//! compile-time decision, not a silent string fallback.

use crate::{NodeId, SeedId};
use serde::Serialize;
use std::collections::BTreeMap;

/// A tagged event consumed once by the router and discarded.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshEvent {
    /// Synchronize the named nodes.
    ConsciousnessSync { target_nodes: Vec<NodeId> },
    /// Propagate a content payload to the named targets.
    DreamPropagation {
        content: String,
        source_node: NodeId,
        targets: Vec<NodeId>,
        emotional_vector: Option<BTreeMap<String, f64>>,
    },
    /// Run a drift sweep, with the default threshold unless one is given.
    DriftDetection { threshold: Option<f64> },
    /// Anything else. Acknowledged without side effects so unknown kinds
    /// degrade instead of failing.
    Other { event_type: String },
}

/// Structured result returned by the event router.
///
/// Serializes with a `status` tag carrying the external literal for each
/// variant (`synchronized`, `dream_propagated`, `drift_monitored`,
/// `routed_via_mesh`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Synchronized {
        nodes_synced: usize,
        /// Count of active nodes in a snapshot taken after the sync.
        mesh_health: usize,
    },
    DreamPropagated {
        seed_id: SeedId,
        propagation_paths: usize,
    },
    DriftMonitored {
        drifting_nodes: Vec<NodeId>,
        total_nodes: usize,
    },
    RoutedViaMesh {
        mesh_active: bool,
    },
}

impl RouteOutcome {
    /// The external status literal for this outcome.
    pub fn status(&self) -> &'static str {
        match self {
            RouteOutcome::Synchronized { .. } => "synchronized",
            RouteOutcome::DreamPropagated { .. } => "dream_propagated",
            RouteOutcome::DriftMonitored { .. } => "drift_monitored",
            RouteOutcome::RoutedViaMesh { .. } => "routed_via_mesh",
        }
    }
}
