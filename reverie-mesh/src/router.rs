//! Event routing - exhaustive dispatch over the closed event set
//!
//! Routing runs inside the owner task so composite outcomes (synchronize
//! plus a fresh health count) never interleave with other mutations.

use crate::actor::MeshActor;
use reverie_model::{MeshEvent, RouteOutcome, DEFAULT_DRIFT_THRESHOLD};
use tracing::debug;

impl MeshActor {
    /// Dispatch one event and build its structured outcome.
    ///
    /// Unknown event kinds are acknowledged, never rejected: the router's
    /// contract is to answer every request.
    pub(crate) fn route_event(&mut self, event: MeshEvent) -> RouteOutcome {
        match event {
            MeshEvent::ConsciousnessSync { target_nodes } => {
                let nodes_synced = target_nodes.len();
                self.synchronize(Some(target_nodes));
                let mesh_health = self.snapshot().sync_health;
                RouteOutcome::Synchronized {
                    nodes_synced,
                    mesh_health,
                }
            }
            MeshEvent::DreamPropagation {
                content,
                source_node,
                targets,
                emotional_vector,
            } => {
                let propagation_paths = targets.len();
                let seed_id = self.propagate(content, source_node, targets, emotional_vector);
                RouteOutcome::DreamPropagated {
                    seed_id,
                    propagation_paths,
                }
            }
            MeshEvent::DriftDetection { threshold } => {
                let threshold = threshold.unwrap_or(DEFAULT_DRIFT_THRESHOLD);
                let results = self.sweep_drift(threshold);
                let total_nodes = results.len();
                let drifting_nodes = results
                    .into_iter()
                    .filter(|(_, drifting)| *drifting)
                    .map(|(id, _)| id)
                    .collect();
                RouteOutcome::DriftMonitored {
                    drifting_nodes,
                    total_nodes,
                }
            }
            MeshEvent::Other { event_type } => {
                debug!(event_type = %event_type, "unknown event type acknowledged");
                RouteOutcome::RoutedViaMesh { mesh_active: true }
            }
        }
    }
}
