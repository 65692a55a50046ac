//! SyncCoordinator - walks nodes through the synchronization sequence

use crate::registry::NodeRegistry;
use reverie_model::{NodeId, NodeState};
use tracing::debug;

/// Transitions nodes through `Synchronizing` into a steady `Active` state.
///
/// The two phases collapse synchronously: there is no handshake with the
/// node and no representable failure, so unknown ids are skipped and the
/// walk always reports success. A transport-backed implementation would
/// need a pending/ack sub-state machine here; this one deliberately does
/// not.
#[derive(Debug, Default)]
pub struct SyncCoordinator;

impl SyncCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// Walk each known node in `ids` to `Active`. Always returns true.
    pub fn synchronize(&self, registry: &mut NodeRegistry, ids: &[NodeId]) -> bool {
        for id in ids {
            if !registry.contains(id) {
                debug!(node = %id, "skipping unknown node in sync walk");
                continue;
            }
            registry.set_state(id, NodeState::Synchronizing);
            registry.set_state(id, NodeState::Active);
        }
        true
    }
}
