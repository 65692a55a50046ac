//! MeshHandle - cloneable facade over the mesh actor
//!
//! Each operation sends a command and awaits its oneshot response. Domain
//! misses (unknown node, duplicate registration, unknown event kind) come
//! back inside the response as `false`/`None`/an acknowledgment; the only
//! error this boundary can produce is the actor being gone.

use crate::actor::{MeshCmd, MeshNotice};
use reverie_model::{
    DreamSeed, MeshEvent, NodeId, RouteOutcome, SeedId, TopologySnapshot,
    DEFAULT_DRIFT_THRESHOLD,
};
use std::collections::BTreeMap;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Error type for handle operations.
#[derive(Debug, thiserror::Error)]
pub enum HandleError {
    /// The actor task has stopped or its channel closed mid-request.
    #[error("mesh actor unavailable")]
    ActorGone,
}

/// Cloneable facade for mesh operations.
pub struct MeshHandle {
    tx: mpsc::Sender<MeshCmd>,
    notice_tx: broadcast::Sender<MeshNotice>,
}

impl Clone for MeshHandle {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            notice_tx: self.notice_tx.clone(),
        }
    }
}

impl std::fmt::Debug for MeshHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshHandle").finish_non_exhaustive()
    }
}

impl MeshHandle {
    pub(crate) fn new(tx: mpsc::Sender<MeshCmd>, notice_tx: broadcast::Sender<MeshNotice>) -> Self {
        Self { tx, notice_tx }
    }

    /// Register a node. Returns false if the id was already registered.
    pub async fn register_node(&self, id: impl Into<NodeId>) -> Result<bool, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::Register {
                id: id.into(),
                resp: resp_tx,
            })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Connect two nodes symmetrically. Returns false unless both are
    /// registered.
    pub async fn connect_nodes(
        &self,
        a: impl Into<NodeId>,
        b: impl Into<NodeId>,
    ) -> Result<bool, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::Connect {
                a: a.into(),
                b: b.into(),
                resp: resp_tx,
            })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Inject an externally computed drift score for a node.
    pub async fn set_drift_score(
        &self,
        id: impl Into<NodeId>,
        score: f64,
    ) -> Result<bool, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::SetDriftScore {
                id: id.into(),
                score,
                resp: resp_tx,
            })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Walk the given nodes to `Active`; `None` targets every registered
    /// node.
    pub async fn synchronize_states(
        &self,
        targets: Option<Vec<NodeId>>,
    ) -> Result<bool, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::Synchronize {
                targets,
                resp: resp_tx,
            })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Check one node's drift against a threshold. A breach flags the node
    /// `Drifting` as a side effect of the check.
    pub async fn check_drift(
        &self,
        id: impl Into<NodeId>,
        threshold: f64,
    ) -> Result<bool, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::CheckDrift {
                id: id.into(),
                threshold,
                resp: resp_tx,
            })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Sweep every node for drift; `None` uses the default threshold.
    /// Flagged nodes are resynchronized right after the sweep; the returned
    /// map reflects the checks themselves.
    pub async fn monitor_drift_across_mesh(
        &self,
        threshold: Option<f64>,
    ) -> Result<BTreeMap<NodeId, bool>, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::SweepDrift {
                threshold: threshold.unwrap_or(DEFAULT_DRIFT_THRESHOLD),
                resp: resp_tx,
            })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Create a propagation record and deliver it to `targets` in order.
    /// Returns the new record's id.
    pub async fn propagate_dream_seed(
        &self,
        content: impl Into<String>,
        origin: impl Into<NodeId>,
        targets: Vec<NodeId>,
        emotional_vector: Option<BTreeMap<String, f64>>,
    ) -> Result<SeedId, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::Propagate {
                content: content.into(),
                origin: origin.into(),
                targets,
                emotional_vector,
                resp: resp_tx,
            })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Look up a propagation record.
    pub async fn get_seed(&self, id: SeedId) -> Result<Option<DreamSeed>, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::GetSeed { id, resp: resp_tx })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Point-in-time topology snapshot.
    pub async fn get_topology(&self) -> Result<TopologySnapshot, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::Snapshot { resp: resp_tx })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Dispatch a tagged event and return the structured outcome.
    pub async fn route_event(&self, event: MeshEvent) -> Result<RouteOutcome, HandleError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(MeshCmd::RouteEvent {
                event,
                resp: resp_tx,
            })
            .await
            .map_err(|_| HandleError::ActorGone)?;
        resp_rx.await.map_err(|_| HandleError::ActorGone)
    }

    /// Subscribe to mesh notices.
    pub fn subscribe(&self) -> broadcast::Receiver<MeshNotice> {
        self.notice_tx.subscribe()
    }

    /// Ask the actor to stop. Safe to call more than once.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(MeshCmd::Shutdown).await;
    }
}
