//! MeshActor - single owner of all mesh state
//!
//! Every mutation and read is a command on one channel, processed to
//! completion in arrival order. Follow-up work a handler generates (a drift
//! sweep queueing resyncs) goes through an internal FIFO queue drained
//! before the next external command, so self-healing is a new message to
//! the same owner rather than a reentrant call.

use crate::{DriftMonitor, NodeRegistry, PropagationTracker, SyncCoordinator};
use reverie_model::{
    Clock, DreamSeed, MeshConfig, MeshEvent, NodeId, RouteOutcome, SeedId, TopologySnapshot,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info};

/// Default command channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Commands sent to the mesh actor.
pub enum MeshCmd {
    /// Register a node; false if the id is already taken.
    Register {
        id: NodeId,
        resp: oneshot::Sender<bool>,
    },
    /// Connect two registered nodes symmetrically.
    Connect {
        a: NodeId,
        b: NodeId,
        resp: oneshot::Sender<bool>,
    },
    /// Inject an externally computed drift score.
    SetDriftScore {
        id: NodeId,
        score: f64,
        resp: oneshot::Sender<bool>,
    },
    /// Walk nodes to `Active`; `None` targets every registered node.
    Synchronize {
        targets: Option<Vec<NodeId>>,
        resp: oneshot::Sender<bool>,
    },
    /// Check a single node's drift against a threshold.
    CheckDrift {
        id: NodeId,
        threshold: f64,
        resp: oneshot::Sender<bool>,
    },
    /// Sweep every node; flagged nodes get a resync queued behind the sweep.
    SweepDrift {
        threshold: f64,
        resp: oneshot::Sender<BTreeMap<NodeId, bool>>,
    },
    /// Create a propagation record and deliver it to the targets.
    Propagate {
        content: String,
        origin: NodeId,
        targets: Vec<NodeId>,
        emotional_vector: Option<BTreeMap<String, f64>>,
        resp: oneshot::Sender<SeedId>,
    },
    /// Look up a propagation record.
    GetSeed {
        id: SeedId,
        resp: oneshot::Sender<Option<DreamSeed>>,
    },
    /// Point-in-time topology snapshot.
    Snapshot {
        resp: oneshot::Sender<TopologySnapshot>,
    },
    /// Dispatch a tagged event and return the structured outcome.
    RouteEvent {
        event: MeshEvent,
        resp: oneshot::Sender<RouteOutcome>,
    },
    /// Self-healing resync queued by a drift sweep. Internal; carries no
    /// responder.
    Resync { id: NodeId },
    /// Stop the actor.
    Shutdown,
}

/// Notices broadcast to observers. Purely informational; slow or absent
/// subscribers never affect command processing.
#[derive(Clone, Debug)]
pub enum MeshNotice {
    NodeRegistered { id: NodeId },
    NodesConnected { a: NodeId, b: NodeId },
    Synchronized { nodes: usize },
    DriftFlagged { id: NodeId, score: f64, threshold: f64 },
    SeedPropagated { id: SeedId, targets: usize },
}

/// The owner task for all mesh state.
pub struct MeshActor {
    registry: NodeRegistry,
    monitor: DriftMonitor,
    coordinator: SyncCoordinator,
    tracker: PropagationTracker,
    config: MeshConfig,
    clock: Arc<dyn Clock>,
    rx: mpsc::Receiver<MeshCmd>,
    /// Follow-up commands queued by handlers, drained FIFO before the next
    /// external command.
    pending: VecDeque<MeshCmd>,
    notice_tx: broadcast::Sender<MeshNotice>,
}

impl MeshActor {
    /// Spawn the actor on a tokio task and return the facade handle plus
    /// the task join handle.
    pub fn spawn(
        config: MeshConfig,
        clock: Arc<dyn Clock>,
        capacity: usize,
    ) -> (crate::MeshHandle, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let (notice_tx, _) = broadcast::channel(256);

        let actor = Self {
            registry: NodeRegistry::new(),
            monitor: DriftMonitor::new(),
            coordinator: SyncCoordinator::new(),
            tracker: PropagationTracker::new(),
            config,
            clock,
            rx,
            pending: VecDeque::new(),
            notice_tx: notice_tx.clone(),
        };

        let task = tokio::spawn(actor.run());
        (crate::MeshHandle::new(tx, notice_tx), task)
    }

    /// Run the command loop until shutdown or until every handle is gone.
    pub async fn run(mut self) {
        for (key, value) in self.config.iter() {
            info!(key, value, "mesh config attribute");
        }
        info!("mesh actor started");

        loop {
            let cmd = match self.pending.pop_front() {
                Some(cmd) => cmd,
                None => match self.rx.recv().await {
                    Some(cmd) => cmd,
                    None => break,
                },
            };
            if !self.handle_cmd(cmd) {
                break;
            }
        }
        debug!("mesh actor stopped");
    }

    /// Process one command. Returns false on shutdown.
    fn handle_cmd(&mut self, cmd: MeshCmd) -> bool {
        match cmd {
            MeshCmd::Register { id, resp } => {
                let _ = resp.send(self.register(id));
            }
            MeshCmd::Connect { a, b, resp } => {
                let _ = resp.send(self.connect(a, b));
            }
            MeshCmd::SetDriftScore { id, score, resp } => {
                let _ = resp.send(self.registry.set_drift_score(&id, score));
            }
            MeshCmd::Synchronize { targets, resp } => {
                let _ = resp.send(self.synchronize(targets));
            }
            MeshCmd::CheckDrift {
                id,
                threshold,
                resp,
            } => {
                let _ = resp.send(self.check_drift(&id, threshold));
            }
            MeshCmd::SweepDrift { threshold, resp } => {
                let _ = resp.send(self.sweep_drift(threshold));
            }
            MeshCmd::Propagate {
                content,
                origin,
                targets,
                emotional_vector,
                resp,
            } => {
                let _ = resp.send(self.propagate(content, origin, targets, emotional_vector));
            }
            MeshCmd::GetSeed { id, resp } => {
                let _ = resp.send(self.tracker.get(&id).cloned());
            }
            MeshCmd::Snapshot { resp } => {
                let _ = resp.send(self.registry.snapshot());
            }
            MeshCmd::RouteEvent { event, resp } => {
                let _ = resp.send(self.route_event(event));
            }
            MeshCmd::Resync { id } => {
                debug!(node = %id, "resynchronizing drifting node");
                self.coordinator
                    .synchronize(&mut self.registry, std::slice::from_ref(&id));
            }
            MeshCmd::Shutdown => return false,
        }
        true
    }

    // ==================== Command Handlers ====================

    pub(crate) fn register(&mut self, id: NodeId) -> bool {
        let created = self.registry.register(id.clone(), self.clock.now_ms());
        if created {
            info!(node = %id, "node registered");
            let _ = self.notice_tx.send(MeshNotice::NodeRegistered { id });
        } else {
            debug!(node = %id, "duplicate registration ignored");
        }
        created
    }

    pub(crate) fn connect(&mut self, a: NodeId, b: NodeId) -> bool {
        let linked = self.registry.connect(&a, &b);
        if linked {
            debug!(a = %a, b = %b, "nodes connected");
            let _ = self.notice_tx.send(MeshNotice::NodesConnected { a, b });
        }
        linked
    }

    pub(crate) fn synchronize(&mut self, targets: Option<Vec<NodeId>>) -> bool {
        let targets = targets.unwrap_or_else(|| self.registry.node_ids());
        let ok = self.coordinator.synchronize(&mut self.registry, &targets);
        info!(nodes = targets.len(), "synchronization pass complete");
        let _ = self.notice_tx.send(MeshNotice::Synchronized {
            nodes: targets.len(),
        });
        ok
    }

    pub(crate) fn check_drift(&mut self, id: &NodeId, threshold: f64) -> bool {
        let score = self.registry.drift_score(id).unwrap_or(0.0);
        let drifting = self.monitor.check(&mut self.registry, id, threshold);
        if drifting {
            let _ = self.notice_tx.send(MeshNotice::DriftFlagged {
                id: id.clone(),
                score,
                threshold,
            });
        }
        drifting
    }

    pub(crate) fn sweep_drift(&mut self, threshold: f64) -> BTreeMap<NodeId, bool> {
        let results = self.monitor.sweep(&mut self.registry, threshold);
        for (id, drifting) in &results {
            if !*drifting {
                continue;
            }
            let score = self.registry.drift_score(id).unwrap_or(0.0);
            let _ = self.notice_tx.send(MeshNotice::DriftFlagged {
                id: id.clone(),
                score,
                threshold,
            });
            // Self-healing goes through the queue, not a reentrant call.
            self.pending.push_back(MeshCmd::Resync { id: id.clone() });
        }
        results
    }

    pub(crate) fn propagate(
        &mut self,
        content: String,
        origin: NodeId,
        targets: Vec<NodeId>,
        emotional_vector: Option<BTreeMap<String, f64>>,
    ) -> SeedId {
        let target_count = targets.len();
        let id = self.tracker.propagate(
            content,
            origin,
            targets,
            emotional_vector,
            self.clock.now_ms(),
        );
        info!(seed = %id, targets = target_count, "dream seed propagated");
        let _ = self.notice_tx.send(MeshNotice::SeedPropagated {
            id,
            targets: target_count,
        });
        id
    }

    pub(crate) fn snapshot(&self) -> TopologySnapshot {
        self.registry.snapshot()
    }
}
