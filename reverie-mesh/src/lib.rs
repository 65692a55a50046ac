//! Reverie Mesh - node-mesh state coordinator
//!
//! Registers abstract participants ("nodes"), tracks symmetric connections
//! between them, walks their lifecycle state, reacts to externally injected
//! drift, and propagates dream-seed payloads while recording the traversal
//! path and a derived score.
//!
//! All mesh state is owned by a single [`MeshActor`] task; [`MeshHandle`] is
//! the cloneable facade that sends commands over a channel and awaits the
//! response, so every mutation is serialized in arrival order. Operations
//! are total by design: invalid references degrade to `false`/`None`/an
//! acknowledgment rather than an error, keeping the coordinator live no
//! matter what callers throw at it.

pub mod actor;
pub mod drift;
pub mod handle;
pub mod propagation;
pub mod registry;
mod router;
pub mod sync;

// Re-exports
pub use actor::{MeshActor, MeshCmd, MeshNotice, DEFAULT_CHANNEL_CAPACITY};
pub use drift::DriftMonitor;
pub use handle::{HandleError, MeshHandle};
pub use propagation::PropagationTracker;
pub use registry::NodeRegistry;
pub use sync::SyncCoordinator;

pub use reverie_model::{
    Clock, DreamSeed, MeshConfig, MeshEvent, MockClock, Node, NodeId, NodeState, RouteOutcome,
    SeedId, SystemClock, TopologySnapshot, DEFAULT_DRIFT_THRESHOLD,
};
