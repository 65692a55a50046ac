//! Reverie Runtime
//!
//! Composition root: builds the mesh actor from configuration, hands out
//! the facade handle, and shuts the coordinator down cleanly. One runtime
//! per mesh instance; the handle is passed explicitly to callers, never
//! reached through ambient state.

mod runtime;

pub use runtime::{Runtime, RuntimeBuilder, RuntimeError};

// Re-exports for callers that only depend on the runtime crate.
pub use reverie_mesh::{HandleError, MeshHandle, MeshNotice};
pub use reverie_model::{
    DreamSeed, MeshConfig, MeshEvent, NodeId, NodeState, RouteOutcome, SeedId, TopologySnapshot,
};
