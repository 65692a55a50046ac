//! Reverie Model
//!
//! Pure data types for the reverie mesh coordinator, decoupled from
//! the actor runtime and from any transport or storage concerns.

pub mod clock;
pub mod config;
pub mod event;
pub mod node;
pub mod seed;
pub mod snapshot;
pub mod state;

// Re-exports
pub use clock::{Clock, MockClock, SystemClock};
pub use config::MeshConfig;
pub use event::{MeshEvent, RouteOutcome};
pub use node::{Node, NodeId};
pub use seed::{DreamSeed, SeedId};
pub use snapshot::TopologySnapshot;
pub use state::NodeState;

/// Drift threshold applied when a caller does not supply one.
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.15;

/// Creativity accrued by a seed for each transforming delivery.
pub const CREATIVITY_INCREMENT: f64 = 0.1;

/// Content strictly longer than this many bytes triggers a transformation.
pub const TRANSFORMATION_MIN_LEN: usize = 10;
