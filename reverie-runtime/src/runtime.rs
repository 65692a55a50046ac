//! Runtime - wires config, clock, and the mesh actor together

use reverie_mesh::{MeshActor, MeshHandle, DEFAULT_CHANNEL_CAPACITY};
use reverie_model::{Clock, MeshConfig, SystemClock};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// A running mesh coordinator.
pub struct Runtime {
    handle: MeshHandle,
    actor_task: JoinHandle<()>,
}

impl Runtime {
    /// Create a new RuntimeBuilder.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get the mesh facade handle.
    pub fn mesh(&self) -> &MeshHandle {
        &self.handle
    }

    /// Shut down the coordinator and wait for the actor task to finish.
    pub async fn shutdown(self) -> Result<(), RuntimeError> {
        self.handle.shutdown().await;
        self.actor_task
            .await
            .map_err(|e| RuntimeError::ActorTask(e.to_string()))
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime").finish_non_exhaustive()
    }
}

/// Builder for Runtime.
pub struct RuntimeBuilder {
    config: MeshConfig,
    clock: Option<Arc<dyn Clock>>,
    channel_capacity: usize,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: MeshConfig::new(),
            clock: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Set the free-form mesh configuration.
    pub fn with_config(mut self, config: MeshConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the clock (tests pin time this way).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Override the command channel capacity.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Build and start the runtime. Must be called from within a tokio
    /// runtime, since the actor is spawned as a task.
    pub fn build(self) -> Runtime {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        info!(
            config_attrs = self.config.len(),
            "starting mesh coordinator"
        );
        let (handle, actor_task) = MeshActor::spawn(self.config, clock, self.channel_capacity);
        Runtime { handle, actor_task }
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("mesh actor task failed: {0}")]
    ActorTask(String),
}
