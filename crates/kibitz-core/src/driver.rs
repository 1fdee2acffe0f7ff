//! Cycle driver: one orchestration cycle per navigation event.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::orchestrator::Orchestrator;
use crate::watcher::NavEvent;

/// Source of the auto-trigger preference, read once per navigation cycle.
#[async_trait]
pub trait PreferenceSource: Send + Sync {
    async fn auto_trigger(&self) -> bool;
}

/// Consumes navigation events and runs orchestration cycles.
///
/// At most one cycle is live at a time: a new event aborts the previous
/// cycle's task outright, and the generation check inside the orchestrator
/// catches whatever the abort raced with.
pub struct Driver {
    orchestrator: Arc<Orchestrator>,
    prefs: Arc<dyn PreferenceSource>,
}

impl Driver {
    pub fn new(orchestrator: Arc<Orchestrator>, prefs: Arc<dyn PreferenceSource>) -> Self {
        Self {
            orchestrator,
            prefs,
        }
    }

    /// Run until the event channel closes.
    pub async fn run(&self, mut events: mpsc::Receiver<NavEvent>) {
        let mut current: Option<JoinHandle<()>> = None;

        while let Some(event) = events.recv().await {
            if let Some(handle) = current.take() {
                handle.abort();
            }

            let orchestrator = self.orchestrator.clone();
            let prefs = self.prefs.clone();
            current = Some(tokio::spawn(async move {
                let auto_trigger = prefs.auto_trigger().await;
                match orchestrator.run_cycle(event.generation, auto_trigger).await {
                    Ok(outcome) => debug!(?outcome, path = %event.path, "cycle finished"),
                    Err(e) => warn!(path = %event.path, "cycle failed: {}", e),
                }
            }));
        }
    }
}
