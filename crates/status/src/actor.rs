// Path: crates/status/src/actor.rs

//! Runs a [`StatusEngine`] on a dedicated tokio task.
//!
//! Producers on any task enqueue events through an [`EngineHandle`]; the
//! single consumer applies them in queue order, so sampler timestamps and
//! field derivation stay globally ordered. Each resulting snapshot is
//! published on a `watch` channel.

use crate::engine::{EngineSnapshot, StatusEngine};
use nodestat_types::app::CoreEvent;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Errors returned by an [`EngineHandle`].
#[derive(Debug, Error)]
pub enum ActorError {
    /// The engine task is no longer running.
    #[error("status engine task has stopped")]
    Stopped,
}

/// A cloneable handle to a running engine task.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    events: mpsc::Sender<CoreEvent>,
    snapshots: watch::Receiver<EngineSnapshot>,
}

impl EngineHandle {
    /// Enqueues an event, waiting while the queue is full.
    pub async fn send(&self, event: CoreEvent) -> Result<(), ActorError> {
        self.events.send(event).await.map_err(|_| ActorError::Stopped)
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.snapshots.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> EngineSnapshot {
        self.snapshots.borrow().clone()
    }
}

/// Moves `engine` onto a new task reading a queue of `queue_depth` events.
///
/// The task stops once every handle has been dropped and the queue is
/// drained; its join handle then yields the engine back.
pub fn spawn_engine(
    mut engine: StatusEngine,
    queue_depth: usize,
) -> (EngineHandle, JoinHandle<StatusEngine>) {
    let (event_tx, mut event_rx) = mpsc::channel::<CoreEvent>(queue_depth.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

    let task = tokio::spawn(async move {
        tracing::debug!(target: "engine", event = "started", "Status engine task started");
        while let Some(event) = event_rx.recv().await {
            let snapshot = engine.apply(&event);
            snapshot_tx.send_replace(snapshot);
        }
        tracing::debug!(
            target: "engine",
            event = "stopped",
            applied = engine.events_applied(),
            "Status engine task stopped"
        );
        engine
    });

    (
        EngineHandle {
            events: event_tx,
            snapshots: snapshot_rx,
        },
        task,
    )
}
