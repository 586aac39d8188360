use crate::{CoreError, Pipeline, PipelineCommand, PushToTalkController};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

/// Runs pipeline callbacks off the keyboard thread and reports their
/// outcome back to the controller.
pub struct PipelineWorker {
    pipeline: Arc<dyn Pipeline>,
    controller: Arc<PushToTalkController>,
    commands_rx: mpsc::UnboundedReceiver<PipelineCommand>,
}

impl PipelineWorker {
    /// Create a worker draining `commands_rx`.
    pub fn new(
        pipeline: Arc<dyn Pipeline>,
        controller: Arc<PushToTalkController>,
        commands_rx: mpsc::UnboundedReceiver<PipelineCommand>,
    ) -> Self {
        Self {
            pipeline,
            controller,
            commands_rx,
        }
    }

    /// Execute commands in order until shutdown or until the controller's
    /// sender is dropped.
    ///
    /// Commands already queued when shutdown is signalled still run, so a
    /// cancel dispatched by the final reset reaches the pipeline.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    while let Ok(command) = self.commands_rx.try_recv() {
                        self.execute(command).await;
                    }
                    info!("Pipeline worker shutting down");
                    break;
                }
                command = self.commands_rx.recv() => match command {
                    Some(command) => self.execute(command).await,
                    None => {
                        info!("Pipeline command channel closed");
                        break;
                    }
                },
            }
        }
    }

    /// Run one command to completion and route its result.
    pub async fn execute(&self, command: PipelineCommand) {
        let pipeline = Arc::clone(&self.pipeline);
        let session_id = command.session_id();
        let started = std::time::Instant::now();

        // A panicking callback surfaces as a JoinError and is treated as a
        // failure like any other.
        let result = tokio::task::spawn_blocking(move || match command {
            PipelineCommand::Start { session_id } => pipeline.on_start(session_id),
            PipelineCommand::Stop { session_id } => pipeline.on_stop(session_id),
            PipelineCommand::Cancel { session_id } => pipeline.on_cancel(session_id),
        })
        .await
        .unwrap_or_else(|e| {
            Err(CoreError::PipelineFailed {
                reason: format!("Pipeline callback panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
        });

        let duration_ms = started.elapsed().as_millis();

        match (command, result) {
            (PipelineCommand::Start { .. }, Ok(())) => {
                debug!(session_id = %session_id, duration_ms, "Pipeline started");
            }
            (PipelineCommand::Stop { .. }, Ok(())) => {
                info!(session_id = %session_id, duration_ms, "Pipeline completed");
                self.controller.complete(session_id);
            }
            (PipelineCommand::Cancel { .. }, Ok(())) => {
                debug!(session_id = %session_id, duration_ms, "Pipeline cancelled");
            }
            (PipelineCommand::Start { .. } | PipelineCommand::Stop { .. }, Err(e)) => {
                error!(session_id = %session_id, error = ?e, "Pipeline failed");
                self.controller.fail(session_id, &failure_reason(&e));
            }
            (PipelineCommand::Cancel { .. }, Err(e)) => {
                warn!(session_id = %session_id, error = ?e, "Pipeline cancel failed");
            }
        }
    }
}

fn failure_reason(error: &CoreError) -> String {
    match error {
        CoreError::PipelineFailed { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}
