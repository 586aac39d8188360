//! Pipeline that runs user-configured external commands.
//!
//! Each session boundary may run one command. The session id is passed in
//! the `EARWORM_SESSION_ID` environment variable so the start, stop and
//! cancel hooks can share state on disk. The stop hook's exit status decides
//! whether the session succeeded.

use crate::{AppError, AppResult, config::PipelineConfig};

use std::{
    panic::Location,
    process::{Command, Stdio},
    time::Instant,
};

use earworm_core::{CoreError, CoreResult, Pipeline};
use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Environment variable carrying the session id to every hook.
pub(crate) const SESSION_ENV: &str = "EARWORM_SESSION_ID";

/// [`Pipeline`] backed by external hook commands.
#[derive(Debug, Clone)]
pub(crate) struct HookPipeline {
    hooks: PipelineConfig,
}

impl HookPipeline {
    pub(crate) fn new(hooks: PipelineConfig) -> Self {
        Self { hooks }
    }

    /// Run `argv` to completion. An empty `argv` succeeds without running
    /// anything.
    #[track_caller]
    #[instrument(skip(self, argv))]
    fn run_hook(&self, stage: &'static str, argv: &[String], session_id: Uuid) -> AppResult<()> {
        let Some((program, args)) = argv.split_first() else {
            debug!(stage, session_id = %session_id, "No hook configured");
            return Ok(());
        };

        let started = Instant::now();

        let output = Command::new(program)
            .args(args)
            .env(SESSION_ENV, session_id.to_string())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| AppError::PipelineHookFailed {
                reason: format!("Failed to run {} hook {:?}: {}", stage, program, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::PipelineHookFailed {
                reason: format!("{} hook exited with {}: {}", stage, output.status, stderr.trim()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(
            stage,
            session_id = %session_id,
            duration_ms = started.elapsed().as_millis(),
            "Hook finished"
        );

        Ok(())
    }
}

impl Pipeline for HookPipeline {
    fn on_start(&self, session_id: Uuid) -> CoreResult<()> {
        self.run_hook("start", &self.hooks.start, session_id)
            .map_err(pipeline_failed)
    }

    fn on_stop(&self, session_id: Uuid) -> CoreResult<()> {
        self.run_hook("stop", &self.hooks.stop, session_id)
            .map_err(pipeline_failed)
    }

    fn on_cancel(&self, session_id: Uuid) -> CoreResult<()> {
        self.run_hook("cancel", &self.hooks.cancel, session_id)
            .map_err(pipeline_failed)
    }
}

#[track_caller]
fn pipeline_failed(error: AppError) -> CoreError {
    let reason = match error {
        AppError::PipelineHookFailed { reason, .. } => reason,
        other => other.to_string(),
    };
    CoreError::PipelineFailed {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
