use crate::{HookPipeline, config::PipelineConfig};

use earworm_core::Pipeline;
use uuid::Uuid;

#[cfg(unix)]
use {
    earworm_core::{CoreError, PipelineWorker, PushToTalkController, RecordingState},
    std::sync::Arc,
    tokio::sync::mpsc,
};

#[cfg(unix)]
fn shell(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

/// WHAT: Unconfigured hooks succeed without running anything
/// WHY: A bare install must still cycle through every state
#[test]
fn given_no_hooks_when_pipeline_called_then_all_succeed() {
    let pipeline = HookPipeline::new(PipelineConfig::default());
    let session_id = Uuid::new_v4();

    assert!(pipeline.on_start(session_id).is_ok());
    assert!(pipeline.on_stop(session_id).is_ok());
    assert!(pipeline.on_cancel(session_id).is_ok());
}

/// WHAT: Every hook sees the session id in its environment
/// WHY: Start, stop and cancel hooks share state through it
#[cfg(unix)]
#[test]
fn given_session_when_hook_runs_then_session_env_set() {
    // Given: A stop hook that checks the variable
    let session_id = Uuid::new_v4();
    let pipeline = HookPipeline::new(PipelineConfig {
        stop: shell(&format!("test \"$EARWORM_SESSION_ID\" = \"{}\"", session_id)),
        ..PipelineConfig::default()
    });

    // When: Running it for that session
    let result = pipeline.on_stop(session_id);

    // Then: The check passed
    assert!(result.is_ok(), "{:?}", result);
}

/// WHAT: A non-zero exit fails with the hook's stderr in the reason
/// WHY: The failure toast should say what went wrong
#[cfg(unix)]
#[test]
#[allow(clippy::panic)]
fn given_failing_hook_when_stopping_then_pipeline_failed_with_stderr() {
    // Given: A stop hook that complains and exits 3
    let pipeline = HookPipeline::new(PipelineConfig {
        stop: shell("echo model missing >&2; exit 3"),
        ..PipelineConfig::default()
    });

    // When: Stopping
    let result = pipeline.on_stop(Uuid::new_v4());

    // Then: PipelineFailed carrying stage and stderr
    match result {
        Err(CoreError::PipelineFailed { reason, .. }) => {
            assert!(reason.starts_with("stop hook exited"), "{}", reason);
            assert!(reason.ends_with("model missing"), "{}", reason);
        }
        other => panic!("expected PipelineFailed, got {:?}", other),
    }
}

/// WHAT: A hook that cannot be spawned fails the stage
/// WHY: A wrong path in the config must not hang the session
#[cfg(unix)]
#[test]
#[allow(clippy::panic)]
fn given_missing_program_when_starting_then_pipeline_failed() {
    let pipeline = HookPipeline::new(PipelineConfig {
        start: vec!["/nonexistent/earworm-hook".to_string()],
        ..PipelineConfig::default()
    });

    match pipeline.on_start(Uuid::new_v4()) {
        Err(CoreError::PipelineFailed { reason, .. }) => {
            assert!(reason.starts_with("Failed to run start hook"), "{}", reason);
        }
        other => panic!("expected PipelineFailed, got {:?}", other),
    }
}

/// WHAT: Hook outcomes drive the controller back to Idle
/// WHY: Processing ends only when the pipeline reports back
#[cfg(unix)]
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_hooks_when_worker_executes_session_then_controller_idles() {
    for (script, ok) in [("exit 0", true), ("exit 1", false)] {
        // Given: A controller in Processing with start and stop queued
        let (commands_tx, mut commands_rx) = mpsc::unbounded_channel();
        let controller = Arc::new(PushToTalkController::new(commands_tx));
        let pipeline = Arc::new(HookPipeline::new(PipelineConfig {
            start: shell("true"),
            stop: shell(script),
            ..PipelineConfig::default()
        }));
        let (_idle_tx, idle_rx) = mpsc::unbounded_channel();
        let worker = PipelineWorker::new(pipeline, Arc::clone(&controller), idle_rx);
        let _ = controller.trigger_pressed().unwrap();
        let _ = controller.trigger_released().unwrap();
        assert_eq!(controller.state(), RecordingState::Processing);

        // When: The worker runs both commands
        worker.execute(commands_rx.try_recv().unwrap()).await;
        worker.execute(commands_rx.try_recv().unwrap()).await;

        // Then: Idle either way, nothing else queued
        assert_eq!(controller.state(), RecordingState::Idle, "ok = {}", ok);
        assert!(commands_rx.try_recv().is_err());
    }
}
