use crate::{
    AppCommand, AppResult, KeyboardListener, UiEvent, Watchdog, config::Config,
    overlay::OverlayHandle, tray_manager::TrayMenuIds,
};

use std::{sync::Arc, time::Duration};

use earworm_core::{Pipeline, PipelineCommand, PipelineWorker, PushToTalkController};
use tao::event_loop::EventLoopProxy;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{error, info, instrument, warn};
use tray_icon::menu::MenuEvent;

/// How long shutdown waits for each background task.
const TASK_JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Main application state.
///
/// Runs on the async runtime thread. Tray and overlay updates travel to the
/// main thread through the controller's subscribers because `TrayIcon` is
/// `!Send` and must remain on the UI thread.
pub struct App {
    pub(crate) controller: Arc<PushToTalkController>,
    pub(crate) listener: KeyboardListener,
    pub(crate) pipeline: Arc<dyn Pipeline>,
    pub(crate) pipeline_rx: mpsc::UnboundedReceiver<PipelineCommand>,
    pub(crate) command_tx: mpsc::UnboundedSender<AppCommand>,
    pub(crate) command_rx: mpsc::UnboundedReceiver<AppCommand>,
    pub(crate) ui_proxy: EventLoopProxy<UiEvent>,
    pub(crate) config: Config,
    pub(crate) menu_ids: TrayMenuIds,
    pub(crate) overlay: Option<OverlayHandle>,
}

impl App {
    /// Run the main application loop until exit is requested.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Earworm starting");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let worker = PipelineWorker::new(
            Arc::clone(&self.pipeline),
            Arc::clone(&self.controller),
            self.pipeline_rx,
        );
        let worker_handle = tokio::spawn(worker.run(shutdown_rx.clone()));

        let watchdog = Watchdog::new(
            Arc::clone(&self.controller),
            self.listener.clone(),
            self.config.watchdog.clone(),
        );
        let watchdog_handle = tokio::spawn(watchdog.run(shutdown_rx));

        // MenuEvent::receiver() blocks on recv(), so the forwarder owns one
        // blocking thread. It stops at the next menu event after the command
        // receiver is dropped.
        let menu_ids = self.menu_ids.clone();
        let menu_tx = self.command_tx.clone();
        let menu_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                let Some(command) = menu_command(&menu_ids, &event) else {
                    continue;
                };
                if menu_tx.send(command).is_err() {
                    break;
                }
            }
        });

        while let Some(command) = self.command_rx.recv().await {
            match command {
                AppCommand::ToggleRecording => {
                    if let Err(e) = self.controller.toggle() {
                        error!(error = ?e, "Failed to toggle recording");
                    }
                }
                AppCommand::OpenSettings => open_settings(),
                AppCommand::Exit => {
                    info!("Exit requested");
                    break;
                }
            }
        }

        drop(self.command_rx);

        // Detach the hook before the reset so no press can start a session,
        // and reset before signalling so the final cancel is drained.
        self.listener.stop();
        self.controller.shutdown();
        let _ = shutdown_tx.send(true);

        join_task("Pipeline worker", worker_handle).await;
        join_task("Watchdog", watchdog_handle).await;
        join_task("Tray event forwarder", menu_handle).await;

        if let Some(overlay) = self.overlay.take() {
            let joined = tokio::task::spawn_blocking(move || overlay.join());
            join_task("Overlay", joined).await;
        }

        if self.ui_proxy.send_event(UiEvent::Shutdown).is_err() {
            warn!("Event loop already closed");
        }

        info!("Earworm shut down successfully");

        Ok(())
    }
}

/// Map a tray menu click to an application command.
pub(crate) fn menu_command(ids: &TrayMenuIds, event: &MenuEvent) -> Option<AppCommand> {
    if event.id == ids.toggle {
        Some(AppCommand::ToggleRecording)
    } else if event.id == ids.settings {
        Some(AppCommand::OpenSettings)
    } else if event.id == ids.exit {
        Some(AppCommand::Exit)
    } else {
        None
    }
}

fn open_settings() {
    match Config::config_path() {
        Ok(path) => match open::that(&path) {
            Ok(()) => info!(config_path = ?path, "Opened settings"),
            Err(e) => error!(config_path = ?path, error = ?e, "Failed to open settings"),
        },
        Err(e) => error!(error = ?e, "Failed to locate settings"),
    }
}

async fn join_task(name: &str, handle: JoinHandle<()>) {
    match tokio::time::timeout(TASK_JOIN_TIMEOUT, handle).await {
        Ok(Ok(())) => info!(task = name, "Stopped cleanly"),
        Ok(Err(e)) => error!(task = name, error = ?e, "Task panicked"),
        Err(_) => info!(
            task = name,
            "Did not stop within timeout, will be cleaned up on exit"
        ),
    }
}
