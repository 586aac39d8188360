//! Earworm: push-to-talk recording coordinator with tray and overlay status.

mod app;
mod app_command;
mod config;
mod error;
mod hook_pipeline;
mod icon;
mod keyboard;
mod logging;
mod overlay;
#[cfg(test)]
mod tests;
mod tray_manager;
mod tray_subscriber;
mod ui_event;
mod watchdog;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    hook_pipeline::HookPipeline,
    keyboard::KeyboardListener,
    tray_manager::TrayManager,
    tray_subscriber::TraySubscriber,
    ui_event::UiEvent,
    watchdog::Watchdog,
};

use crate::{
    config::Config,
    overlay::{OverlayWindow, spawn_overlay},
};

use std::{sync::Arc, time::Instant};

use earworm_core::{DriverStatus, PushToTalkController, SurfaceDriver, surface_channel};
use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Application entry point.
fn main() {
    let log_dir = Config::log_dir().ok();
    let mut log_guard = logging::init(log_dir.as_deref());

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<UiEvent>::with_user_event().build();
    let ui_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let trigger = config.hotkeys.trigger.to_string();
    let mut tray = match TrayManager::new(&trigger, config.behavior.notifications) {
        Ok(tm) => SurfaceDriver::new(tm),
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let mut command_rx = Some(command_rx);
    let mut overlay_window: Option<OverlayWindow> = None;

    event_loop.run(move |event, target, control_flow| {
        if matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
            return;
        }

        let now = Instant::now();

        match event {
            Event::NewEvents(StartCause::Init) => {
                let Some(command_rx) = command_rx.take() else {
                    return;
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let startup = Startup {
                    config: config.clone(),
                    ui_proxy: ui_proxy.clone(),
                    command_tx: command_tx.clone(),
                    command_rx,
                };

                match startup.launch(target, tray.surface()) {
                    Ok(window) => overlay_window = window,
                    Err(e) => {
                        error!("Failed to start: {:?}", e);
                        std::process::exit(1);
                    }
                }
            }
            Event::UserEvent(UiEvent::Tray(message)) => {
                if tray.handle(message, now) == DriverStatus::Closed {
                    debug!("Tray surface closed");
                }
            }
            Event::UserEvent(UiEvent::OverlayFrame(frame)) => {
                if let Some(window) = &overlay_window {
                    if let Err(e) = window.present(frame) {
                        warn!(error = ?e, "Failed to present overlay frame");
                    }
                }
            }
            Event::UserEvent(UiEvent::OverlayClosed) => {
                if let Some(window) = &overlay_window {
                    window.hide();
                }
            }
            Event::UserEvent(UiEvent::Shutdown) => {
                info!("Event loop exiting");
                tray.close();
                // Flush the file writer; the loop exits the process directly.
                drop(log_guard.take());
                *control_flow = ControlFlow::ExitWithCode(0);
                return;
            }
            Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested,
                ..
            } if overlay_window.as_ref().is_some_and(|w| w.id() == window_id) => {
                info!("Overlay closed by user");
                let _ = command_tx.send(AppCommand::Exit);
            }
            _ => {}
        }

        tray.tick(now);
        *control_flow = match tray.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    });
}

/// Everything the main thread hands over when the event loop starts.
struct Startup {
    config: Config,
    ui_proxy: EventLoopProxy<UiEvent>,
    command_tx: mpsc::UnboundedSender<AppCommand>,
    command_rx: mpsc::UnboundedReceiver<AppCommand>,
}

impl Startup {
    /// Wire the controller to its surfaces, hook the keyboard and start the
    /// async runtime.
    ///
    /// Returns the overlay window when the overlay is enabled and came up.
    fn launch(
        self,
        target: &EventLoopWindowTarget<UiEvent>,
        tray: &TrayManager,
    ) -> AppResult<Option<OverlayWindow>> {
        let (pipeline_tx, pipeline_rx) = mpsc::unbounded_channel();
        let controller = Arc::new(PushToTalkController::new(pipeline_tx));

        controller.register(Box::new(TraySubscriber::new(self.ui_proxy.clone())));

        let (overlay_window, overlay) = if self.config.overlay.enabled {
            match self.start_overlay(target, &controller) {
                Ok((window, handle)) => (Some(window), Some(handle)),
                Err(e) => {
                    error!(error = ?e, "Overlay unavailable, continuing with tray only");
                    (None, None)
                }
            }
        } else {
            info!("Overlay disabled");
            (None, None)
        };

        let listener = KeyboardListener::new(self.config.hotkeys.build_matcher()?);
        listener.start(Arc::clone(&controller))?;

        let app = App {
            controller,
            listener,
            pipeline: Arc::new(HookPipeline::new(self.config.pipeline.clone())),
            pipeline_rx,
            command_tx: self.command_tx,
            command_rx: self.command_rx,
            ui_proxy: self.ui_proxy,
            config: self.config,
            menu_ids: tray.menu_ids().clone(),
            overlay,
        };

        // Spawn tokio runtime on separate thread.
        // TrayManager and the overlay window stay on the main thread.
        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {:?}", e);
                    std::process::exit(1);
                }
            };

            rt.block_on(async {
                if let Err(e) = app.run().await {
                    error!(error = ?e, "App error");
                }
            });
        });

        Ok(overlay_window)
    }

    fn start_overlay(
        &self,
        target: &EventLoopWindowTarget<UiEvent>,
        controller: &PushToTalkController,
    ) -> AppResult<(OverlayWindow, overlay::OverlayHandle)> {
        let window = OverlayWindow::new(target)?;

        let (subscriber, inbox) = surface_channel("overlay");
        controller.register(Box::new(subscriber));

        let handle = spawn_overlay(
            inbox,
            self.ui_proxy.clone(),
            self.config.hotkeys.trigger.to_string(),
        )?;

        Ok((window, handle))
    }
}
