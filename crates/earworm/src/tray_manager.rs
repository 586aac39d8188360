//! System tray icon with state-based updates.
//!
//! Shows one glyph and tooltip per recording state, a status line and a
//! context menu for Toggle Recording, Settings and Exit.

use crate::{AppError, AppResult, icon};

use std::{panic::Location, thread};

use earworm_core::{CoreError, CoreResult, RecordingState, Surface};
use error_location::ErrorLocation;
use notify_rust::Notification;
use tracing::{debug, error, info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};

const APP_NAME: &str = "Earworm";

/// Menu item ids, handed to the async side for menu event routing.
#[derive(Debug, Clone)]
pub(crate) struct TrayMenuIds {
    pub(crate) toggle: MenuId,
    pub(crate) settings: MenuId,
    pub(crate) exit: MenuId,
}

/// System tray icon manager.
pub(crate) struct TrayManager {
    tray_icon: TrayIcon,
    status_item: MenuItem,
    menu_ids: TrayMenuIds,
    notifications: bool,
}

impl TrayManager {
    /// Create the tray icon in the `Idle` state.
    ///
    /// `trigger` names the push-to-talk combo in the menu hint.
    #[track_caller]
    #[instrument]
    pub(crate) fn new(trigger: &str, notifications: bool) -> AppResult<Self> {
        let menu = Menu::new();

        let hint_item = MenuItem::new(format!("Hold {} to record", trigger), false, None);
        let status_item = MenuItem::new(status_line(RecordingState::Idle), false, None);
        let toggle_item = MenuItem::new("Toggle Recording", true, None);
        let settings_item = MenuItem::new("Settings...", true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let menu_ids = TrayMenuIds {
            toggle: toggle_item.id().clone(),
            settings: settings_item.id().clone(),
            exit: exit_item.id().clone(),
        };

        menu.append_items(&[
            &hint_item,
            &PredefinedMenuItem::separator(),
            &status_item,
            &PredefinedMenuItem::separator(),
            &toggle_item,
            &settings_item,
            &exit_item,
        ])
        .map_err(|e| AppError::TrayError {
            reason: format!("Failed to build tray menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip(RecordingState::Idle))
            .with_menu(Box::new(menu))
            .with_icon(icon::tray_icon(RecordingState::Idle)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            status_item,
            menu_ids,
            notifications,
        })
    }

    /// Update icon, tooltip and status line for `state`.
    #[track_caller]
    #[instrument(skip(self))]
    pub(crate) fn update_state(&mut self, state: RecordingState) -> AppResult<()> {
        self.tray_icon
            .set_icon(Some(icon::tray_icon(state)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.set_tooltip(tooltip(state))?;
        self.status_item.set_text(status_line(state));

        Ok(())
    }

    /// Show `title` in the tooltip and, if enabled, raise a desktop
    /// notification.
    #[track_caller]
    #[instrument(skip(self))]
    pub(crate) fn show_notification(&mut self, title: &str, message: &str) -> AppResult<()> {
        self.set_tooltip(&format!("{} - {}", APP_NAME, title))?;

        if self.notifications {
            let summary = format!("{} - {}", APP_NAME, title);
            let body = message.to_string();
            // Some notification daemons block; keep the UI thread free.
            thread::spawn(move || {
                Notification::new()
                    .appname(APP_NAME)
                    .summary(&summary)
                    .body(&body)
                    .show()
                    .map_err(|e| error!("Failed to send notification: {}", e))
                    .ok();
            });
        }

        Ok(())
    }

    /// Get the menu item IDs.
    pub(crate) fn menu_ids(&self) -> &TrayMenuIds {
        &self.menu_ids
    }

    #[track_caller]
    fn set_tooltip(&self, text: &str) -> AppResult<()> {
        self.tray_icon
            .set_tooltip(Some(text))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl Surface for TrayManager {
    fn apply_state(&mut self, state: RecordingState) -> CoreResult<()> {
        self.update_state(state).map_err(surface_failed)
    }

    fn notify(&mut self, title: &str, message: &str) -> CoreResult<()> {
        self.show_notification(title, message)
            .map_err(surface_failed)
    }

    fn close(&mut self) {
        debug!("Hiding tray icon");
        if let Err(e) = self.tray_icon.set_visible(false) {
            error!(error = ?e, "Failed to hide tray icon");
        }
    }
}

#[track_caller]
fn surface_failed(error: AppError) -> CoreError {
    CoreError::SurfaceFailed {
        reason: error.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Tooltip text for `state`.
pub(crate) fn tooltip(state: RecordingState) -> &'static str {
    match state {
        RecordingState::Idle => "Earworm - Ready",
        RecordingState::Recording => "Earworm - Recording...",
        RecordingState::Processing => "Earworm - Transcribing...",
    }
}

/// Disabled menu line describing `state`.
pub(crate) fn status_line(state: RecordingState) -> &'static str {
    match state {
        RecordingState::Idle => "Status: Ready",
        RecordingState::Recording => "Status: Recording...",
        RecordingState::Processing => "Status: Processing...",
    }
}
