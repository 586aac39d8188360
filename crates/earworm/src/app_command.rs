/// Requests handled by [`App`](crate::App) on the async runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Start or stop a recording from the tray menu.
    ToggleRecording,
    /// Open the config file in the user's editor.
    OpenSettings,
    /// Shut everything down and exit.
    Exit,
}
