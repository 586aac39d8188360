use serde::{Deserialize, Serialize};

/// External commands run at each session boundary.
///
/// Each hook is an argv array; an empty array disables it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Run when a recording starts.
    #[serde(default)]
    pub start: Vec<String>,

    /// Run when a recording stops. Its exit status decides success.
    #[serde(default)]
    pub stop: Vec<String>,

    /// Run when a recording is aborted.
    #[serde(default)]
    pub cancel: Vec<String>,
}
