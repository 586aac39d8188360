use error_location::ErrorLocation;
use thiserror::Error;

/// Push-to-talk core errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A key combo was built from an empty key list.
    #[error("Key combo must contain at least one key {location}")]
    EmptyCombo {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A key name could not be parsed.
    #[error("Unknown key name: {name:?} {location}")]
    UnknownKey {
        /// The name that failed to parse.
        name: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A pipeline command could not be dispatched to the worker.
    #[error("Channel send failed: {message} {location}")]
    ChannelSendFailed {
        /// Human-readable error message.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A presentation surface stopped draining its queue.
    #[error("Subscriber {name} closed {location}")]
    SubscriberClosed {
        /// Name of the subscriber.
        name: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A presentation surface failed to render.
    #[error("Surface failed: {reason} {location}")]
    SurfaceFailed {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An external pipeline callback reported failure.
    #[error("Pipeline failed: {reason} {location}")]
    PipelineFailed {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
