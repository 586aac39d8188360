use crate::{CoreError, CoreResult, SurfaceMessage};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::mpsc::{self, error::TryRecvError};

/// Sending half of a presentation surface's queue, held by the controller.
///
/// `deliver` must never block: it is called with the controller lock held.
pub trait Subscriber: Send {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Enqueue a message for the surface.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SubscriberClosed`] once the surface has gone away.
    fn deliver(&self, message: SurfaceMessage) -> CoreResult<()>;
}

/// A [`Subscriber`] backed by an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSubscriber {
    name: String,
    tx: mpsc::UnboundedSender<SurfaceMessage>,
}

impl Subscriber for ChannelSubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    #[track_caller]
    fn deliver(&self, message: SurfaceMessage) -> CoreResult<()> {
        self.tx
            .send(message)
            .map_err(|_| CoreError::SubscriberClosed {
                name: self.name.clone(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Receiving half of a surface queue, drained on the surface's own context.
#[derive(Debug)]
pub struct SurfaceInbox {
    rx: mpsc::UnboundedReceiver<SurfaceMessage>,
}

/// Outcome of a non-blocking inbox read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxRead {
    /// A queued message.
    Message(SurfaceMessage),
    /// Nothing queued right now.
    Empty,
    /// The controller dropped the sending half.
    Disconnected,
}

impl SurfaceInbox {
    /// Take the next queued message without waiting.
    pub fn try_next(&mut self) -> InboxRead {
        match self.rx.try_recv() {
            Ok(message) => InboxRead::Message(message),
            Err(TryRecvError::Empty) => InboxRead::Empty,
            Err(TryRecvError::Disconnected) => InboxRead::Disconnected,
        }
    }

    /// Wait for the next message; `None` once the controller side is gone.
    pub async fn recv(&mut self) -> Option<SurfaceMessage> {
        self.rx.recv().await
    }
}

/// Create a connected subscriber/inbox pair for a surface called `name`.
pub fn surface_channel(name: impl Into<String>) -> (ChannelSubscriber, SurfaceInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ChannelSubscriber {
            name: name.into(),
            tx,
        },
        SurfaceInbox { rx },
    )
}
