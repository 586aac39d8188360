mod driver;
mod message;
mod subscriber;

pub use {
    driver::{DriverStatus, NOTIFICATION_DURATION, Surface, SurfaceDriver},
    message::SurfaceMessage,
    subscriber::{ChannelSubscriber, InboxRead, Subscriber, SurfaceInbox, surface_channel},
};
