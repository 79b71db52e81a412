//! In-process publish/subscribe for authentication lifecycle events

mod activity;
mod bus;

pub use activity::ActivityLogSubscriber;
pub use bus::{AuthEventBus, AuthEventSubscriber};
