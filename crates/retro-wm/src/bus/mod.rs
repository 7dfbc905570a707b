//! Event bus module
//!
//! Decouples registry state transitions from every interested listener.

#[allow(clippy::module_inception)]
mod bus;
mod event;
mod subscription;

pub use bus::EventBus;
pub use event::{Topic, WindowEvent};
pub use subscription::Subscription;
