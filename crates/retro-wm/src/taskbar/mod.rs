//! Taskbar consumer of the registry

mod clock;
#[allow(clippy::module_inception)]
mod taskbar;

pub use clock::{format_clock, SystemTray};
pub use taskbar::{Taskbar, TaskbarButton};
