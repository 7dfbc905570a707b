//! Modal windows
//!
//! A modal is the window frame: it registers with the registry, mirrors its
//! own focus and visibility from the bus, and routes pointer presses to its
//! drag and resize controllers.

mod config;
mod minimize;
#[allow(clippy::module_inception)]
mod modal;

pub use config::ModalConfig;
pub use minimize::MinimizeButton;
pub use modal::{Modal, ModalPhase, ModalSnapshot};
