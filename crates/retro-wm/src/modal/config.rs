//! Modal configuration for mounting

use crate::input::DragOptions;
use crate::math::Size;
use crate::window::{IconHandle, WindowId};

/// Configuration for mounting a modal
#[derive(Clone, Debug)]
pub struct ModalConfig {
    /// Window id (None or empty = generated)
    pub id: Option<WindowId>,
    /// Title shown in the title bar and on the taskbar
    pub title: String,
    /// Title bar and taskbar icon
    pub icon: Option<IconHandle>,
    /// Whether the taskbar shows a button for this window
    pub has_button: bool,
    /// Stay hidden on mount without registering (latent window)
    pub default_closed: bool,
    /// Expose the right, bottom and corner resize handles
    pub resizable: bool,
    /// Initial size
    pub size: Size,
    /// Drag behaviour and starting position
    pub drag: DragOptions,
    /// Menu bar entries, in display order
    pub menus: Vec<String>,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            icon: None,
            has_button: true,
            default_closed: false,
            resizable: false,
            size: Size::new(300.0, 200.0),
            drag: DragOptions::default(),
            menus: Vec::new(),
        }
    }
}

impl ModalConfig {
    /// Config with an explicit id and title
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            ..Default::default()
        }
    }
}
