//! Desktop: the shared context every window mounts into

use std::cell::Cell;
use std::rc::Rc;

use crate::bus::EventBus;
use crate::config::WmConfig;
use crate::error::Result;
use crate::input::{FrameScheduler, PointerDispatcher};
use crate::math::Vec2;
use crate::modal::{Modal, ModalConfig};
use crate::taskbar::{SystemTray, Taskbar};
use crate::window::{WindowRegistry, ZOrderStack};

/// Handle to one window manager instance.
///
/// Bundles the bus, registry, z-order stack, pointer stream and frame
/// scheduler. Cloning is cheap and every clone shares the same state, so a
/// desktop can be handed to each window and to the taskbar.
#[derive(Clone)]
pub struct Desktop {
    config: Rc<WmConfig>,
    bus: EventBus,
    registry: Rc<WindowRegistry>,
    zorder: Rc<ZOrderStack>,
    pointer: PointerDispatcher,
    frames: FrameScheduler,
    /// Windows placed without an explicit position so far
    cascade: Rc<Cell<u32>>,
}

impl Desktop {
    /// Create a desktop with the default configuration
    pub fn new() -> Self {
        Self::with_config(WmConfig::default())
    }

    /// Create a desktop with `config`, without validating it
    pub fn with_config(config: WmConfig) -> Self {
        let bus = EventBus::new();
        let registry = Rc::new(WindowRegistry::new(bus.clone()));
        let zorder = Rc::new(ZOrderStack::new(config.z_baseline));

        Self {
            config: Rc::new(config),
            bus,
            registry,
            zorder,
            pointer: PointerDispatcher::new(),
            frames: FrameScheduler::new(),
            cascade: Rc::new(Cell::new(0)),
        }
    }

    /// Create a desktop after validating `config`
    pub fn try_with_config(config: WmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Create a desktop from a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::with_config(WmConfig::from_json(json)?))
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Active configuration
    #[inline]
    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    /// Event bus the registry publishes on
    #[inline]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Window registry
    #[inline]
    pub fn registry(&self) -> &Rc<WindowRegistry> {
        &self.registry
    }

    /// Z-order stack
    #[inline]
    pub fn zorder(&self) -> &Rc<ZOrderStack> {
        &self.zorder
    }

    /// Host pointer stream
    #[inline]
    pub fn pointer(&self) -> &PointerDispatcher {
        &self.pointer
    }

    /// Next-frame write queue
    #[inline]
    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    /// Default position for the next window placed without one.
    ///
    /// Each call steps diagonally by the cascade offset.
    pub fn next_cascade_position(&self) -> Vec2 {
        let n = self.cascade.get();
        self.cascade.set(n.wrapping_add(1));
        let step = self.config.cascade_offset * n as f32;
        Vec2::new(step, step)
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Mount a window
    pub fn mount(&self, config: ModalConfig) -> Modal {
        Modal::mount(self, config)
    }

    /// Attach a taskbar
    pub fn taskbar(&self, tray: SystemTray) -> Taskbar {
        Taskbar::new(&self.registry, tray)
    }

    // =========================================================================
    // Host input
    // =========================================================================

    /// Forward a host pointer-move
    pub fn pointer_move(&self, pos: Vec2) {
        self.pointer.pointer_move(pos);
    }

    /// Forward a host pointer-up
    pub fn pointer_up(&self, pos: Vec2) {
        self.pointer.pointer_up(pos);
    }

    /// Run writes queued for this frame; returns how many ran
    pub fn run_frame(&self) -> usize {
        self.frames.run_frame()
    }
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let desktop = Desktop::new();
        let other = desktop.clone();
        let _modal = other.mount(ModalConfig::new("w1", "Notepad"));

        assert!(desktop.registry().contains(&"w1".into()));
        assert_eq!(desktop.registry().active(), Some("w1".into()));
    }

    #[test]
    fn test_cascade_positions() {
        let desktop = Desktop::new();
        assert_eq!(desktop.next_cascade_position(), Vec2::new(0.0, 0.0));
        assert_eq!(desktop.next_cascade_position(), Vec2::new(30.0, 30.0));
        assert_eq!(desktop.next_cascade_position(), Vec2::new(60.0, 60.0));
    }

    #[test]
    fn test_config_baseline_applies() {
        let desktop = Desktop::from_json(r#"{"zBaseline":50}"#).unwrap();
        let modal = desktop.mount(ModalConfig::new("w1", "Notepad"));
        assert_eq!(desktop.zorder().baseline(), 50);
        assert!(modal.z_index() > 50);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WmConfig { min_width: 0.0, ..Default::default() };
        assert!(Desktop::try_with_config(config).is_err());
        assert!(Desktop::from_json("{not json").is_err());
    }

    #[test]
    fn test_mount_unmount_leaves_nothing() {
        let desktop = Desktop::new();
        let taskbar = desktop.taskbar(SystemTray::default());
        let modal = desktop.mount(ModalConfig::new("w1", "Notepad"));
        assert_eq!(taskbar.buttons().len(), 1);

        drop(modal);
        assert!(desktop.registry().is_empty());
        assert!(desktop.zorder().is_empty());
        assert!(taskbar.buttons().is_empty());
    }
}
