//! Title bar minimize button

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::{Subscription, Topic, WindowEvent};
use crate::desktop::Desktop;
use crate::window::WindowId;

/// Minimize button shared by the window frames.
///
/// Tracks the last active window from the bus and minimizes that window on
/// click, then clears focus. A target that has since been unregistered is
/// only unfocused.
pub struct MinimizeButton {
    desktop: Desktop,
    target: Rc<RefCell<Option<WindowId>>>,
    _subscription: Subscription,
}

impl MinimizeButton {
    /// Create a button listening on `desktop`
    pub fn new(desktop: &Desktop) -> Self {
        let target = Rc::new(RefCell::new(desktop.registry().active()));
        let weak = Rc::downgrade(&target);
        let subscription = desktop.bus().subscribe(Topic::ActiveWindowChanged, move |event| {
            if let (WindowEvent::ActiveWindowChanged { id }, Some(target)) = (event, weak.upgrade()) {
                *target.borrow_mut() = id.clone();
            }
        });

        Self {
            desktop: desktop.clone(),
            target,
            _subscription: subscription,
        }
    }

    /// Window the next click would minimize
    pub fn target(&self) -> Option<WindowId> {
        self.target.borrow().clone()
    }

    /// Minimize the tracked window and clear focus
    pub fn click(&self) {
        let target = self.target();
        let registry = self.desktop.registry();
        if let Some(id) = target.filter(|id| registry.contains(id)) {
            registry.minimize(&id);
        }
        registry.focus(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::{Modal, ModalConfig};

    #[test]
    fn test_click_minimizes_active_and_clears_focus() {
        let desktop = Desktop::new();
        let button = MinimizeButton::new(&desktop);
        let modal = Modal::mount(&desktop, ModalConfig::new("w1", "Notepad"));

        assert_eq!(button.target(), Some(WindowId::new("w1")));
        button.click();

        assert!(modal.is_minimized());
        assert!(!modal.is_active());
        assert_eq!(desktop.registry().active(), None);
        assert_eq!(button.target(), None);
    }

    #[test]
    fn test_click_after_unmount_leaves_no_flag() {
        let desktop = Desktop::new();
        let button = MinimizeButton::new(&desktop);
        drop(Modal::mount(&desktop, ModalConfig::new("a", "A")));
        assert_eq!(button.target(), Some(WindowId::new("a")));

        button.click();
        assert!(desktop.registry().latent_ids().is_empty());
        assert!(!desktop.registry().is_minimized(&WindowId::new("a")));
        assert_eq!(desktop.registry().active(), None);
    }

    #[test]
    fn test_click_without_active_only_clears_focus() {
        let desktop = Desktop::new();
        let button = MinimizeButton::new(&desktop);
        button.click();
        assert_eq!(desktop.registry().active(), None);
    }
}
