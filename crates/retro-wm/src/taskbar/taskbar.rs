//! Taskbar: one button per registered window

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::bus::{EventBus, Subscription, Topic, WindowEvent};
use crate::window::{IconHandle, WindowId, WindowRecord, WindowRegistry};
use super::SystemTray;

/// Rendered taskbar button
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskbarButton {
    pub id: WindowId,
    pub title: String,
    pub icon: Option<IconHandle>,
    pub active: bool,
}

#[derive(Default)]
struct TaskbarState {
    /// Known windows in registration order
    entries: Vec<WindowRecord>,
    /// Highlighted window
    active: Option<WindowId>,
    start_open: bool,
}

/// Taskbar view model.
///
/// Builds its entries purely from bus events and routes button clicks back
/// into the registry. When the active window goes away it focuses the most
/// recently added remaining window.
pub struct Taskbar {
    registry: Rc<WindowRegistry>,
    state: Rc<RefCell<TaskbarState>>,
    tray: SystemTray,
    _subscriptions: Vec<Subscription>,
}

impl Taskbar {
    /// Attach a taskbar to `registry`.
    ///
    /// Windows registered before this call are not listed; the taskbar only
    /// learns about windows from `WindowAdded`.
    pub fn new(registry: &Rc<WindowRegistry>, tray: SystemTray) -> Self {
        let state = Rc::new(RefCell::new(TaskbarState {
            active: registry.active(),
            ..Default::default()
        }));
        let subscriptions = subscribe(registry.bus(), Rc::downgrade(registry), &state);

        Self {
            registry: registry.clone(),
            state,
            tray,
            _subscriptions: subscriptions,
        }
    }

    // =========================================================================
    // Window buttons
    // =========================================================================

    /// Buttons to render, in registration order
    pub fn buttons(&self) -> Vec<TaskbarButton> {
        let state = self.state.borrow();
        state
            .entries
            .iter()
            .filter(|entry| entry.has_button)
            .map(|entry| TaskbarButton {
                id: entry.id.clone(),
                title: entry.title.clone(),
                icon: entry.icon.clone(),
                active: state.active.as_ref() == Some(&entry.id),
            })
            .collect()
    }

    /// Handle a click on a window button.
    ///
    /// Clicking the highlighted window minimizes it and drops the highlight.
    /// Any other window is restored and focused.
    pub fn click(&self, id: &WindowId) {
        let is_active = self.state.borrow().active.as_ref() == Some(id);
        if is_active {
            self.registry.minimize(id);
            self.state.borrow_mut().active = None;
        } else {
            self.registry.restore(id);
            self.registry.focus(Some(id));
        }
    }

    /// Every known entry, including windows without a button
    pub fn entries(&self) -> Vec<WindowRecord> {
        self.state.borrow().entries.clone()
    }

    /// Highlighted window
    pub fn active(&self) -> Option<WindowId> {
        self.state.borrow().active.clone()
    }

    // =========================================================================
    // Start menu
    // =========================================================================

    /// Press the start button
    pub fn toggle_start(&self) {
        let mut state = self.state.borrow_mut();
        state.start_open = !state.start_open;
    }

    /// Close the start menu
    pub fn close_start(&self) {
        self.state.borrow_mut().start_open = false;
    }

    /// Click anywhere outside the start button and menu
    pub fn click_outside(&self) {
        self.close_start();
    }

    /// Click on a start menu item; items opening a submenu keep the menu open
    pub fn menu_item_clicked(&self, has_submenu: bool) {
        if !has_submenu {
            self.close_start();
        }
    }

    /// Check if the start menu is shown
    pub fn is_start_open(&self) -> bool {
        self.state.borrow().start_open
    }

    /// System tray settings
    #[inline]
    pub fn tray(&self) -> SystemTray {
        self.tray
    }
}

fn subscribe(
    bus: &EventBus,
    registry: Weak<WindowRegistry>,
    state: &Rc<RefCell<TaskbarState>>,
) -> Vec<Subscription> {
    let mut subscriptions = Vec::with_capacity(3);

    let weak = Rc::downgrade(state);
    subscriptions.push(bus.subscribe(Topic::WindowAdded, move |event| {
        let (WindowEvent::WindowAdded { record }, Some(state)) = (event, weak.upgrade()) else {
            return;
        };
        if record.id.is_empty() {
            log::warn!("taskbar: window added without an id");
            return;
        }
        let mut state = state.borrow_mut();
        if state.entries.iter().any(|e| e.id == record.id) {
            return;
        }
        state.entries.push(record.clone());
    }));

    let weak = Rc::downgrade(state);
    subscriptions.push(bus.subscribe(Topic::WindowRemoved, move |event| {
        let (WindowEvent::WindowRemoved { id }, Some(state)) = (event, weak.upgrade()) else {
            return;
        };
        let fallback = {
            let mut state = state.borrow_mut();
            state.entries.retain(|e| &e.id != id);
            if state.active.as_ref() == Some(id) {
                let next = state.entries.last().map(|e| e.id.clone());
                if next.is_none() {
                    state.active = None;
                }
                next
            } else {
                None
            }
        };

        if let (Some(next), Some(registry)) = (fallback, registry.upgrade()) {
            log::debug!("taskbar: active window {id} removed, focusing {next}");
            registry.focus(Some(&next));
        }
    }));

    let weak = Rc::downgrade(state);
    subscriptions.push(bus.subscribe(Topic::ActiveWindowChanged, move |event| {
        if let (WindowEvent::ActiveWindowChanged { id }, Some(state)) = (event, weak.upgrade()) {
            state.borrow_mut().active = id.clone();
        }
    }));

    subscriptions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Rc<WindowRegistry>, Taskbar) {
        let registry = Rc::new(WindowRegistry::new(EventBus::new()));
        let taskbar = Taskbar::new(&registry, SystemTray::default());
        (registry, taskbar)
    }

    fn id(s: &str) -> WindowId {
        WindowId::new(s)
    }

    #[test]
    fn test_entries_follow_registry() {
        let (registry, taskbar) = setup();
        registry.register(WindowRecord::new("w1", "Notepad"));
        registry.register(WindowRecord::new("w2", "Paint"));
        registry.register(WindowRecord::new("w1", "Notepad again"));

        let titles: Vec<String> = taskbar.buttons().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["Notepad", "Paint"]);

        registry.unregister(&id("w1"));
        assert_eq!(taskbar.entries().len(), 1);
    }

    #[test]
    fn test_windows_without_button_are_hidden() {
        let (registry, taskbar) = setup();
        registry.register(WindowRecord::new("w1", "Notepad").with_button(false));

        assert_eq!(taskbar.entries().len(), 1);
        assert!(taskbar.buttons().is_empty());
    }

    #[test]
    fn test_minimize_keeps_button() {
        let (registry, taskbar) = setup();
        registry.register(WindowRecord::new("w1", "Notepad"));
        registry.minimize(&id("w1"));
        assert_eq!(taskbar.buttons().len(), 1);
    }

    #[test]
    fn test_click_active_minimizes() {
        let (registry, taskbar) = setup();
        registry.register(WindowRecord::new("w1", "Notepad"));
        registry.focus(Some(&id("w1")));
        assert!(taskbar.buttons()[0].active);

        taskbar.click(&id("w1"));
        assert!(registry.is_minimized(&id("w1")));
        assert_eq!(taskbar.active(), None);
        assert!(!taskbar.buttons()[0].active);
    }

    #[test]
    fn test_click_inactive_restores_and_focuses() {
        let (registry, taskbar) = setup();
        registry.register(WindowRecord::new("w1", "Notepad"));
        registry.minimize(&id("w1"));

        taskbar.click(&id("w1"));
        assert!(!registry.is_minimized(&id("w1")));
        assert_eq!(registry.active(), Some(id("w1")));
        assert_eq!(taskbar.active(), Some(id("w1")));
    }

    #[test]
    fn test_removing_active_focuses_last_added() {
        let (registry, taskbar) = setup();
        registry.register(WindowRecord::new("a", "A"));
        registry.register(WindowRecord::new("b", "B"));
        registry.register(WindowRecord::new("c", "C"));
        registry.focus(Some(&id("b")));

        registry.unregister(&id("b"));
        assert_eq!(registry.active(), Some(id("c")));
        assert_eq!(taskbar.active(), Some(id("c")));
    }

    #[test]
    fn test_removing_inactive_keeps_focus() {
        let (registry, taskbar) = setup();
        registry.register(WindowRecord::new("a", "A"));
        registry.register(WindowRecord::new("b", "B"));
        registry.focus(Some(&id("a")));

        registry.unregister(&id("b"));
        assert_eq!(registry.active(), Some(id("a")));
        assert_eq!(taskbar.active(), Some(id("a")));
    }

    #[test]
    fn test_removing_last_active_leaves_pointer() {
        let (registry, taskbar) = setup();
        registry.register(WindowRecord::new("a", "A"));
        registry.focus(Some(&id("a")));

        registry.unregister(&id("a"));
        assert_eq!(registry.active(), Some(id("a")));
        assert_eq!(taskbar.active(), None);
    }

    #[test]
    fn test_latent_window_has_no_button() {
        let (registry, taskbar) = setup();
        registry.minimize(&id("hidden"));
        assert!(taskbar.entries().is_empty());

        registry.register(WindowRecord::new("hidden", "Hidden"));
        assert_eq!(taskbar.buttons().len(), 1);
    }

    #[test]
    fn test_start_menu() {
        let (_registry, taskbar) = setup();
        assert!(!taskbar.is_start_open());

        taskbar.toggle_start();
        assert!(taskbar.is_start_open());
        taskbar.menu_item_clicked(true);
        assert!(taskbar.is_start_open());
        taskbar.menu_item_clicked(false);
        assert!(!taskbar.is_start_open());

        taskbar.toggle_start();
        taskbar.click_outside();
        assert!(!taskbar.is_start_open());
    }

    #[test]
    fn test_dropped_taskbar_unsubscribes() {
        let (registry, taskbar) = setup();
        drop(taskbar);
        assert_eq!(registry.bus().subscriber_count(Topic::WindowAdded), 0);
        registry.register(WindowRecord::new("w1", "Notepad"));
    }
}
