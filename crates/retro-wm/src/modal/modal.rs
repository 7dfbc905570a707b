//! Modal window instance

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;

use crate::bus::{Subscription, Topic};
use crate::desktop::Desktop;
use crate::input::{DragController, GestureSlot, ResizeController};
use crate::math::Vec2;
use crate::window::{hit_test, Geometry, WindowId, WindowRecord, WindowRegion};
use super::ModalConfig;

/// Lifecycle phase of a mounted modal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalPhase {
    /// Mounted closed: hidden and unknown to the taskbar
    Latent,
    /// Registered with the registry
    Registered,
    /// Mounted open while another window holds the id; the registry entry
    /// belongs to that window
    Shadowed,
}

/// Locally rendered state, updated from bus events
#[derive(Clone, Debug, Default)]
struct ModalView {
    active: bool,
    minimized: bool,
    opened_menu: Option<String>,
}

/// Serializable view of a modal for host bridges
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalSnapshot {
    pub id: WindowId,
    pub title: String,
    pub phase: ModalPhase,
    pub active: bool,
    pub minimized: bool,
    pub z_index: u64,
    pub geometry: Geometry,
    pub opened_menu: Option<String>,
}

/// A mounted window.
///
/// Owns its geometry and gesture controllers and mirrors registry events for
/// its own id. Dropping the modal unmounts it: any gesture in flight is
/// released, and whatever this modal put in the registry (its record or its
/// latent flag) is removed along with its z-order entry.
pub struct Modal {
    record: WindowRecord,
    desktop: Desktop,
    phase: Cell<ModalPhase>,
    resizable: bool,
    menus: Vec<String>,
    view: Rc<RefCell<ModalView>>,
    geometry: Rc<RefCell<Geometry>>,
    drag: DragController,
    resize: ResizeController,
    _subscriptions: Vec<Subscription>,
}

impl Modal {
    /// Mount a modal on `desktop`.
    ///
    /// An open modal registers, takes focus and moves to the front. A modal
    /// mounted with `default_closed` only marks itself minimized and stays
    /// latent until [`Modal::open`]. If another mounted window already holds
    /// the id, the modal is [`ModalPhase::Shadowed`] and leaves the registry
    /// untouched.
    pub fn mount(desktop: &Desktop, config: ModalConfig) -> Modal {
        let id = config
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(WindowId::generate);
        let record = WindowRecord {
            id: id.clone(),
            title: config.title,
            icon: config.icon,
            has_button: config.has_button,
        };

        let position = config
            .drag
            .default_position
            .unwrap_or_else(|| desktop.next_cascade_position());
        let geometry = Rc::new(RefCell::new(Geometry::new(position, config.size)));
        let view = Rc::new(RefCell::new(ModalView {
            minimized: config.default_closed,
            ..Default::default()
        }));

        let slot = GestureSlot::new();
        let drag = DragController::new(&geometry, desktop.pointer().clone(), slot.clone(), config.drag);
        let resize = ResizeController::new(
            &geometry,
            desktop.pointer().clone(),
            desktop.frames().clone(),
            slot,
            desktop.config().min_size(),
        );

        let subscriptions = subscribe_view(desktop, &id, &view);

        let modal = Modal {
            record,
            desktop: desktop.clone(),
            phase: Cell::new(ModalPhase::Latent),
            resizable: config.resizable,
            menus: config.menus,
            view,
            geometry,
            drag,
            resize,
            _subscriptions: subscriptions,
        };

        if desktop.registry().contains(&id) {
            log::warn!("window {id} is already mounted");
            modal.phase.set(ModalPhase::Shadowed);
        } else if config.default_closed {
            desktop.registry().minimize(&id);
        } else {
            modal.attach();
        }
        modal
    }

    /// Register a latent modal and show it.
    ///
    /// Returns `false` if the modal was already registered or another
    /// mounted window holds its id.
    pub fn open(&self) -> bool {
        if self.phase.get() == ModalPhase::Registered || !self.attach() {
            return false;
        }
        self.desktop.registry().restore(self.id());
        true
    }

    /// Register and take focus; returns whether the record went in
    fn attach(&self) -> bool {
        let registry = self.desktop.registry();
        if !registry.register(self.record.clone()) {
            log::warn!("window {} is already mounted", self.id());
            self.phase.set(ModalPhase::Shadowed);
            return false;
        }
        self.phase.set(ModalPhase::Registered);

        // A flag left behind for a removed window must not hide an open mount
        if !self.view.borrow().minimized && registry.is_minimized(self.id()) {
            registry.restore(self.id());
        }
        self.focus();
        true
    }

    // =========================================================================
    // Registry shortcuts
    // =========================================================================

    /// Take focus and move to the front
    pub fn focus(&self) {
        self.desktop.registry().focus(Some(self.id()));
        self.desktop.zorder().bring_to_front(self.id());
    }

    /// Hide the content, keeping the taskbar button
    pub fn minimize(&self) {
        self.desktop.registry().minimize(self.id());
    }

    /// Show the content again
    pub fn restore(&self) {
        self.desktop.registry().restore(self.id());
    }

    // =========================================================================
    // Pointer routing
    // =========================================================================

    /// Handle a pointer-down on `region`.
    ///
    /// Any press on the frame focuses the window. The title bar starts a
    /// drag. Resize handles start a resize and stop the press from reaching
    /// the frame, so they neither focus nor drag. Returns whether a gesture
    /// started.
    pub fn pointer_down(&self, region: WindowRegion, at: Vec2) -> bool {
        if self.is_hidden() {
            return false;
        }

        if let Some(direction) = region.resize_direction() {
            return self.resizable && self.resize.begin(direction, at);
        }

        self.focus();
        match region {
            WindowRegion::TitleBar => self.drag.begin(at),
            _ => false,
        }
    }

    /// Hit test `at` against the frame and route the press.
    ///
    /// Returns `false` if the point is outside the window.
    pub fn pointer_down_at(&self, at: Vec2) -> bool {
        match self.region_at(at) {
            Some(region) => self.pointer_down(region, at),
            None => false,
        }
    }

    /// Region of the frame under `at`
    pub fn region_at(&self, at: Vec2) -> Option<WindowRegion> {
        if self.is_hidden() {
            return None;
        }
        let geometry = *self.geometry.borrow();
        hit_test(&geometry, at, self.resizable, !self.menus.is_empty())
    }

    /// Check if a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Check if a resize is in progress
    pub fn is_resizing(&self) -> bool {
        self.resize.is_resizing()
    }

    // =========================================================================
    // Menu bar
    // =========================================================================

    /// Open a menu by name; unknown names are ignored
    pub fn open_menu(&self, name: &str) -> bool {
        if !self.menus.iter().any(|m| m == name) {
            return false;
        }
        self.view.borrow_mut().opened_menu = Some(name.to_string());
        true
    }

    /// Close the open menu (click outside)
    pub fn close_menus(&self) {
        self.view.borrow_mut().opened_menu = None;
    }

    /// Name of the open menu
    pub fn opened_menu(&self) -> Option<String> {
        self.view.borrow().opened_menu.clone()
    }

    /// Menu bar entries
    pub fn menus(&self) -> &[String] {
        &self.menus
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Window id
    #[inline]
    pub fn id(&self) -> &WindowId {
        &self.record.id
    }

    /// Registration payload this modal was mounted with
    #[inline]
    pub fn record(&self) -> &WindowRecord {
        &self.record
    }

    /// Lifecycle phase
    #[inline]
    pub fn phase(&self) -> ModalPhase {
        self.phase.get()
    }

    /// Check if this window holds focus
    pub fn is_active(&self) -> bool {
        self.view.borrow().active
    }

    /// Check if the window considers itself minimized
    pub fn is_minimized(&self) -> bool {
        self.view.borrow().minimized
    }

    /// Check if the content is hidden.
    ///
    /// A minimized window is hidden even while it holds focus.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.is_minimized()
    }

    /// Stacking key; the baseline until first raised
    pub fn z_index(&self) -> u64 {
        self.desktop.zorder().key_of(self.id())
    }

    /// Current on-screen box
    pub fn geometry(&self) -> Geometry {
        *self.geometry.borrow()
    }

    /// Snapshot for host bridges
    pub fn snapshot(&self) -> ModalSnapshot {
        let view = self.view.borrow();
        ModalSnapshot {
            id: self.record.id.clone(),
            title: self.record.title.clone(),
            phase: self.phase.get(),
            active: view.active,
            minimized: view.minimized,
            z_index: self.z_index(),
            geometry: *self.geometry.borrow(),
            opened_menu: view.opened_menu.clone(),
        }
    }
}

impl Drop for Modal {
    fn drop(&mut self) {
        self.drag.cancel();
        self.resize.cancel();

        let registry = self.desktop.registry();
        let id = &self.record.id;
        let owned = match self.phase.get() {
            ModalPhase::Registered => true,
            // Only the latent flag is ours, unless the id was registered since
            ModalPhase::Latent => !registry.contains(id),
            ModalPhase::Shadowed => false,
        };
        if owned {
            registry.unregister(id);
            self.desktop.zorder().remove(id);
        }
    }
}

/// Mirror registry events for `id` into the local view
fn subscribe_view(desktop: &Desktop, id: &WindowId, view: &Rc<RefCell<ModalView>>) -> Vec<Subscription> {
    let bus = desktop.bus();
    let mut subscriptions = Vec::with_capacity(3);

    let own = id.clone();
    let weak = Rc::downgrade(view);
    let zorder = desktop.zorder().clone();
    subscriptions.push(bus.subscribe(Topic::ActiveWindowChanged, move |event| {
        let Some(view) = weak.upgrade() else {
            return;
        };
        let is_self = event.is_for(&own);
        view.borrow_mut().active = is_self;
        if is_self {
            zorder.bring_to_front(&own);
        }
    }));

    let own = id.clone();
    let weak = Rc::downgrade(view);
    subscriptions.push(bus.subscribe(Topic::WindowMinimized, move |event| {
        if let (true, Some(view)) = (event.is_for(&own), weak.upgrade()) {
            view.borrow_mut().minimized = true;
        }
    }));

    let own = id.clone();
    let weak = Rc::downgrade(view);
    subscriptions.push(bus.subscribe(Topic::WindowRestored, move |event| {
        if let (true, Some(view)) = (event.is_for(&own), weak.upgrade()) {
            view.borrow_mut().minimized = false;
        }
    }));

    subscriptions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use crate::input::DragOptions;

    fn config(id: &str) -> ModalConfig {
        ModalConfig {
            drag: DragOptions {
                default_position: Some(Vec2::new(100.0, 100.0)),
                ..Default::default()
            },
            size: Size::new(300.0, 200.0),
            ..ModalConfig::new(id, id)
        }
    }

    #[test]
    fn test_mount_registers_focuses_and_raises() {
        let desktop = Desktop::new();
        let modal = Modal::mount(&desktop, config("w1"));

        assert_eq!(modal.phase(), ModalPhase::Registered);
        assert!(desktop.registry().contains(modal.id()));
        assert!(modal.is_active());
        assert!(!modal.is_hidden());
        assert!(modal.z_index() > desktop.zorder().baseline());
    }

    #[test]
    fn test_generated_id_when_missing_or_empty() {
        let desktop = Desktop::new();
        let a = Modal::mount(&desktop, ModalConfig::default());
        let b = Modal::mount(&desktop, ModalConfig { id: Some(WindowId::new("")), ..Default::default() });

        assert!(!a.id().is_empty());
        assert!(!b.id().is_empty());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_default_closed_is_latent() {
        let desktop = Desktop::new();
        let modal = Modal::mount(&desktop, ModalConfig { default_closed: true, ..config("hidden") });

        assert_eq!(modal.phase(), ModalPhase::Latent);
        assert!(modal.is_hidden());
        assert!(!desktop.registry().contains(modal.id()));
        assert_eq!(desktop.registry().latent_ids(), vec![modal.id().clone()]);
        assert_eq!(modal.z_index(), desktop.zorder().baseline());
    }

    #[test]
    fn test_open_latent_registers_and_shows() {
        let desktop = Desktop::new();
        let modal = Modal::mount(&desktop, ModalConfig { default_closed: true, ..config("hidden") });

        assert!(modal.open());
        assert_eq!(modal.phase(), ModalPhase::Registered);
        assert!(!modal.is_hidden());
        assert!(modal.is_active());
        assert!(!modal.open());
    }

    #[test]
    fn test_focus_moves_between_modals() {
        let desktop = Desktop::new();
        let a = Modal::mount(&desktop, config("a"));
        let b = Modal::mount(&desktop, config("b"));

        assert!(!a.is_active());
        assert!(b.is_active());
        assert!(b.z_index() > a.z_index());

        a.pointer_down(WindowRegion::Content, Vec2::new(200.0, 200.0));
        assert!(a.is_active());
        assert!(!b.is_active());
        assert!(a.z_index() > b.z_index());
    }

    #[test]
    fn test_minimized_stays_hidden_while_focused() {
        let desktop = Desktop::new();
        let modal = Modal::mount(&desktop, config("w1"));
        modal.minimize();
        desktop.registry().focus(Some(modal.id()));

        assert!(modal.is_active());
        assert!(modal.is_hidden());
        assert!(!modal.pointer_down(WindowRegion::TitleBar, Vec2::new(150.0, 105.0)));
    }

    #[test]
    fn test_title_bar_press_drags() {
        let desktop = Desktop::new();
        let modal = Modal::mount(&desktop, config("w1"));

        assert!(modal.pointer_down_at(Vec2::new(150.0, 105.0)));
        desktop.pointer().pointer_move(Vec2::new(160.0, 125.0));
        desktop.pointer().pointer_up(Vec2::new(160.0, 125.0));

        let pos = modal.geometry().position;
        assert!((pos.x - 110.0).abs() < 0.001);
        assert!((pos.y - 120.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_handle_blocks_drag_and_focus() {
        let desktop = Desktop::new();
        let a = Modal::mount(&desktop, ModalConfig { resizable: true, ..config("a") });
        let _b = Modal::mount(&desktop, config("b"));

        assert!(a.pointer_down(WindowRegion::ResizeBottomRight, Vec2::new(398.0, 298.0)));
        assert!(a.is_resizing());
        assert!(!a.is_active());
        assert!(!a.pointer_down(WindowRegion::TitleBar, Vec2::new(150.0, 105.0)));
        assert!(!a.is_dragging());

        desktop.pointer().pointer_up(Vec2::new(448.0, 318.0));
        let size = a.geometry().size;
        assert!((size.width - 350.0).abs() < 0.001);
        assert!((size.height - 220.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_ignored_when_not_resizable() {
        let desktop = Desktop::new();
        let modal = Modal::mount(&desktop, config("w1"));
        assert!(!modal.pointer_down(WindowRegion::ResizeRight, Vec2::new(398.0, 200.0)));
        assert!(!desktop.pointer().is_captured());
    }

    #[test]
    fn test_menus_open_and_close() {
        let desktop = Desktop::new();
        let modal = Modal::mount(
            &desktop,
            ModalConfig { menus: vec!["File".into(), "Edit".into()], ..config("w1") },
        );

        assert!(modal.open_menu("Edit"));
        assert_eq!(modal.opened_menu().as_deref(), Some("Edit"));
        assert!(!modal.open_menu("View"));
        assert_eq!(modal.region_at(Vec2::new(200.0, 125.0)), Some(WindowRegion::MenuBar));

        modal.close_menus();
        assert_eq!(modal.opened_menu(), None);
    }

    #[test]
    fn test_unmount_cleans_up() {
        let desktop = Desktop::new();
        let modal = Modal::mount(&desktop, ModalConfig { resizable: true, ..config("w1") });
        let id = modal.id().clone();
        modal.pointer_down(WindowRegion::ResizeRight, Vec2::new(398.0, 200.0));
        desktop.pointer().pointer_move(Vec2::new(450.0, 200.0));

        drop(modal);

        assert!(!desktop.registry().contains(&id));
        assert!(!desktop.zorder().contains(&id));
        assert!(!desktop.pointer().is_captured());
        assert_eq!(desktop.frames().pending_count(), 0);
        assert_eq!(desktop.bus().subscriber_count(Topic::ActiveWindowChanged), 0);
    }

    #[test]
    fn test_duplicate_mount_is_shadowed() {
        let desktop = Desktop::new();
        let taskbar = desktop.taskbar(crate::taskbar::SystemTray::default());
        let first = Modal::mount(&desktop, config("w1"));
        let second = Modal::mount(&desktop, config("w1"));

        assert_eq!(first.phase(), ModalPhase::Registered);
        assert_eq!(second.phase(), ModalPhase::Shadowed);
        assert!(!second.is_hidden());
        assert!(!second.open());
        assert_eq!(desktop.registry().len(), 1);

        drop(second);
        assert!(desktop.registry().contains(first.id()));
        assert!(desktop.zorder().contains(first.id()));
        assert_eq!(taskbar.buttons().len(), 1);
        assert_eq!(first.phase(), ModalPhase::Registered);
    }

    #[test]
    fn test_latent_duplicate_keeps_registered_record() {
        let desktop = Desktop::new();
        let open = Modal::mount(&desktop, config("w1"));
        let latent = Modal::mount(&desktop, ModalConfig { default_closed: true, ..config("w1") });

        assert_eq!(latent.phase(), ModalPhase::Shadowed);
        assert!(!open.is_hidden());
        assert!(desktop.registry().latent_ids().is_empty());

        drop(latent);
        assert!(desktop.registry().contains(open.id()));
    }

    #[test]
    fn test_remount_clears_stale_minimized_flag() {
        let desktop = Desktop::new();
        drop(Modal::mount(&desktop, config("a")));
        desktop.registry().minimize(&WindowId::new("a"));

        let modal = Modal::mount(&desktop, config("a"));
        assert!(!modal.is_hidden());
        assert_eq!(desktop.registry().visibility(modal.id()), Some(crate::window::Visibility::Visible));
        assert!(desktop.registry().latent_ids().is_empty());
        assert!(modal.is_active());
    }

    #[test]
    fn test_snapshot_json() {
        let desktop = Desktop::new();
        let modal = Modal::mount(&desktop, config("w1"));
        let json = serde_json::to_value(modal.snapshot()).unwrap();

        assert_eq!(json["id"], "w1");
        assert_eq!(json["phase"], "registered");
        assert_eq!(json["active"], true);
        assert_eq!(json["minimized"], false);
    }
}
