//! WASM exports for the window manager
//!
//! This module provides wasm-bindgen exports around a [`Desktop`], so a
//! JavaScript host can mount windows, forward pointer input and listen to
//! registry events.

use std::collections::HashMap;

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::bus::{Subscription, Topic};
use crate::desktop::Desktop;
use crate::input::DragOptions;
use crate::math::{Size, Vec2};
use crate::modal::{MinimizeButton, Modal, ModalConfig};
use crate::taskbar::{SystemTray, Taskbar};
use crate::window::{IconHandle, WindowId, WindowRegion};

// =========================================================================
// Console logging
// =========================================================================

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route `log` output to the browser console.
///
/// `level` is one of `error`, `warn`, `info`, `debug`, `trace`; anything else
/// means `info`. Calling this more than once only updates the level.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let filter = match level {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
}

// =========================================================================
// Mount requests
// =========================================================================

/// Window options as sent by the host
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct MountRequest {
    id: Option<String>,
    title: String,
    icon: Option<String>,
    has_button: bool,
    default_closed: bool,
    resizable: bool,
    width: f32,
    height: f32,
    x: Option<f32>,
    y: Option<f32>,
    drag_disabled: bool,
    menus: Vec<String>,
}

impl Default for MountRequest {
    fn default() -> Self {
        let defaults = ModalConfig::default();
        Self {
            id: None,
            title: defaults.title,
            icon: None,
            has_button: defaults.has_button,
            default_closed: defaults.default_closed,
            resizable: defaults.resizable,
            width: defaults.size.width,
            height: defaults.size.height,
            x: None,
            y: None,
            drag_disabled: false,
            menus: Vec::new(),
        }
    }
}

impl From<MountRequest> for ModalConfig {
    fn from(req: MountRequest) -> Self {
        let default_position = match (req.x, req.y) {
            (Some(x), Some(y)) => Some(Vec2::new(x, y)),
            _ => None,
        };
        ModalConfig {
            id: req.id.map(WindowId::new),
            title: req.title,
            icon: req.icon.map(IconHandle::new),
            has_button: req.has_button,
            default_closed: req.default_closed,
            resizable: req.resizable,
            size: Size::new(req.width, req.height),
            drag: DragOptions {
                default_position,
                disabled: req.drag_disabled,
            },
            menus: req.menus,
        }
    }
}

// =========================================================================
// Controller
// =========================================================================

/// Window manager controller for WASM - wraps a Desktop with a JS-friendly API
#[wasm_bindgen]
pub struct WindowManagerController {
    desktop: Desktop,
    windows: HashMap<WindowId, Modal>,
    taskbar: Taskbar,
    minimize_button: MinimizeButton,
    listeners: HashMap<u32, Subscription>,
    next_listener: u32,
}

#[wasm_bindgen]
impl WindowManagerController {
    /// Create a controller with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_desktop(Desktop::new(), SystemTray::default())
    }

    /// Create a controller from JSON configuration
    #[wasm_bindgen]
    pub fn with_config(config_json: &str, tray_json: &str) -> Result<WindowManagerController, JsValue> {
        let desktop = Desktop::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let tray: SystemTray = if tray_json.is_empty() {
            SystemTray::default()
        } else {
            serde_json::from_str(tray_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(Self::from_desktop(desktop, tray))
    }

    fn from_desktop(desktop: Desktop, tray: SystemTray) -> Self {
        let taskbar = desktop.taskbar(tray);
        let minimize_button = MinimizeButton::new(&desktop);
        Self {
            desktop,
            windows: HashMap::new(),
            taskbar,
            minimize_button,
            listeners: HashMap::new(),
            next_listener: 1,
        }
    }

    // =========================================================================
    // Window lifecycle
    // =========================================================================

    /// Mount a window from JSON options, returning its id
    #[wasm_bindgen]
    pub fn mount(&mut self, options_json: &str) -> Result<String, JsValue> {
        let request: MountRequest =
            serde_json::from_str(options_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        // Remounting an id unmounts the previous window first
        if let Some(id) = request.id.as_deref() {
            self.windows.remove(id);
        }
        let modal = self.desktop.mount(request.into());
        let id = modal.id().clone();
        self.windows.insert(id.clone(), modal);
        Ok(id.as_str().to_string())
    }

    /// Unmount a window
    #[wasm_bindgen]
    pub fn unmount(&mut self, id: &str) -> bool {
        self.windows.remove(id).is_some()
    }

    /// Open a latent window
    #[wasm_bindgen]
    pub fn open(&self, id: &str) -> bool {
        self.windows.get(id).is_some_and(|modal| modal.open())
    }

    /// Minimize a window
    #[wasm_bindgen]
    pub fn minimize(&self, id: &str) {
        self.desktop.registry().minimize(&WindowId::new(id));
    }

    /// Restore a window
    #[wasm_bindgen]
    pub fn restore(&self, id: &str) {
        self.desktop.registry().restore(&WindowId::new(id));
    }

    /// Focus a window; an empty id clears focus
    #[wasm_bindgen]
    pub fn focus(&self, id: &str) {
        match self.windows.get(id) {
            Some(modal) => modal.focus(),
            None if id.is_empty() => self.desktop.registry().focus(None),
            None => self.desktop.registry().focus(Some(&WindowId::new(id))),
        }
    }

    /// Click the title bar minimize button
    #[wasm_bindgen]
    pub fn minimize_button_click(&self) {
        self.minimize_button.click();
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Route a pointer-down on a named region of a window
    #[wasm_bindgen]
    pub fn pointer_down(&self, id: &str, region: &str, x: f32, y: f32) -> bool {
        let (Some(modal), Some(region)) = (self.windows.get(id), WindowRegion::from_name(region)) else {
            return false;
        };
        modal.pointer_down(region, Vec2::new(x, y))
    }

    /// Hit test and route a pointer-down on a window
    #[wasm_bindgen]
    pub fn pointer_down_at(&self, id: &str, x: f32, y: f32) -> bool {
        self.windows
            .get(id)
            .is_some_and(|modal| modal.pointer_down_at(Vec2::new(x, y)))
    }

    /// Forward a pointer-move
    #[wasm_bindgen]
    pub fn pointer_move(&self, x: f32, y: f32) {
        self.desktop.pointer_move(Vec2::new(x, y));
    }

    /// Forward a pointer-up
    #[wasm_bindgen]
    pub fn pointer_up(&self, x: f32, y: f32) {
        self.desktop.pointer_up(Vec2::new(x, y));
    }

    /// Run writes queued for this animation frame
    #[wasm_bindgen]
    pub fn run_frame(&self) -> usize {
        self.desktop.run_frame()
    }

    /// CSS cursor for a point over a window
    #[wasm_bindgen]
    pub fn cursor_at(&self, id: &str, x: f32, y: f32) -> String {
        self.windows
            .get(id)
            .and_then(|modal| modal.region_at(Vec2::new(x, y)))
            .map(|region| region.cursor())
            .unwrap_or("default")
            .to_string()
    }

    // =========================================================================
    // Menus
    // =========================================================================

    /// Open a window menu
    #[wasm_bindgen]
    pub fn open_menu(&self, id: &str, menu: &str) -> bool {
        self.windows.get(id).is_some_and(|modal| modal.open_menu(menu))
    }

    /// Close a window's menus
    #[wasm_bindgen]
    pub fn close_menus(&self, id: &str) {
        if let Some(modal) = self.windows.get(id) {
            modal.close_menus();
        }
    }

    // =========================================================================
    // Taskbar
    // =========================================================================

    /// Click a taskbar button
    #[wasm_bindgen]
    pub fn taskbar_click(&self, id: &str) {
        self.taskbar.click(&WindowId::new(id));
    }

    /// Press the start button
    #[wasm_bindgen]
    pub fn toggle_start(&self) {
        self.taskbar.toggle_start();
    }

    /// Click outside the start menu
    #[wasm_bindgen]
    pub fn click_outside(&self) {
        self.taskbar.click_outside();
    }

    /// Click a start menu item
    #[wasm_bindgen]
    pub fn menu_item_clicked(&self, has_submenu: bool) {
        self.taskbar.menu_item_clicked(has_submenu);
    }

    /// Clock text for the current local time, empty when hidden
    #[wasm_bindgen]
    pub fn clock_label(&self) -> String {
        let now = js_sys::Date::new_0();
        self.taskbar
            .tray()
            .clock_label(now.get_hours(), now.get_minutes())
            .unwrap_or_default()
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Call `callback` with each event on `topic` as JSON.
    ///
    /// Returns a listener handle for [`Self::unsubscribe`], or 0 if the topic
    /// is unknown.
    #[wasm_bindgen]
    pub fn subscribe(&mut self, topic: &str, callback: js_sys::Function) -> u32 {
        let Some(topic) = Topic::from_name(topic) else {
            log::warn!("subscribe to unknown topic {topic}");
            return 0;
        };
        let subscription = self.desktop.bus().subscribe(topic, move |event| {
            let Ok(json) = serde_json::to_string(event) else {
                return;
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::error!("event listener threw: {err:?}");
            }
        });

        let handle = self.next_listener;
        self.next_listener += 1;
        self.listeners.insert(handle, subscription);
        handle
    }

    /// Remove a listener
    #[wasm_bindgen]
    pub fn unsubscribe(&mut self, handle: u32) -> bool {
        self.listeners.remove(&handle).is_some()
    }

    // =========================================================================
    // State queries
    // =========================================================================

    /// Get a window snapshot as JSON
    #[wasm_bindgen]
    pub fn get_window_json(&self, id: &str) -> String {
        self.windows
            .get(id)
            .and_then(|modal| serde_json::to_string(&modal.snapshot()).ok())
            .unwrap_or_else(|| "null".to_string())
    }

    /// Get all mounted windows as JSON, back to front
    #[wasm_bindgen]
    pub fn get_windows_json(&self) -> String {
        let mut snapshots: Vec<_> = self.windows.values().map(Modal::snapshot).collect();
        snapshots.sort_by_key(|s| s.z_index);
        serde_json::to_string(&snapshots).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get taskbar buttons as JSON
    #[wasm_bindgen]
    pub fn get_taskbar_json(&self) -> String {
        serde_json::to_string(&serde_json::json!({
            "buttons": self.taskbar.buttons(),
            "startOpen": self.taskbar.is_start_open(),
            "tray": self.taskbar.tray(),
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the focused window id, empty when nothing is focused
    #[wasm_bindgen]
    pub fn get_active_window(&self) -> String {
        self.desktop
            .registry()
            .active()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }
}

impl Default for WindowManagerController {
    fn default() -> Self {
        Self::new()
    }
}
