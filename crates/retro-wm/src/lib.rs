//! Modal Window Manager Core
//!
//! This crate lets independently mounted windows behave like one desktop:
//! - One focus owner and one taskbar
//! - A single stacking order
//! - Consistent minimize/restore semantics
//! - Pointer-driven drag and resize with a size floor
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`)
//! - [`bus`]: Topic-keyed event bus and subscription guards
//! - [`window`]: Window identity, registry, z-order stack and hit testing
//! - [`input`]: Pointer stream, frame coalescing, drag and resize gestures
//! - [`modal`]: Mounted windows and the minimize button
//! - [`taskbar`]: Taskbar view model, start menu and system tray
//!
//! The registry never tells windows what to do. It records each change and
//! publishes one event; every window and the taskbar react to events on
//! their own.
//!
//! ## Example
//!
//! ```rust
//! use retro_wm::{Desktop, ModalConfig, SystemTray, Vec2, WindowRegion};
//!
//! let desktop = Desktop::new();
//! let taskbar = desktop.taskbar(SystemTray::default());
//!
//! let notepad = desktop.mount(ModalConfig::new("w1", "Notepad"));
//! assert!(notepad.is_active());
//! assert_eq!(taskbar.buttons().len(), 1);
//!
//! let title = notepad.geometry().position + Vec2::new(20.0, 5.0);
//! notepad.pointer_down(WindowRegion::TitleBar, title);
//! desktop.pointer_move(title + Vec2::new(40.0, 10.0));
//! desktop.pointer_up(title + Vec2::new(40.0, 10.0));
//! ```
//!
//! ## Threading
//!
//! Everything runs on one thread. Shared state lives behind `Rc` and
//! `RefCell`, and no borrow is held while event handlers run, so handlers
//! may call back into the registry.

pub mod math;
pub mod bus;
pub mod window;
pub mod input;
pub mod modal;
pub mod taskbar;

mod config;
mod desktop;
mod error;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use math::{Size, Vec2};
pub use bus::{EventBus, Subscription, Topic, WindowEvent};
pub use window::{
    hit_test, FrameStyle, Geometry, IconHandle, Visibility, WindowId, WindowRecord, WindowRegion,
    WindowRegistry, ZOrderStack, FRAME_STYLE,
};
pub use input::{
    calculate_resize, DragController, DragOptions, FrameRequest, FrameScheduler, GestureKind,
    GestureSlot, PointerCapture, PointerDispatcher, PointerEvent, ResizeController, ResizeDirection,
};
pub use modal::{MinimizeButton, Modal, ModalConfig, ModalPhase, ModalSnapshot};
pub use taskbar::{format_clock, SystemTray, Taskbar, TaskbarButton};

pub use config::{
    WmConfig, DEFAULT_CASCADE_OFFSET, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, DEFAULT_Z_BASELINE,
};
pub use desktop::Desktop;
pub use error::{Result, WmError};
