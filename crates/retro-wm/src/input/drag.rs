//! Title bar drag gesture

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::math::Vec2;
use crate::window::Geometry;
use super::gesture::{GestureClaim, GestureKind, GestureSlot};
use super::pointer::{PointerCapture, PointerDispatcher, PointerEvent};

/// Drag behaviour of a window
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragOptions {
    /// Starting position; `None` lets the desktop cascade the window
    pub default_position: Option<Vec2>,
    /// Ignore drag handles entirely
    pub disabled: bool,
}

/// State captured at pointer-down, dropped at pointer-up
struct DragGesture {
    /// Pointer position at gesture start
    origin: Vec2,
    /// Window position at gesture start
    start: Vec2,
    _claim: GestureClaim,
    _capture: PointerCapture,
}

/// Moves one window by dragging its handle region.
///
/// Position follows the pointer delta with no viewport clamping, so a
/// window can be dragged partly or fully off-screen.
pub struct DragController {
    geometry: Weak<RefCell<Geometry>>,
    pointer: PointerDispatcher,
    slot: GestureSlot,
    options: DragOptions,
    gesture: Rc<RefCell<Option<DragGesture>>>,
}

impl DragController {
    /// Attach a controller to a window's geometry
    pub fn new(
        geometry: &Rc<RefCell<Geometry>>,
        pointer: PointerDispatcher,
        slot: GestureSlot,
        options: DragOptions,
    ) -> Self {
        Self {
            geometry: Rc::downgrade(geometry),
            pointer,
            slot,
            options,
            gesture: Rc::new(RefCell::new(None)),
        }
    }

    /// Start a drag from a pointer-down on the handle.
    ///
    /// Returns `false` when no gesture started: dragging disabled, a gesture
    /// already active on this window, or the window is gone.
    pub fn begin(&self, at: Vec2) -> bool {
        if self.options.disabled || self.gesture.borrow().is_some() {
            return false;
        }
        let Some(geometry) = self.geometry.upgrade() else {
            return false;
        };
        let Some(claim) = self.slot.try_claim(GestureKind::Drag) else {
            return false;
        };
        let start = geometry.borrow().position;

        let gesture = Rc::downgrade(&self.gesture);
        let target = self.geometry.clone();
        let capture = self.pointer.acquire(move |event| match event {
            PointerEvent::Move(pos) => apply_move(&gesture, &target, pos),
            PointerEvent::Up(pos) => {
                apply_move(&gesture, &target, pos);
                end_gesture(&gesture);
            }
            PointerEvent::Cancel => end_gesture(&gesture),
        });

        log::debug!("drag start at ({}, {})", at.x, at.y);
        *self.gesture.borrow_mut() = Some(DragGesture {
            origin: at,
            start,
            _claim: claim,
            _capture: capture,
        });
        true
    }

    /// Check if a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.gesture.borrow().is_some()
    }

    /// Abort the drag, leaving the window where it is
    pub fn cancel(&self) {
        let ended = self.gesture.borrow_mut().take();
        drop(ended);
    }

    /// Drag options this controller was built with
    #[inline]
    pub fn options(&self) -> DragOptions {
        self.options
    }
}

fn apply_move(gesture: &Weak<RefCell<Option<DragGesture>>>, target: &Weak<RefCell<Geometry>>, pos: Vec2) {
    let Some(gesture) = gesture.upgrade() else {
        return;
    };
    let position = match gesture.borrow().as_ref() {
        Some(g) => g.start + pos.delta_from(g.origin),
        None => return,
    };
    if let Some(geometry) = target.upgrade() {
        geometry.borrow_mut().position = position;
    }
}

fn end_gesture(gesture: &Weak<RefCell<Option<DragGesture>>>) {
    if let Some(gesture) = gesture.upgrade() {
        // Released outside the borrow: dropping detaches the pointer listener
        let ended = gesture.borrow_mut().take();
        if ended.is_some() {
            log::debug!("drag end");
        }
        drop(ended);
    }
}
