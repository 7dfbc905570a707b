//! Edge and corner resize gesture

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::math::{Size, Vec2};
use crate::window::Geometry;
use super::frame::{FrameRequest, FrameScheduler};
use super::gesture::{GestureClaim, GestureKind, GestureSlot};
use super::pointer::{PointerCapture, PointerDispatcher, PointerEvent};

/// Resize handles a window exposes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeDirection {
    /// Widen to the right
    Right,
    /// Grow down
    Bottom,
    /// Grow down and to the right
    BottomRight,
}

impl ResizeDirection {
    /// Check if the handle changes the width
    #[inline]
    pub fn affects_width(self) -> bool {
        matches!(self, ResizeDirection::Right | ResizeDirection::BottomRight)
    }

    /// Check if the handle changes the height
    #[inline]
    pub fn affects_height(self) -> bool {
        matches!(self, ResizeDirection::Bottom | ResizeDirection::BottomRight)
    }
}

/// Calculate the size after a resize gesture moved by `delta`.
///
/// Only the axes of `direction` change; each is rounded to whole pixels and
/// never drops below `min_size`.
pub fn calculate_resize(direction: ResizeDirection, start_size: Size, delta: Vec2, min_size: Size) -> Size {
    let candidate = Size::new(start_size.width + delta.x, start_size.height + delta.y)
        .round()
        .at_least(min_size);
    Size::new(
        if direction.affects_width() { candidate.width } else { start_size.width },
        if direction.affects_height() { candidate.height } else { start_size.height },
    )
}

/// State captured at pointer-down, dropped at pointer-up
struct ResizeGesture {
    direction: ResizeDirection,
    /// Pointer position at gesture start
    origin: Vec2,
    /// Window size at gesture start
    start_size: Size,
    /// Write waiting for the next frame, replaced by each move
    frame: Option<FrameRequest>,
    _claim: GestureClaim,
    _capture: PointerCapture,
}

impl ResizeGesture {
    fn size_at(&self, pos: Vec2, min_size: Size) -> Size {
        calculate_resize(self.direction, self.start_size, pos.delta_from(self.origin), min_size)
    }
}

/// Resizes one window from its right, bottom and bottom-right handles.
///
/// Moves are coalesced: at most one size write per window waits for the
/// next frame, and each move replaces it. Pointer-up commits the final size
/// immediately.
pub struct ResizeController {
    geometry: Weak<RefCell<Geometry>>,
    pointer: PointerDispatcher,
    frames: FrameScheduler,
    slot: GestureSlot,
    min_size: Size,
    gesture: Rc<RefCell<Option<ResizeGesture>>>,
}

impl ResizeController {
    /// Attach a controller to a window's geometry
    pub fn new(
        geometry: &Rc<RefCell<Geometry>>,
        pointer: PointerDispatcher,
        frames: FrameScheduler,
        slot: GestureSlot,
        min_size: Size,
    ) -> Self {
        Self {
            geometry: Rc::downgrade(geometry),
            pointer,
            frames,
            slot,
            min_size,
            gesture: Rc::new(RefCell::new(None)),
        }
    }

    /// Start resizing from a pointer-down on a handle.
    ///
    /// Claims the window's gesture slot, so a drag cannot start until the
    /// resize ends. Returns `false` when no gesture started.
    pub fn begin(&self, direction: ResizeDirection, at: Vec2) -> bool {
        if self.gesture.borrow().is_some() {
            return false;
        }
        let Some(geometry) = self.geometry.upgrade() else {
            return false;
        };
        let Some(claim) = self.slot.try_claim(GestureKind::Resize(direction)) else {
            return false;
        };
        let start_size = geometry.borrow().size;

        let gesture = Rc::downgrade(&self.gesture);
        let target = self.geometry.clone();
        let frames = self.frames.clone();
        let min_size = self.min_size;
        let capture = self.pointer.acquire(move |event| match event {
            PointerEvent::Move(pos) => schedule_write(&gesture, &target, &frames, pos, min_size),
            PointerEvent::Up(pos) => commit(&gesture, &target, pos, min_size),
            PointerEvent::Cancel => {
                if let Some(gesture) = gesture.upgrade() {
                    let ended = gesture.borrow_mut().take();
                    drop(ended);
                }
            }
        });

        log::debug!("resize {:?} start at ({}, {})", direction, at.x, at.y);
        *self.gesture.borrow_mut() = Some(ResizeGesture {
            direction,
            origin: at,
            start_size,
            frame: None,
            _claim: claim,
            _capture: capture,
        });
        true
    }

    /// Check if a resize is in progress
    pub fn is_resizing(&self) -> bool {
        self.gesture.borrow().is_some()
    }

    /// Direction of the active resize
    pub fn direction(&self) -> Option<ResizeDirection> {
        self.gesture.borrow().as_ref().map(|g| g.direction)
    }

    /// Abort the resize; a pending write is discarded
    pub fn cancel(&self) {
        let ended = self.gesture.borrow_mut().take();
        drop(ended);
    }

    /// Size floor enforced by this controller
    #[inline]
    pub fn min_size(&self) -> Size {
        self.min_size
    }
}

fn schedule_write(
    gesture: &Weak<RefCell<Option<ResizeGesture>>>,
    target: &Weak<RefCell<Geometry>>,
    frames: &FrameScheduler,
    pos: Vec2,
    min_size: Size,
) {
    let Some(gesture) = gesture.upgrade() else {
        return;
    };
    let mut gesture = gesture.borrow_mut();
    let Some(active) = gesture.as_mut() else {
        return;
    };

    let size = active.size_at(pos, min_size);
    let target = target.clone();
    let request = frames.request(move || {
        if let Some(geometry) = target.upgrade() {
            geometry.borrow_mut().size = size;
        }
    });
    // Replacing the request cancels the superseded write
    active.frame = Some(request);
}

fn commit(
    gesture: &Weak<RefCell<Option<ResizeGesture>>>,
    target: &Weak<RefCell<Geometry>>,
    pos: Vec2,
    min_size: Size,
) {
    let Some(gesture) = gesture.upgrade() else {
        return;
    };
    let ended = gesture.borrow_mut().take();
    let Some(ended) = ended else {
        return;
    };

    let size = ended.size_at(pos, min_size);
    if let Some(geometry) = target.upgrade() {
        geometry.borrow_mut().size = size;
    }
    log::debug!("resize end at {}x{}", size.width, size.height);
    drop(ended);
}
