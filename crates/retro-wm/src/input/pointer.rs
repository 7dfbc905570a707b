//! Host pointer stream with scoped capture

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::bus::Subscription;
use crate::math::Vec2;

/// Pointer event delivered to the capture owner
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved (viewport coordinates)
    Move(Vec2),
    /// Pointer released anywhere
    Up(Vec2),
    /// Capture taken over by another gesture
    Cancel,
}

type Handler = Rc<dyn Fn(PointerEvent)>;

#[derive(Default)]
struct CaptureSlot {
    next_id: u64,
    current: Option<(u64, Handler)>,
}

/// Global pointer-move/pointer-up stream fed by the host.
///
/// Gestures acquire a [`PointerCapture`] for their duration only. There is a
/// single capture owner at a time: acquiring a new capture sends
/// [`PointerEvent::Cancel`] to the previous owner and detaches it.
#[derive(Clone, Default)]
pub struct PointerDispatcher {
    slot: Rc<RefCell<CaptureSlot>>,
}

impl PointerDispatcher {
    /// Create a dispatcher with no capture
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every following pointer event to `handler` until the returned
    /// capture is dropped, the pointer is released, or another gesture
    /// acquires the pointer.
    pub fn acquire(&self, handler: impl Fn(PointerEvent) + 'static) -> PointerCapture {
        let preempted = self.slot.borrow_mut().current.take();
        if let Some((_, previous)) = preempted {
            log::debug!("pointer capture preempted");
            previous(PointerEvent::Cancel);
        }

        let id = {
            let mut slot = self.slot.borrow_mut();
            let id = slot.next_id;
            slot.next_id += 1;
            slot.current = Some((id, Rc::new(handler)));
            id
        };

        let weak: Weak<RefCell<CaptureSlot>> = Rc::downgrade(&self.slot);
        PointerCapture {
            _guard: Subscription::new(move || {
                if let Some(slot) = weak.upgrade() {
                    let mut slot = slot.borrow_mut();
                    if slot.current.as_ref().is_some_and(|(cid, _)| *cid == id) {
                        slot.current = None;
                    }
                }
            }),
        }
    }

    /// Feed a pointer-move from the host
    pub fn pointer_move(&self, pos: Vec2) {
        self.dispatch(PointerEvent::Move(pos));
    }

    /// Feed a pointer-up from the host; always ends the current capture
    pub fn pointer_up(&self, pos: Vec2) {
        let released = self.dispatch(PointerEvent::Up(pos));
        if let Some(id) = released {
            let mut slot = self.slot.borrow_mut();
            if slot.current.as_ref().is_some_and(|(cid, _)| *cid == id) {
                slot.current = None;
            }
        }
    }

    /// Check if a gesture currently holds the pointer
    pub fn is_captured(&self) -> bool {
        self.slot.borrow().current.is_some()
    }

    fn dispatch(&self, event: PointerEvent) -> Option<u64> {
        let current = self
            .slot
            .borrow()
            .current
            .as_ref()
            .map(|(id, handler)| (*id, handler.clone()));

        let (id, handler) = current?;
        handler(event);
        Some(id)
    }
}

/// Scoped pointer capture; dropping it detaches the listener
#[must_use = "dropping a PointerCapture releases the pointer immediately"]
pub struct PointerCapture {
    _guard: Subscription,
}

impl std::fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerCapture").finish_non_exhaustive()
    }
}
