//! Next-frame write coalescing

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Write = Box<dyn FnOnce()>;

#[derive(Default)]
struct PendingWrites {
    next_id: u64,
    writes: Vec<(u64, Write)>,
}

impl PendingWrites {
    fn take(&mut self, id: u64) -> Option<Write> {
        let index = self.writes.iter().position(|(wid, _)| *wid == id)?;
        Some(self.writes.remove(index).1)
    }
}

/// Queue of writes to apply on the host's next animation frame.
///
/// The host calls [`FrameScheduler::run_frame`] once per frame. Writes
/// requested while a frame runs land in the following frame.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    pending: Rc<RefCell<PendingWrites>>,
}

impl FrameScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `write` for the next frame.
    ///
    /// Dropping the returned request cancels the write if it has not run.
    pub fn request(&self, write: impl FnOnce() + 'static) -> FrameRequest {
        let mut pending = self.pending.borrow_mut();
        let id = pending.next_id;
        pending.next_id += 1;
        pending.writes.push((id, Box::new(write)));

        FrameRequest {
            id,
            pending: Rc::downgrade(&self.pending),
        }
    }

    /// Apply every pending write; returns how many ran
    pub fn run_frame(&self) -> usize {
        let writes = std::mem::take(&mut self.pending.borrow_mut().writes);
        let count = writes.len();
        for (_, write) in writes {
            write();
        }
        count
    }

    /// Number of writes waiting for the next frame
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().writes.len()
    }
}

/// Token for one scheduled write
#[must_use = "dropping a FrameRequest cancels the write"]
pub struct FrameRequest {
    id: u64,
    pending: Weak<RefCell<PendingWrites>>,
}

impl FrameRequest {
    /// Check if the write is still waiting
    pub fn is_pending(&self) -> bool {
        let Some(pending) = self.pending.upgrade() else {
            return false;
        };
        let waiting = pending.borrow().writes.iter().any(|(wid, _)| *wid == self.id);
        waiting
    }

    /// Drop the write without running it
    pub fn cancel(self) {}
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.upgrade() {
            let cancelled = pending.borrow_mut().take(self.id);
            drop(cancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_write_runs_on_next_frame() {
        let frames = FrameScheduler::new();
        let value = Rc::new(Cell::new(0));

        let v = value.clone();
        let request = frames.request(move || v.set(7));
        assert!(request.is_pending());
        assert_eq!(value.get(), 0);

        assert_eq!(frames.run_frame(), 1);
        assert_eq!(value.get(), 7);
        assert!(!request.is_pending());
    }

    #[test]
    fn test_replacing_request_keeps_one_pending() {
        let frames = FrameScheduler::new();
        let value = Rc::new(Cell::new(0));

        let mut slot: Option<FrameRequest> = None;
        for n in 1..=5 {
            let v = value.clone();
            slot = Some(frames.request(move || v.set(n)));
        }

        assert_eq!(frames.pending_count(), 1);
        frames.run_frame();
        assert_eq!(value.get(), 5);
        drop(slot);
    }

    #[test]
    fn test_drop_cancels() {
        let frames = FrameScheduler::new();
        let value = Rc::new(Cell::new(0));

        let v = value.clone();
        frames.request(move || v.set(1)).cancel();

        assert_eq!(frames.run_frame(), 0);
        assert_eq!(value.get(), 0);
    }
}
