//! Per-window gesture exclusivity

use std::cell::Cell;
use std::rc::Rc;

use super::ResizeDirection;

/// Kind of gesture holding a window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// Title bar drag
    Drag,
    /// Edge or corner resize
    Resize(ResizeDirection),
}

/// Slot shared by the drag and resize controllers of one window.
///
/// Only one gesture may hold it at a time.
#[derive(Clone, Default)]
pub struct GestureSlot {
    current: Rc<Cell<Option<GestureKind>>>,
}

impl GestureSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Gesture currently holding the slot
    #[inline]
    pub fn current(&self) -> Option<GestureKind> {
        self.current.get()
    }

    /// Check if a gesture holds the slot
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.current.get().is_some()
    }

    /// Claim the slot for `kind`; `None` if another gesture holds it
    pub(crate) fn try_claim(&self, kind: GestureKind) -> Option<GestureClaim> {
        if self.is_busy() {
            return None;
        }
        self.current.set(Some(kind));
        Some(GestureClaim {
            slot: self.current.clone(),
        })
    }
}

/// Held by an active gesture; frees the slot on drop
pub(crate) struct GestureClaim {
    slot: Rc<Cell<Option<GestureKind>>>,
}

impl Drop for GestureClaim {
    fn drop(&mut self) {
        self.slot.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_exclusive() {
        let slot = GestureSlot::new();
        let claim = slot.try_claim(GestureKind::Resize(ResizeDirection::Right));
        assert!(claim.is_some());
        assert!(slot.try_claim(GestureKind::Drag).is_none());
        assert_eq!(slot.current(), Some(GestureKind::Resize(ResizeDirection::Right)));

        drop(claim);
        assert!(!slot.is_busy());
        assert!(slot.try_claim(GestureKind::Drag).is_some());
    }
}
