//! Input routing module
//!
//! Provides the host pointer stream, next-frame write coalescing and the
//! drag/resize gesture controllers.

mod pointer;
mod frame;
mod gesture;
mod drag;
mod resize;

pub use pointer::{PointerCapture, PointerDispatcher, PointerEvent};
pub use frame::{FrameRequest, FrameScheduler};
pub use gesture::{GestureKind, GestureSlot};
pub use drag::{DragController, DragOptions};
pub use resize::{calculate_resize, ResizeController, ResizeDirection};
