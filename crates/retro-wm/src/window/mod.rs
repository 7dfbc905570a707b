//! Window management module
//!
//! Provides window identity, the registry, z-order stacking and hit testing.

mod record;
mod registry;
mod zorder;
mod geometry;
mod region;

pub use record::{IconHandle, WindowId, WindowRecord};
pub use registry::{Visibility, WindowRegistry};
pub use zorder::ZOrderStack;
pub use geometry::{FrameStyle, Geometry, FRAME_STYLE};
pub use region::{hit_test, WindowRegion};
