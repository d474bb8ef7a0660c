//! Frame-budgeted post effects.
//!
//! Effects capture a frame once and then make bounded progress per call, so the frame loop
//! never stalls on a full-buffer operation.

pub mod pixel_sort;

pub use pixel_sort::{DEFAULT_PIXELS_PER_FRAME, EffectPhase, PixelSorter, brightness};
