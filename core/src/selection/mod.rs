//! Control point selection for visualization
//!
//! Decides which control points of a beam are deliverable segments and how
//! they are numbered for display.

mod segments;

pub use segments::{segment_number, visualizable_control_points, Segments};
