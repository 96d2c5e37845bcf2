//! Beam's-eye-view projection of MLC leaves and jaws
//!
//! Produces drawable primitives only; rendering belongs to the chart consumer.

mod primitives;
mod projector;
mod view;

pub use primitives::{Color, LeafShape, Line, Point};
pub use projector::{
    dicom_leaf_number, leaf_x_span, project_leaf_banks, Geometry, BANK_A_FILL, BANK_B_FILL,
    LEAF_WIDTH_CM, X_START_CM, Y_EXTENT,
};
pub use view::{Axis, BeamView, ViewLayout};
