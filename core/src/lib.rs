pub mod api;
pub mod cli;
pub mod error;
pub mod export;
pub mod extraction;
pub mod geometry;
pub mod selection;
pub mod types;

pub use api::PlanExplorer;
pub use cli::report::PlanReport;
pub use error::{ExplorerError, Result};
pub use export::{BeamTable, Cell, ExportReport, SkippedControlPoint, TableRow};
pub use geometry::{BeamView, Geometry, LeafShape};
pub use selection::Segments;
pub use types::*;
