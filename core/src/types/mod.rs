//! Core type definitions for RT Plan exploration
//!
//! This module provides the fundamental types used throughout the mlcexplorer library:
//! - [`Plan`], [`Beam`], [`ControlPoint`], [`DevicePositionRecord`]: the read-only plan model
//! - [`GantryState`]: beam-level gantry angle and rotation direction
//! - [`DeviceType`]: RT beam limiting device vocabulary
//! - [`Bank`]: the two opposing MLC leaf banks
//! - [`ExportConfig`]: configuration for the table export
//! - [`units`]: raw-position unit conversion

mod config;
mod enums;
mod plan;
pub mod units;

pub use config::{ExportConfig, DEFAULT_DEVICE_SERIAL, DEFAULT_EXPORT_LEAF_WIDTH};
pub use enums::{Bank, DeviceType};
pub use plan::{Beam, ControlPoint, DevicePositionRecord, GantryState, Plan};

/// Number of entries in a raw MLCY LeafJawPositions array
pub const MLC_LEAF_COUNT: usize = 160;

/// Leaves in each of the two banks
pub const LEAVES_PER_BANK: usize = MLC_LEAF_COUNT / 2;

/// Number of entries in a raw ASYMX LeafJawPositions array
pub const JAW_COUNT: usize = 2;
