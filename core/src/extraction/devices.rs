use crate::error::{ExplorerError, Result};
use crate::types::{ControlPoint, DeviceType};

/// Raw jaw and MLC arrays located on one control point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePositions<'a> {
    /// ASYMX LeafJawPositions
    pub jaws: &'a [f64],

    /// MLCY LeafJawPositions
    pub mlc: &'a [f64],
}

/// Outcome of scanning a control point's device-position records
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceLookup<'a> {
    /// Both ASYMX and MLCY were found
    Found(DevicePositions<'a>),

    /// The control point has no device-position sequence
    MissingSequence,

    /// The sequence exists but at least one required type is absent
    Incomplete { has_jaws: bool, has_mlc: bool },
}

impl<'a> DeviceLookup<'a> {
    /// Converts the lookup into a result, mapping absences to their error kinds
    pub fn into_result(self) -> Result<DevicePositions<'a>> {
        match self {
            DeviceLookup::Found(positions) => Ok(positions),
            DeviceLookup::MissingSequence => Err(ExplorerError::MissingDeviceSequence),
            DeviceLookup::Incomplete { has_jaws, has_mlc } => {
                let missing = match (has_jaws, has_mlc) {
                    (false, false) => "ASYMX and MLCY",
                    (false, true) => "ASYMX",
                    _ => "MLCY",
                };
                Err(ExplorerError::IncompleteDeviceData {
                    missing: missing.to_string(),
                })
            }
        }
    }
}

/// Locates the ASYMX jaw and MLCY leaf arrays of a control point
///
/// # Algorithm
///
/// 1. No device-position sequence → `MissingSequence`; a present sequence
///    without readable records falls through to `Incomplete`
/// 2. Walk the records once, keeping the first ASYMX and the first MLCY;
///    later records of the same type are ignored
/// 3. A record with an empty position array counts as absent
/// 4. Both present → `Found`, otherwise `Incomplete`
///
/// Array lengths are not checked here; the consumers validate shape.
pub fn locate_devices(control_point: &ControlPoint) -> DeviceLookup<'_> {
    let Some(records) = control_point.device_positions.as_deref() else {
        return DeviceLookup::MissingSequence;
    };

    let mut jaws = None;
    let mut mlc = None;
    for record in records {
        if record.positions.is_empty() {
            continue;
        }
        match record.device_type {
            DeviceType::AsymX if jaws.is_none() => jaws = Some(record.positions.as_slice()),
            DeviceType::MlcY if mlc.is_none() => mlc = Some(record.positions.as_slice()),
            _ => {}
        }
    }

    match (jaws, mlc) {
        (Some(jaws), Some(mlc)) => DeviceLookup::Found(DevicePositions { jaws, mlc }),
        (jaws, mlc) => DeviceLookup::Incomplete {
            has_jaws: jaws.is_some(),
            has_mlc: mlc.is_some(),
        },
    }
}
