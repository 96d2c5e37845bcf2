use crate::error::{ExplorerError, Result};
use crate::types::{Beam, ControlPoint, DevicePositionRecord, DeviceType, Plan};
use dicom_object::InMemDicomObject;
use log::{debug, warn};

use super::tags::{
    get_float_value, get_int_value, get_multi_float_value, get_sequence_items, get_string_value,
    tag_name, BEAM_DESCRIPTION, BEAM_LIMITING_DEVICE_POSITION_SEQUENCE, BEAM_METERSET, BEAM_NAME,
    BEAM_NUMBER, BEAM_SEQUENCE, CONTROL_POINT_SEQUENCE, CUMULATIVE_METERSET_WEIGHT,
    FRACTION_GROUP_SEQUENCE, GANTRY_ANGLE, GANTRY_ROTATION_DIRECTION, LEAF_JAW_POSITIONS,
    PATIENT_ID, REFERENCED_BEAM_SEQUENCE, RT_BEAM_LIMITING_DEVICE_TYPE, RT_PLAN_LABEL,
    RT_PLAN_NAME,
};

/// Reads the plan model from an RT Plan DICOM object
///
/// # Algorithm
///
/// 1. Plan-level PatientID, RTPlanName, RTPlanLabel (all optional)
/// 2. FractionGroupSequence[0] → ReferencedBeamSequence → BeamMeterset, kept positionally
/// 3. BeamSequence (required) → per beam ControlPointSequence
/// 4. Per control point: meterset weight, gantry fields and the device-position records
///
/// Unreadable attributes and device records are dropped one at a time, so the
/// rest of the control point (and control point indices) stay intact.
///
/// # Errors
///
/// Returns `TagNotFound` if the object has no BeamSequence
pub fn read_plan(dcm: &InMemDicomObject) -> Result<Plan> {
    let beam_items = get_sequence_items(dcm, BEAM_SEQUENCE)
        .ok_or_else(|| ExplorerError::TagNotFound(tag_name(BEAM_SEQUENCE)))?;

    let beams: Vec<Beam> = beam_items
        .iter()
        .enumerate()
        .map(|(beam_index, item)| read_beam(beam_index, item))
        .collect();

    let beam_metersets = read_beam_metersets(dcm);
    debug!(
        "Read plan with {} beams and {} referenced beam metersets",
        beams.len(),
        beam_metersets.len()
    );

    Ok(Plan {
        patient_id: get_string_value(dcm, PATIENT_ID),
        plan_name: get_string_value(dcm, RT_PLAN_NAME),
        plan_label: get_string_value(dcm, RT_PLAN_LABEL),
        beams,
        beam_metersets,
    })
}

/// Navigates: FractionGroupSequence[0] → ReferencedBeamSequence[*] → BeamMeterset
fn read_beam_metersets(dcm: &InMemDicomObject) -> Vec<Option<f64>> {
    get_sequence_items(dcm, FRACTION_GROUP_SEQUENCE)
        .and_then(|groups| groups.first())
        .and_then(|group| get_sequence_items(group, REFERENCED_BEAM_SEQUENCE))
        .map(|referenced| {
            referenced
                .iter()
                .map(|item| match get_float_value(item, BEAM_METERSET) {
                    Ok(meterset) => meterset,
                    Err(e) => {
                        warn!("Ignoring unreadable BeamMeterset: {}", e);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

fn read_beam(beam_index: usize, item: &InMemDicomObject) -> Beam {
    let control_points = get_sequence_items(item, CONTROL_POINT_SEQUENCE)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, cp_item)| read_control_point(beam_index, index, cp_item))
        .collect();

    Beam::new(
        get_int_value(item, BEAM_NUMBER),
        get_string_value(item, BEAM_NAME),
        get_string_value(item, BEAM_DESCRIPTION),
        control_points,
    )
}

/// Reads one control point; every attribute is read on its own
///
/// An unreadable attribute becomes `None` and an unreadable device record is
/// dropped, each with a `warn!`. A sequence whose records were all dropped is
/// kept as an empty list so it is not mistaken for an absent sequence.
fn read_control_point(beam_index: usize, index: usize, item: &InMemDicomObject) -> ControlPoint {
    let location = || format!("Beam {}, control point {}", beam_index + 1, index);
    let float_or_warn = |tag| {
        get_float_value(item, tag).unwrap_or_else(|e| {
            warn!("{}: ignoring unreadable {}: {}", location(), tag_name(tag), e);
            None
        })
    };

    let device_positions = match get_sequence_items(item, BEAM_LIMITING_DEVICE_POSITION_SEQUENCE) {
        Some(records) if !records.is_empty() => Some(
            records
                .iter()
                .enumerate()
                .filter_map(|(position, record)| match read_device_record(record) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(
                            "{}: dropping device position record {}: {}",
                            location(),
                            position,
                            e
                        );
                        None
                    }
                })
                .collect(),
        ),
        _ => None,
    };

    ControlPoint {
        index,
        cumulative_meterset_weight: float_or_warn(CUMULATIVE_METERSET_WEIGHT),
        gantry_angle: float_or_warn(GANTRY_ANGLE),
        gantry_rotation: get_string_value(item, GANTRY_ROTATION_DIRECTION)
            .filter(|s| !s.is_empty()),
        device_positions,
    }
}

fn read_device_record(item: &InMemDicomObject) -> Result<DevicePositionRecord> {
    let device_type = get_string_value(item, RT_BEAM_LIMITING_DEVICE_TYPE)
        .filter(|code| !code.is_empty())
        .map(|code| DeviceType::from_str(&code))
        .ok_or_else(|| ExplorerError::TagNotFound(tag_name(RT_BEAM_LIMITING_DEVICE_TYPE)))?;
    let positions = get_multi_float_value(item, LEAF_JAW_POSITIONS)?.unwrap_or_default();

    Ok(DevicePositionRecord::new(device_type, positions))
}
