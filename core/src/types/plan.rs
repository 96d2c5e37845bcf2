use super::DeviceType;

/// Read-only RT Plan model
///
/// Built once from a DICOM object by [`crate::extraction::read_plan`] and
/// shared by every projection and export request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Plan {
    /// Patient ID (0010,0020)
    pub patient_id: Option<String>,

    /// RT Plan Name (300A,0003)
    pub plan_name: Option<String>,

    /// RT Plan Label (300A,0002)
    pub plan_label: Option<String>,

    /// Beams in plan order; the position is the beam index
    pub beams: Vec<Beam>,

    /// BeamMeterset of FractionGroupSequence[0].ReferencedBeamSequence, positionally
    pub beam_metersets: Vec<Option<f64>>,
}

impl Plan {
    /// Looks up the prescribed meterset for a beam index
    pub fn beam_meterset(&self, beam_index: usize) -> Option<f64> {
        self.beam_metersets.get(beam_index).copied().flatten()
    }
}

/// Gantry angle and rotation direction held fixed for a whole beam
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct GantryState {
    pub angle: f64,
    pub rotation_direction: String,
}

/// One beam of the plan
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Beam {
    /// Beam Number (300A,00C0)
    pub number: Option<i32>,

    /// Beam Name (300A,00C2)
    pub name: Option<String>,

    /// Beam Description (300A,00C3)
    pub description: Option<String>,

    /// Control points in sequence order; the position is the control point index
    pub control_points: Vec<ControlPoint>,

    /// Gantry state of control point 0
    fixed_gantry: Option<GantryState>,
}

impl Beam {
    /// Creates a beam, deriving the fixed gantry state from control point 0
    ///
    /// Gantry fields of later control points are ignored for the derived value.
    pub fn new(
        number: Option<i32>,
        name: Option<String>,
        description: Option<String>,
        control_points: Vec<ControlPoint>,
    ) -> Self {
        let fixed_gantry = control_points.first().and_then(|first| {
            match (first.gantry_angle, first.gantry_rotation.as_ref()) {
                (Some(angle), Some(rotation)) => Some(GantryState {
                    angle,
                    rotation_direction: rotation.clone(),
                }),
                _ => None,
            }
        });

        Self {
            number,
            name,
            description,
            control_points,
            fixed_gantry,
        }
    }

    /// Returns the beam-level gantry state
    ///
    /// The state is only ever derived from control point 0:
    ///
    /// ```compile_fail
    /// use mlcexplorer_core::{Beam, GantryState};
    ///
    /// let mut beam = Beam::new(None, None, None, Vec::new());
    /// beam.fixed_gantry = Some(GantryState {
    ///     angle: 90.0,
    ///     rotation_direction: "CW".to_string(),
    /// });
    /// ```
    pub fn fixed_gantry_state(&self) -> Option<&GantryState> {
        self.fixed_gantry.as_ref()
    }
}

/// One delivery instant within a beam
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ControlPoint {
    /// Position within the beam's ControlPointSequence
    pub index: usize,

    /// Cumulative Meterset Weight (300A,0134), 0.0 to 1.0
    pub cumulative_meterset_weight: Option<f64>,

    /// Gantry Angle (300A,011E)
    pub gantry_angle: Option<f64>,

    /// Gantry Rotation Direction (300A,011F)
    pub gantry_rotation: Option<String>,

    /// Readable BeamLimitingDevicePositionSequence items; `None` when the
    /// sequence is absent or has no items
    pub device_positions: Option<Vec<DevicePositionRecord>>,
}

impl ControlPoint {
    /// Whether a non-empty device-position sequence is attached
    pub fn has_device_positions(&self) -> bool {
        self.device_positions
            .as_ref()
            .is_some_and(|records| !records.is_empty())
    }
}

/// A (device type, raw positions) pair of a control point
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DevicePositionRecord {
    pub device_type: DeviceType,

    /// Leaf/Jaw Positions (300A,011C), raw DICOM units
    pub positions: Vec<f64>,
}

impl DevicePositionRecord {
    pub fn new(device_type: DeviceType, positions: Vec<f64>) -> Self {
        Self {
            device_type,
            positions,
        }
    }
}
