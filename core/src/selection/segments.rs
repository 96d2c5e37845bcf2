use crate::error::{ExplorerError, Result};
use crate::types::Beam;

/// 1-based segment number displayed for a control point index
///
/// Each delivered segment spans a setup (even) and a delivery (odd) control
/// point, so indices `2k` and `2k + 1` share segment `k + 1`.
pub fn segment_number(control_point_index: usize) -> usize {
    control_point_index / 2 + 1
}

/// Indices of the control points that can be visualized
///
/// A control point qualifies when its index is odd and it carries a populated
/// device-position sequence. Even indices are setup/interpolation points and
/// are excluded regardless of content.
pub fn visualizable_control_points(beam: &Beam) -> Vec<usize> {
    beam.control_points
        .iter()
        .enumerate()
        .filter(|(i, cp)| i % 2 == 1 && cp.has_device_positions())
        .map(|(i, _)| i)
        .collect()
}

/// The visualizable segments of one beam
///
/// # Example
///
/// ```
/// use mlcexplorer_core::{Beam, ControlPoint, DevicePositionRecord, DeviceType, Segments};
///
/// let with_devices = |index| ControlPoint {
///     index,
///     device_positions: Some(vec![DevicePositionRecord::new(DeviceType::AsymX, vec![0.0, 0.0])]),
///     ..Default::default()
/// };
/// let beam = Beam::new(None, None, None, vec![ControlPoint::default(), with_devices(1)]);
///
/// let segments = Segments::for_beam(0, &beam).unwrap();
/// assert_eq!(segments.control_points(), &[1]);
/// assert_eq!(segments.single(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Segments {
    beam_index: usize,
    control_points: Vec<usize>,
}

impl Segments {
    /// Collects the visualizable control points of a beam
    ///
    /// # Errors
    ///
    /// Returns `NoVisualizableSegments` when no odd index qualifies
    pub fn for_beam(beam_index: usize, beam: &Beam) -> Result<Self> {
        let control_points = visualizable_control_points(beam);
        if control_points.is_empty() {
            return Err(ExplorerError::NoVisualizableSegments { beam: beam_index });
        }
        Ok(Self {
            beam_index,
            control_points,
        })
    }

    pub fn beam_index(&self) -> usize {
        self.beam_index
    }

    /// Qualifying control point indices in ascending order
    pub fn control_points(&self) -> &[usize] {
        &self.control_points
    }

    /// Segment numbers of the qualifying control points, in the same order
    pub fn segment_numbers(&self) -> Vec<usize> {
        self.control_points
            .iter()
            .map(|&i| segment_number(i))
            .collect()
    }

    /// Control point index shown for a segment number, if that segment qualifies
    pub fn control_point_for_segment(&self, segment: usize) -> Option<usize> {
        self.control_points
            .iter()
            .copied()
            .find(|&i| segment_number(i) == segment)
    }

    /// The control point to show without asking, when there is exactly one
    pub fn single(&self) -> Option<usize> {
        match self.control_points.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }
}
