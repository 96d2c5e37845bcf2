use crate::error::{ExplorerError, Result};
use crate::export::{assemble_tables, ExportReport};
use crate::extraction::{locate_devices, read_plan};
use crate::geometry::{project_leaf_banks, BeamView};
use crate::selection::Segments;
use crate::types::{Beam, ExportConfig, Plan};
use dicom_object::{open_file, InMemDicomObject};
use log::{error, info};
use std::path::Path;

/// Main entry point for exploring an RT Plan
///
/// Holds the read-only plan model and answers visualization and export
/// requests against it. Every request is independent of the others.
///
/// # Example
///
/// ```
/// use mlcexplorer_core::PlanExplorer;
/// use dicom_core::value::DataSetSequence;
/// use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
/// use dicom_object::InMemDicomObject;
///
/// let ds = |values: Vec<f64>| {
///     PrimitiveValue::Strs(values.iter().map(|v| v.to_string()).collect::<Vec<_>>().into())
/// };
/// let device = |code: &str, values: Vec<f64>| {
///     InMemDicomObject::from_element_iter([
///         DataElement::new(Tag(0x300A, 0x00B8), VR::CS, PrimitiveValue::from(code)),
///         DataElement::new(Tag(0x300A, 0x011C), VR::DS, ds(values)),
///     ])
/// };
///
/// // Control point 0 is a setup point without devices, control point 1 has both
/// let setup = InMemDicomObject::from_element_iter([
///     DataElement::new(Tag(0x300A, 0x011E), VR::DS, PrimitiveValue::from("180")),
///     DataElement::new(Tag(0x300A, 0x011F), VR::CS, PrimitiveValue::from("NONE")),
/// ]);
/// let mut mlc = vec![0.0; 80];
/// mlc.extend(vec![50.0; 80]);
/// let delivery = InMemDicomObject::from_element_iter([
///     DataElement::new(Tag(0x300A, 0x0134), VR::DS, PrimitiveValue::from("1")),
///     DataElement::new(
///         Tag(0x300A, 0x011A),
///         VR::SQ,
///         DataSetSequence::from(vec![device("ASYMX", vec![100.0, -50.0]), device("MLCY", mlc)]),
///     ),
/// ]);
/// let beam = InMemDicomObject::from_element_iter([DataElement::new(
///     Tag(0x300A, 0x0111),
///     VR::SQ,
///     DataSetSequence::from(vec![setup, delivery]),
/// )]);
/// let dcm = InMemDicomObject::from_element_iter([DataElement::new(
///     Tag(0x300A, 0x00B0),
///     VR::SQ,
///     DataSetSequence::from(vec![beam]),
/// )]);
///
/// let explorer = PlanExplorer::from_dicom(&dcm).unwrap();
/// let segments = explorer.segments(0).unwrap();
/// assert_eq!(segments.control_points(), &[1]);
///
/// let view = explorer.beam_view(0, 1).unwrap();
/// assert_eq!(view.geometry.jaws[0].start.x, 10.0);
/// assert_eq!(view.geometry.leaves[0].label, "Leaf 80");
/// assert_eq!(view.geometry.leaves[80].y_span, [200.0, 50.0]);
/// ```
#[derive(Debug, Clone)]
pub struct PlanExplorer {
    plan: Plan,
}

impl PlanExplorer {
    /// Opens an RT Plan DICOM file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or has no BeamSequence
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dcm = open_file(path)?;
        let explorer = Self::from_dicom(&dcm)?;
        info!(
            "Loaded {} with {} beams",
            path.display(),
            explorer.plan.beams.len()
        );
        Ok(explorer)
    }

    /// Builds the plan model from an already-opened DICOM object
    pub fn from_dicom(dcm: &InMemDicomObject) -> Result<Self> {
        Ok(Self::from_plan(read_plan(dcm)?))
    }

    /// Wraps an existing plan model
    pub fn from_plan(plan: Plan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Returns the beam at a 0-based index
    pub fn beam(&self, beam_index: usize) -> Result<&Beam> {
        self.plan
            .beams
            .get(beam_index)
            .ok_or(ExplorerError::IndexOutOfRange {
                kind: "Beam",
                index: beam_index,
                available: self.plan.beams.len(),
            })
    }

    /// Visualizable segments of a beam
    pub fn segments(&self, beam_index: usize) -> Result<Segments> {
        Segments::for_beam(beam_index, self.beam(beam_index)?)
    }

    /// Projects one control point of a beam into a beam's-eye view
    ///
    /// Any control point index is accepted; only the device data decides
    /// whether a view can be produced.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` for an unknown beam or control point
    /// - `MissingDeviceSequence` / `IncompleteDeviceData` when jaw or MLC data is absent
    /// - `InvalidGeometryInput` when the arrays have the wrong length
    pub fn beam_view(&self, beam_index: usize, control_point_index: usize) -> Result<BeamView> {
        let beam = self.beam(beam_index)?;
        let control_point =
            beam.control_points
                .get(control_point_index)
                .ok_or(ExplorerError::IndexOutOfRange {
                    kind: "Control point",
                    index: control_point_index,
                    available: beam.control_points.len(),
                })?;

        let devices = locate_devices(control_point).into_result()?;
        let geometry = project_leaf_banks(devices.mlc, devices.jaws).map_err(|e| {
            error!(
                "Beam {}, control point {}: {}",
                beam_index + 1,
                control_point_index,
                e
            );
            e
        })?;

        Ok(BeamView::new(beam_index, control_point_index, geometry))
    }

    /// Projects the control point shown for a 1-based segment number
    ///
    /// # Errors
    ///
    /// `NoVisualizableSegments` if the beam has none, `IndexOutOfRange` if the
    /// segment is not one of them
    pub fn beam_view_for_segment(&self, beam_index: usize, segment: usize) -> Result<BeamView> {
        let segments = self.segments(beam_index)?;
        let control_point_index =
            segments
                .control_point_for_segment(segment)
                .ok_or(ExplorerError::IndexOutOfRange {
                    kind: "Segment",
                    index: segment,
                    available: segments.len(),
                })?;
        self.beam_view(beam_index, control_point_index)
    }

    /// Assembles the per-beam export tables
    pub fn export(&self, config: &ExportConfig) -> ExportReport {
        assemble_tables(&self.plan, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ControlPoint, DevicePositionRecord, DeviceType};

    fn explorer() -> PlanExplorer {
        let cp = |index: usize, records: Option<Vec<DevicePositionRecord>>| ControlPoint {
            index,
            cumulative_meterset_weight: Some(index as f64 / 4.0),
            gantry_angle: Some(0.0),
            gantry_rotation: Some("NONE".to_string()),
            device_positions: records,
        };
        let full = || {
            Some(vec![
                DevicePositionRecord::new(DeviceType::AsymX, vec![-20.0, 20.0]),
                DevicePositionRecord::new(DeviceType::MlcY, vec![5.0; 160]),
            ])
        };
        let jaws_only = Some(vec![DevicePositionRecord::new(
            DeviceType::AsymX,
            vec![-20.0, 20.0],
        )]);
        let short_mlc = Some(vec![
            DevicePositionRecord::new(DeviceType::AsymX, vec![-20.0, 20.0]),
            DevicePositionRecord::new(DeviceType::MlcY, vec![5.0; 100]),
        ]);

        PlanExplorer::from_plan(Plan {
            patient_id: Some("PAT".to_string()),
            plan_name: Some("Plan".to_string()),
            plan_label: None,
            beams: vec![Beam::new(
                Some(1),
                Some("B1".to_string()),
                None,
                vec![
                    cp(0, None),
                    cp(1, full()),
                    cp(2, full()),
                    cp(3, jaws_only),
                    cp(4, None),
                    cp(5, short_mlc),
                ],
            )],
            beam_metersets: vec![Some(100.0)],
        })
    }

    #[test]
    fn test_beam_out_of_range() {
        assert!(matches!(
            explorer().beam(3),
            Err(ExplorerError::IndexOutOfRange { index: 3, available: 1, .. })
        ));
    }

    #[test]
    fn test_beam_view_errors() {
        let explorer = explorer();
        assert!(matches!(
            explorer.beam_view(0, 0),
            Err(ExplorerError::MissingDeviceSequence)
        ));
        assert!(matches!(
            explorer.beam_view(0, 3),
            Err(ExplorerError::IncompleteDeviceData { .. })
        ));
        assert!(matches!(
            explorer.beam_view(0, 5),
            Err(ExplorerError::InvalidGeometryInput(_))
        ));
        assert!(matches!(
            explorer.beam_view(0, 6),
            Err(ExplorerError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_segments_and_segment_views() {
        let explorer = explorer();
        let segments = explorer.segments(0).unwrap();
        assert_eq!(segments.control_points(), &[1, 3, 5]);

        let view = explorer.beam_view_for_segment(0, 1).unwrap();
        assert_eq!(view.control_point_index, 1);
        assert_eq!(view.title, "Beam's Eye View: Beam 1, Control Point 1");

        assert!(matches!(
            explorer.beam_view_for_segment(0, 9),
            Err(ExplorerError::IndexOutOfRange { kind: "Segment", .. })
        ));
    }

    #[test]
    fn test_export_counts() {
        let report = explorer().export(&ExportConfig::default());
        let headers: Vec<_> = report.tables[0]
            .columns
            .iter()
            .map(|c| c.header.as_str())
            .collect();
        assert_eq!(headers, vec!["Control Point 2", "Control Point 3"]);
        assert_eq!(report.skipped.len(), 4);
    }
}
