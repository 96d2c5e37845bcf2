use crate::error::{ExplorerError, Result};
use crate::extraction::locate_devices;
use crate::types::units::{round_to, to_centimeters, to_millimeters_rounded};
use crate::types::{
    Beam, ControlPoint, ExportConfig, Plan, JAW_COUNT, LEAVES_PER_BANK, MLC_LEAF_COUNT,
};
use log::{debug, error, warn};
use std::fmt;

/// One exported value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) => Cell::Text(s.to_string()),
            None => Cell::Empty,
        }
    }
}

/// Numbers print with a decimal point so `50.0` stays distinguishable from text
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{:?}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Empty => Ok(()),
        }
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for Cell {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Empty => serializer.serialize_str(""),
        }
    }
}

/// One exported column: all values of one (beam, control point) pair
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TableRow {
    /// `"Control Point {n+1}"`, from the raw control point index
    pub header: String,

    /// Values in the fixed field order of [`TableRow::SCALAR_FIELDS`] then Y1, Y2
    pub cells: Vec<Cell>,
}

impl TableRow {
    /// Names of the scalar fields preceding the two leaf halves
    pub const SCALAR_FIELDS: [&'static str; 13] = [
        "Beam Meterset",
        "Device Serial",
        "Patient ID",
        "Plan Name",
        "Beam Name",
        "Beam Description",
        "Leaf Width",
        "Cumulative Meterset Weight (%)",
        "Gantry Angle",
        "Jaw 1",
        "Jaw 2",
        "",
        "Gantry Rotation Direction",
    ];

    /// Values per column: scalar fields, then 80 Y1 and 80 Y2 leaf positions
    pub const FIELD_COUNT: usize = Self::SCALAR_FIELDS.len() + MLC_LEAF_COUNT;

    /// Column header for a raw control point index
    pub fn header_for(control_point_index: usize) -> String {
        format!("Control Point {}", control_point_index + 1)
    }

    /// Y1 leaf values of this column
    pub fn y1(&self) -> &[Cell] {
        let start = Self::SCALAR_FIELDS.len();
        &self.cells[start..start + LEAVES_PER_BANK]
    }

    /// Y2 leaf values of this column
    pub fn y2(&self) -> &[Cell] {
        let start = Self::SCALAR_FIELDS.len() + LEAVES_PER_BANK;
        &self.cells[start..]
    }
}

/// One sheet of the export: every complete control point of a beam
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BeamTable {
    pub beam_index: usize,

    /// `"Beam {n+1}"`
    pub sheet_name: String,

    pub columns: Vec<TableRow>,
}

impl BeamTable {
    /// Value of field `row` across all columns, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Cell> {
        self.columns.iter().filter_map(move |column| column.cells.get(row))
    }
}

/// A control point that contributed nothing to the export
#[derive(Debug)]
pub struct SkippedControlPoint {
    pub beam_index: usize,
    pub control_point_index: usize,
    pub reason: ExplorerError,
}

/// Outcome of exporting a whole plan
#[derive(Debug, Default)]
pub struct ExportReport {
    pub tables: Vec<BeamTable>,
    pub skipped: Vec<SkippedControlPoint>,
}

impl ExportReport {
    /// Number of exported columns across all sheets
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|table| table.columns.len()).sum()
    }
}

/// Reverses jaw positions and converts them to rounded centimetres
pub fn remap_jaws(jaws: &[f64]) -> Vec<f64> {
    jaws.iter()
        .rev()
        .map(|&raw| round_to(to_centimeters(raw), 2))
        .collect()
}

/// Reverses the 160 MLC positions and splits them into `(Y1, Y2)`
///
/// After reversal, Y1 is `[80..160]` and Y2 is `[0..80]`, each converted and
/// rounded to 3 decimals. This is the layout the machine import expects.
///
/// # Errors
///
/// Returns `InvalidGeometryInput` unless `mlc` has exactly 160 entries
pub fn remap_leaf_halves(mlc: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if mlc.len() != MLC_LEAF_COUNT {
        return Err(ExplorerError::InvalidGeometryInput(format!(
            "expected {} MLCY leaf positions, found {}",
            MLC_LEAF_COUNT,
            mlc.len()
        )));
    }

    let reversed: Vec<f64> = mlc
        .iter()
        .rev()
        .map(|&raw| to_millimeters_rounded(raw, 3))
        .collect();
    let (y2, y1) = reversed.split_at(LEAVES_PER_BANK);
    Ok((y1.to_vec(), y2.to_vec()))
}

/// Assembles one column for a control point of a beam
///
/// Gantry angle and rotation come from the beam's fixed gantry state
/// (control point 0), never from the control point being assembled.
///
/// # Errors
///
/// - `MissingDeviceSequence` / `IncompleteDeviceData` if jaw or MLC data is absent
/// - `InvalidGeometryInput` if the arrays have the wrong length
/// - `MissingAttribute` if the gantry state or meterset weight is absent
/// - `BeamLookupFailure` if the plan has no meterset for the beam
pub fn assemble_row(
    plan: &Plan,
    beam_index: usize,
    beam: &Beam,
    control_point: &ControlPoint,
    config: &ExportConfig,
) -> Result<TableRow> {
    let devices = locate_devices(control_point).into_result()?;
    if devices.mlc.len() != MLC_LEAF_COUNT || devices.jaws.len() != JAW_COUNT {
        return Err(ExplorerError::InvalidGeometryInput(format!(
            "expected {} jaw and {} MLCY positions, found {} and {}",
            JAW_COUNT,
            MLC_LEAF_COUNT,
            devices.jaws.len(),
            devices.mlc.len()
        )));
    }

    let gantry = beam.fixed_gantry_state().ok_or_else(|| {
        ExplorerError::MissingAttribute("GantryAngle/GantryRotationDirection".to_string())
    })?;
    let weight = control_point.cumulative_meterset_weight.ok_or_else(|| {
        ExplorerError::MissingAttribute("CumulativeMetersetWeight".to_string())
    })?;
    let beam_meterset = plan
        .beam_meterset(beam_index)
        .ok_or(ExplorerError::BeamLookupFailure { beam: beam_index })?;

    let jaws = remap_jaws(devices.jaws);
    let (y1, y2) = remap_leaf_halves(devices.mlc)?;

    let mut cells = Vec::with_capacity(TableRow::FIELD_COUNT);
    cells.push(Cell::Number(beam_meterset));
    cells.push(Cell::Text(config.device_serial.clone()));
    cells.push(Cell::text(plan.patient_id.as_deref()));
    cells.push(Cell::text(plan.plan_name.as_deref()));
    cells.push(Cell::text(beam.name.as_deref()));
    cells.push(Cell::text(beam.description.as_deref()));
    cells.push(Cell::Number(config.leaf_width));
    cells.push(Cell::Number(round_to(weight * 100.0, 3)));
    cells.push(Cell::Number(gantry.angle));
    cells.extend(jaws.into_iter().map(Cell::Number));
    cells.push(Cell::Empty);
    cells.push(Cell::Text(gantry.rotation_direction.clone()));
    cells.extend(y1.into_iter().map(Cell::Number));
    cells.extend(y2.into_iter().map(Cell::Number));

    Ok(TableRow {
        header: TableRow::header_for(control_point.index),
        cells,
    })
}

/// Builds one table per beam, skipping control points without complete data
///
/// Beams that yield no column produce no table. Every skipped control point
/// is recorded in the report; the advisory is logged once.
pub fn assemble_tables(plan: &Plan, config: &ExportConfig) -> ExportReport {
    let mut report = ExportReport::default();

    for (beam_index, beam) in plan.beams.iter().enumerate() {
        let mut columns = Vec::new();
        for control_point in &beam.control_points {
            match assemble_row(plan, beam_index, beam, control_point, config) {
                Ok(row) => columns.push(row),
                Err(reason) => {
                    if let ExplorerError::InvalidGeometryInput(_) = reason {
                        error!(
                            "Beam {}, control point {}: {}",
                            beam_index + 1,
                            control_point.index,
                            reason
                        );
                    } else {
                        debug!(
                            "Beam {}, control point {} skipped: {}",
                            beam_index + 1,
                            control_point.index,
                            reason
                        );
                    }
                    report.skipped.push(SkippedControlPoint {
                        beam_index,
                        control_point_index: control_point.index,
                        reason,
                    });
                }
            }
        }

        if !columns.is_empty() {
            report.tables.push(BeamTable {
                beam_index,
                sheet_name: format!("Beam {}", beam_index + 1),
                columns,
            });
        }
    }

    if !report.skipped.is_empty() {
        warn!(
            "{} control point(s) without complete jaw/MLC data were not exported",
            report.skipped.len()
        );
    }

    report
}
