use super::primitives::{Color, LeafShape, Line};
use crate::error::{ExplorerError, Result};
use crate::types::units::to_centimeters;
use crate::types::{Bank, JAW_COUNT, LEAVES_PER_BANK, MLC_LEAF_COUNT};

/// Left edge of leaf slot 0, in cm
pub const X_START_CM: f64 = -28.7;

/// Width of one leaf slot, in cm
pub const LEAF_WIDTH_CM: f64 = 0.7175;

/// Half height of the view; banks are anchored at `-Y_EXTENT` and `+Y_EXTENT`
pub const Y_EXTENT: f64 = 200.0;

pub const AXIS_COLOR: Color = Color::YELLOW;
pub const JAW_1_COLOR: Color = Color::RED;
pub const JAW_2_COLOR: Color = Color::BLUE;
pub const BANK_A_FILL: Color = Color::rgba(0, 255, 0, 0.5);
pub const BANK_B_FILL: Color = Color::rgba(128, 0, 128, 0.5);
pub const LEAF_OUTLINE: Color = Color::rgba(0, 0, 0, 0.1);
pub const LINE_WIDTH: f64 = 2.0;

/// Projected beam's-eye-view geometry of one control point
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Geometry {
    /// Horizontal then vertical axis through the origin
    pub axes: [Line; 2],

    /// Jaw 1 then jaw 2, in raw array order
    pub jaws: [Line; 2],

    /// One shape per raw MLC entry, in raw index order
    pub leaves: Vec<LeafShape>,
}

impl Geometry {
    /// Total number of drawable primitives
    pub fn primitive_count(&self) -> usize {
        self.axes.len() + self.jaws.len() + self.leaves.len()
    }

    /// Leaves of one bank
    pub fn bank(&self, bank: Bank) -> impl Iterator<Item = &LeafShape> {
        self.leaves.iter().filter(move |leaf| leaf.bank == bank)
    }
}

/// Physical DICOM leaf number of a raw MLC array index
///
/// The two halves are cross-labelled: raw 0..80 are leaves 80..160 and
/// raw 80..160 are leaves 0..80.
pub fn dicom_leaf_number(leaf_index: usize) -> usize {
    if leaf_index < LEAVES_PER_BANK {
        leaf_index + LEAVES_PER_BANK
    } else {
        leaf_index - LEAVES_PER_BANK
    }
}

/// X span of a leaf slot in cm; both banks share the same 80 slots
pub fn leaf_x_span(leaf_index: usize) -> [f64; 2] {
    let slot = (leaf_index % LEAVES_PER_BANK) as f64;
    let x0 = X_START_CM + slot * LEAF_WIDTH_CM;
    [x0, x0 + LEAF_WIDTH_CM]
}

/// Projects raw MLC and jaw positions into beam's-eye-view geometry
///
/// # Algorithm
///
/// 1. Axis lines through the origin spanning the full view
/// 2. Vertical jaw lines at `jaw / 10` cm
/// 3. Leaf `i` occupies slot `i mod 80`; bank A runs from `-200` up to the raw
///    position, bank B from `+200` down to it
///
/// # Errors
///
/// Returns `InvalidGeometryInput` unless `mlc` has exactly 160 entries and
/// `jaws` exactly 2
pub fn project_leaf_banks(mlc: &[f64], jaws: &[f64]) -> Result<Geometry> {
    if mlc.len() != MLC_LEAF_COUNT {
        return Err(ExplorerError::InvalidGeometryInput(format!(
            "expected {} MLCY leaf positions, found {}",
            MLC_LEAF_COUNT,
            mlc.len()
        )));
    }
    let [jaw_1, jaw_2] = <[f64; JAW_COUNT]>::try_from(jaws).map_err(|_| {
        ExplorerError::InvalidGeometryInput(format!(
            "expected {} ASYMX jaw positions, found {}",
            JAW_COUNT,
            jaws.len()
        ))
    })?;

    let axes = [
        Line::horizontal(0.0, X_START_CM, -X_START_CM, AXIS_COLOR, LINE_WIDTH),
        Line::vertical(0.0, -Y_EXTENT, Y_EXTENT, AXIS_COLOR, LINE_WIDTH),
    ];
    let jaws = [
        Line::vertical(to_centimeters(jaw_1), -Y_EXTENT, Y_EXTENT, JAW_1_COLOR, LINE_WIDTH),
        Line::vertical(to_centimeters(jaw_2), -Y_EXTENT, Y_EXTENT, JAW_2_COLOR, LINE_WIDTH),
    ];

    let leaves = mlc
        .iter()
        .enumerate()
        .map(|(i, &tip)| {
            let bank = Bank::of_leaf(i);
            let (edge, fill) = match bank {
                Bank::A => (-Y_EXTENT, BANK_A_FILL),
                Bank::B => (Y_EXTENT, BANK_B_FILL),
            };
            LeafShape::new(
                i,
                bank,
                dicom_leaf_number(i),
                leaf_x_span(i),
                [edge, tip],
                fill,
                LEAF_OUTLINE,
            )
        })
        .collect();

    Ok(Geometry { axes, jaws, leaves })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn example_mlc() -> Vec<f64> {
        let mut mlc = vec![0.0; 80];
        mlc.extend(vec![50.0; 80]);
        mlc
    }

    #[test]
    fn test_primitive_counts() {
        let geometry = project_leaf_banks(&example_mlc(), &[100.0, -50.0]).unwrap();
        assert_eq!(geometry.leaves.len(), 160);
        assert_eq!(geometry.jaws.len(), 2);
        assert_eq!(geometry.axes.len(), 2);
        assert_eq!(geometry.primitive_count(), 164);
        assert_eq!(geometry.bank(Bank::A).count(), 80);
        assert_eq!(geometry.bank(Bank::B).count(), 80);
    }

    #[test]
    fn test_example_projection() {
        let geometry = project_leaf_banks(&example_mlc(), &[100.0, -50.0]).unwrap();

        assert_eq!(geometry.jaws[0].start.x, 10.0);
        assert_eq!(geometry.jaws[1].start.x, -5.0);
        assert_eq!(geometry.jaws[0].color, Color::RED);
        assert_eq!(geometry.jaws[1].color, Color::BLUE);

        let leaf_0 = &geometry.leaves[0];
        assert_eq!(leaf_0.y_span, [-200.0, 0.0]);
        assert_eq!(leaf_0.label, "Leaf 80");
        assert_eq!(leaf_0.fill, BANK_A_FILL);

        let leaf_80 = &geometry.leaves[80];
        assert_eq!(leaf_80.y_span, [200.0, 50.0]);
        assert_eq!(leaf_80.label, "Leaf 0");
        assert_eq!(leaf_80.fill, BANK_B_FILL);
    }

    #[test]
    fn test_label_cross_map_holds_for_every_leaf() {
        let geometry = project_leaf_banks(&example_mlc(), &[0.0, 0.0]).unwrap();
        for (i, leaf) in geometry.leaves.iter().enumerate() {
            let expected = if i < 80 { i + 80 } else { i - 80 };
            assert_eq!(leaf.dicom_leaf_number, expected);
            assert_eq!(leaf.label, format!("Leaf {}", expected));
        }
    }

    #[rstest]
    #[case(0, 80)]
    #[case(79, 159)]
    #[case(80, 0)]
    #[case(159, 79)]
    fn test_dicom_leaf_number(#[case] index: usize, #[case] expected: usize) {
        assert_eq!(dicom_leaf_number(index), expected);
    }

    #[test]
    fn test_opposing_banks_share_slots() {
        assert_eq!(leaf_x_span(3), leaf_x_span(83));
        let [x0, x1] = leaf_x_span(79);
        assert!((x0 - (-28.7 + 79.0 * 0.7175)).abs() < 1e-9);
        assert!((x1 - 28.7).abs() < 1e-9);
    }

    #[test]
    fn test_axes_span_view() {
        let geometry = project_leaf_banks(&example_mlc(), &[0.0, 0.0]).unwrap();
        let [horizontal, vertical] = geometry.axes;
        assert_eq!(horizontal.start.x, -28.7);
        assert_eq!(horizontal.end.x, 28.7);
        assert_eq!(vertical.start.y, -200.0);
        assert_eq!(vertical.end.y, 200.0);
    }

    #[rstest]
    #[case(159, 2)]
    #[case(161, 2)]
    #[case(160, 1)]
    #[case(160, 3)]
    #[case(0, 0)]
    fn test_invalid_input_is_rejected(#[case] mlc_len: usize, #[case] jaw_len: usize) {
        let result = project_leaf_banks(&vec![0.0; mlc_len], &vec![0.0; jaw_len]);
        assert!(matches!(result, Err(ExplorerError::InvalidGeometryInput(_))));
    }
}
