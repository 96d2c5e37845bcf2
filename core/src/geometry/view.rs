use super::primitives::Color;
use super::projector::{Geometry, LEAF_WIDTH_CM, X_START_CM, Y_EXTENT};
use crate::types::LEAVES_PER_BANK;
use std::fmt;

/// One chart axis: title, visible range and tick spacing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Axis {
    pub title: &'static str,
    pub range: [f64; 2],
    pub tick: f64,
}

/// Fixed chart layout of the beam's-eye view
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ViewLayout {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub background: Color,
}

impl Default for ViewLayout {
    fn default() -> Self {
        Self {
            x_axis: Axis {
                title: "X Position (cm)",
                range: [
                    X_START_CM,
                    X_START_CM + LEAVES_PER_BANK as f64 * LEAF_WIDTH_CM,
                ],
                tick: LEAF_WIDTH_CM * 5.0,
            },
            y_axis: Axis {
                title: "Y Position (mm)",
                range: [-Y_EXTENT, Y_EXTENT],
                tick: 20.0,
            },
            background: Color::WHITE,
        }
    }
}

/// A titled, laid-out beam's-eye view ready for a chart renderer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BeamView {
    pub title: String,

    /// 0-based beam index
    pub beam_index: usize,

    /// Raw control point index
    pub control_point_index: usize,

    /// 1-based segment number of the control point
    pub segment: usize,

    pub layout: ViewLayout,
    pub geometry: Geometry,
}

impl BeamView {
    pub fn new(beam_index: usize, control_point_index: usize, geometry: Geometry) -> Self {
        let segment = crate::selection::segment_number(control_point_index);
        Self {
            title: format!(
                "Beam's Eye View: Beam {}, Control Point {}",
                beam_index + 1,
                segment
            ),
            beam_index,
            control_point_index,
            segment,
            layout: ViewLayout::default(),
            geometry,
        }
    }
}

/// Text listing of a beam view: jaws, then one line per leaf
impl fmt::Display for BeamView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        writeln!(f)?;
        writeln!(f, "Jaw 1 (cm): {}", self.geometry.jaws[0].start.x)?;
        writeln!(f, "Jaw 2 (cm): {}", self.geometry.jaws[1].start.x)?;
        writeln!(f)?;
        writeln!(f, "{:<9} {:<5} {:>18} {:>18}", "Label", "Bank", "X (cm)", "Y")?;
        for leaf in &self.geometry.leaves {
            writeln!(
                f,
                "{:<9} {:<5} {:>8.4}..{:<8.4} {:>8}..{:<8}",
                leaf.label, leaf.bank, leaf.x_span[0], leaf.x_span[1], leaf.y_span[0], leaf.y_span[1]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::project_leaf_banks;

    #[test]
    fn test_default_layout() {
        let layout = ViewLayout::default();
        assert_eq!(layout.x_axis.range[0], -28.7);
        assert!((layout.x_axis.range[1] - 28.7).abs() < 1e-9);
        assert!((layout.x_axis.tick - 3.5875).abs() < 1e-12);
        assert_eq!(layout.y_axis.range, [-200.0, 200.0]);
        assert_eq!(layout.y_axis.tick, 20.0);
    }

    #[test]
    fn test_title_uses_segment_number() {
        let geometry = project_leaf_banks(&[0.0; 160], &[0.0, 0.0]).unwrap();
        let view = BeamView::new(1, 5, geometry);
        assert_eq!(view.segment, 3);
        assert_eq!(view.title, "Beam's Eye View: Beam 2, Control Point 3");
    }

    #[test]
    fn test_text_listing() {
        let geometry = project_leaf_banks(&[0.0; 160], &[100.0, -50.0]).unwrap();
        let text = BeamView::new(0, 1, geometry).to_string();
        assert!(text.contains("Jaw 1 (cm): 10"));
        assert!(text.contains("Jaw 2 (cm): -5"));
        assert!(text.contains("Leaf 80"));
        assert_eq!(text.lines().filter(|l| l.starts_with("Leaf ")).count(), 160);
    }
}
