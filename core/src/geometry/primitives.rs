use crate::types::Bank;
use std::fmt;

/// A point in the beam's-eye-view frame (x in cm, y in the raw leaf unit)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// RGBA colour; alpha in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

// Chart collaborators take CSS colour strings
#[cfg(feature = "json")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A straight stroke between two points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub width: f64,
}

impl Line {
    /// Vertical line at `x` between `y0` and `y1`
    pub fn vertical(x: f64, y0: f64, y1: f64, color: Color, width: f64) -> Self {
        Self {
            start: Point::new(x, y0),
            end: Point::new(x, y1),
            color,
            width,
        }
    }

    /// Horizontal line at `y` between `x0` and `x1`
    pub fn horizontal(y: f64, x0: f64, x1: f64, color: Color, width: f64) -> Self {
        Self {
            start: Point::new(x0, y),
            end: Point::new(x1, y),
            color,
            width,
        }
    }
}

/// One MLC leaf drawn as a filled, closed rectangle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct LeafShape {
    /// Index into the raw 160-entry MLCY array
    pub leaf_index: usize,

    pub bank: Bank,

    /// Physical DICOM leaf number shown on hover
    pub dicom_leaf_number: usize,

    /// Hover label, `"Leaf {dicom_leaf_number}"`
    pub label: String,

    /// `[x0, x1]` in centimetres
    pub x_span: [f64; 2],

    /// `[y0, y1]`: y0 is the bank edge, y1 the leaf tip
    pub y_span: [f64; 2],

    /// Closed outline `(x0,y0) (x1,y0) (x1,y1) (x0,y1) (x0,y0)`
    pub polygon: [Point; 5],

    pub fill: Color,
    pub outline: Color,
}

impl LeafShape {
    pub(crate) fn new(
        leaf_index: usize,
        bank: Bank,
        dicom_leaf_number: usize,
        x_span: [f64; 2],
        y_span: [f64; 2],
        fill: Color,
        outline: Color,
    ) -> Self {
        let [x0, x1] = x_span;
        let [y0, y1] = y_span;
        Self {
            leaf_index,
            bank,
            dicom_leaf_number,
            label: format!("Leaf {}", dicom_leaf_number),
            x_span,
            y_span,
            polygon: [
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
                Point::new(x0, y0),
            ],
            fill,
            outline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_display() {
        assert_eq!(Color::RED.to_string(), "rgba(255, 0, 0, 1)");
        assert_eq!(
            Color::rgba(128, 0, 128, 0.5).to_string(),
            "rgba(128, 0, 128, 0.5)"
        );
    }

    #[test]
    fn test_leaf_polygon_is_closed() {
        let leaf = LeafShape::new(
            0,
            Bank::A,
            80,
            [-28.7, -27.9825],
            [-200.0, 0.0],
            Color::RED,
            Color::BLUE,
        );
        assert_eq!(leaf.polygon[0], leaf.polygon[4]);
        assert_eq!(leaf.polygon[2], Point::new(-27.9825, 0.0));
        assert_eq!(leaf.label, "Leaf 80");
    }
}
