//! Leaf/jaw position unit conversion
//!
//! DICOM stores LeafJawPositions in tenths of the reporting unit. The beam's-eye
//! view keeps centimetres unrounded; the table export rounds.

/// Converts a raw position to centimetres (`raw / 10`)
pub fn to_centimeters(raw: f64) -> f64 {
    raw / 10.0
}

/// Converts a raw position to millimetres rounded to `decimals` places
pub fn to_millimeters_rounded(raw: f64, decimals: u32) -> f64 {
    round_to(raw / 10.0, decimals)
}

/// Rounds to a fixed number of decimal places
///
/// Rounds the exact binary value through correctly-rounded decimal formatting:
/// `-29.945` (stored just beyond the tie) becomes `-29.95`, exact ties go to even.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}
