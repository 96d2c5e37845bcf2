use std::fmt;

/// RT beam limiting device type (300A,00B8)
///
/// Only [`DeviceType::AsymX`] (jaw pair) and [`DeviceType::MlcY`] (leaf bank)
/// feed the projection and the table export; the rest are carried so that a
/// control point's records can be reported faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum DeviceType {
    X,
    Y,
    AsymX,
    AsymY,
    MlcX,
    MlcY,
    Other(String),
}

impl DeviceType {
    /// Returns the DICOM code string
    pub fn code(&self) -> &str {
        match self {
            DeviceType::X => "X",
            DeviceType::Y => "Y",
            DeviceType::AsymX => "ASYMX",
            DeviceType::AsymY => "ASYMY",
            DeviceType::MlcX => "MLCX",
            DeviceType::MlcY => "MLCY",
            DeviceType::Other(code) => code,
        }
    }

    /// Parses a device type from its code string
    ///
    /// Matching is exact after trimming; DICOM CS values are upper case.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "X" => DeviceType::X,
            "Y" => DeviceType::Y,
            "ASYMX" => DeviceType::AsymX,
            "ASYMY" => DeviceType::AsymY,
            "MLCX" => DeviceType::MlcX,
            "MLCY" => DeviceType::MlcY,
            other => DeviceType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One of the two opposing MLC leaf banks
///
/// Bank A holds raw array indices 0..80 and is drawn up from the bottom edge;
/// bank B holds 80..160 and is drawn down from the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum Bank {
    A,
    B,
}

impl Bank {
    /// Bank that owns a raw leaf index
    pub fn of_leaf(index: usize) -> Self {
        if index < crate::types::LEAVES_PER_BANK {
            Bank::A
        } else {
            Bank::B
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Bank::A => "a",
            Bank::B => "b",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.simple_name())
    }
}
