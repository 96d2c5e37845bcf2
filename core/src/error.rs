use thiserror::Error;

/// Result type for mlcexplorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Error types for mlcexplorer operations
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Tag not found in DICOM file
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// Control point carries no BeamLimitingDevicePositionSequence
    #[error("Control point does not contain 'BeamLimitingDevicePositionSequence'")]
    MissingDeviceSequence,

    /// Device sequence present but ASYMX and/or MLCY records are absent
    #[error("Could not find the required device positions in the control point (missing {missing})")]
    IncompleteDeviceData { missing: String },

    /// Leaf or jaw arrays of the wrong shape handed to projection
    #[error("Invalid geometry input: {0}")]
    InvalidGeometryInput(String),

    /// No odd-indexed control point with device data in a beam
    #[error("No valid odd-indexed control points with 'BeamLimitingDevicePositionSequence' found in beam {}", .beam + 1)]
    NoVisualizableSegments { beam: usize },

    /// Fraction group has no meterset for this beam
    #[error("No fraction group beam meterset referenced for beam {}", .beam + 1)]
    BeamLookupFailure { beam: usize },

    /// Attribute required for a table row is absent
    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    /// Beam, control point or segment selection outside the plan
    #[error("{kind} {index} out of range (available: {available})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        available: usize,
    },

    /// Workbook could not be built or saved
    #[error("Workbook error: {0}")]
    WorkbookError(#[from] rust_xlsxwriter::XlsxError),

    /// CSV sheet could not be written
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExplorerError {
    /// Whether this error only means a single control point has nothing to offer
    ///
    /// Structural absences are advisories; everything else aborts the request.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            ExplorerError::MissingDeviceSequence
                | ExplorerError::IncompleteDeviceData { .. }
                | ExplorerError::MissingAttribute(_)
        )
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for ExplorerError {
    fn from(e: dicom_object::ReadError) -> Self {
        ExplorerError::DicomError(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for ExplorerError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        ExplorerError::InvalidValue(format!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_one_based_beam_numbers() {
        let err = ExplorerError::NoVisualizableSegments { beam: 0 };
        assert!(err.to_string().ends_with("beam 1"));

        let err = ExplorerError::BeamLookupFailure { beam: 2 };
        assert!(err.to_string().ends_with("beam 3"));
    }

    #[test]
    fn test_advisory_classification() {
        assert!(ExplorerError::MissingDeviceSequence.is_advisory());
        assert!(ExplorerError::IncompleteDeviceData {
            missing: "MLCY".to_string()
        }
        .is_advisory());
        assert!(!ExplorerError::InvalidGeometryInput("short".to_string()).is_advisory());
        assert!(!ExplorerError::BeamLookupFailure { beam: 0 }.is_advisory());
    }
}
