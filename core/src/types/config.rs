/// Device serial written into every exported column
pub const DEFAULT_DEVICE_SERIAL: &str = "600074";

/// Leaf width literal written into every exported column
pub const DEFAULT_EXPORT_LEAF_WIDTH: f64 = 0.7;

/// Configuration for the per-beam table export
///
/// The defaults are the literals expected by the downstream machine import.
///
/// # Example
///
/// ```
/// use mlcexplorer_core::ExportConfig;
///
/// let config = ExportConfig::default().with_device_serial("600123");
///
/// assert_eq!(config.device_serial, "600123");
/// assert_eq!(config.leaf_width, 0.7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ExportConfig {
    /// Treatment device serial number
    pub device_serial: String,

    /// Leaf width value placed in the leaf-width row
    pub leaf_width: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            device_serial: DEFAULT_DEVICE_SERIAL.to_string(),
            leaf_width: DEFAULT_EXPORT_LEAF_WIDTH,
        }
    }
}

impl ExportConfig {
    /// Builder: Set the device serial
    pub fn with_device_serial(mut self, serial: impl Into<String>) -> Self {
        self.device_serial = serial.into();
        self
    }

    /// Builder: Set the leaf width literal
    ///
    /// # Example
    ///
    /// ```
    /// use mlcexplorer_core::ExportConfig;
    ///
    /// let config = ExportConfig::default().with_leaf_width(0.5);
    /// assert_eq!(config.leaf_width, 0.5);
    /// ```
    pub fn with_leaf_width(mut self, leaf_width: f64) -> Self {
        self.leaf_width = leaf_width;
        self
    }
}
