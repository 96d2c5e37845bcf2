pub mod devices;
pub mod plan;
pub mod tags;

pub use devices::{locate_devices, DeviceLookup, DevicePositions};
pub use plan::read_plan;
pub use tags::*;
