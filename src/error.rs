//! Sensor-layer error taxonomy.

use thiserror_no_std::Error;

/// Errors from the sensor layer.
///
/// Handlers collapse every variant into a single Service Unavailable
/// response; the detail only ever reaches the log.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No device with the requested capability is registered.
    #[error("no matching sensor device registered")]
    NotFound,
    /// Device initialization failed; no read was attempted.
    #[error("sensor initialization failed")]
    Init,
    /// Device is present but the sample could not be obtained.
    #[error("sensor read failed")]
    Read,
}
