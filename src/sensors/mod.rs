//! Sensor port traits and the registry read path.
//!
//! The host environment owns the actual devices; this crate only borrows
//! them through these traits for the duration of one read call. The
//! registry mirrors a capability-tagged device table: handlers ask for
//! "the first temperature-class device" rather than a concrete driver.

pub mod dht;

use crate::error::SensorError;
use crate::reading::{FormattedReading, Measurement};

/// Capability tag used to look devices up in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SenseClass {
    Temperature,
    Humidity,
}

/// One registry device: reads a single sample.
pub trait Sensor {
    type Error;

    fn read(&mut self) -> Result<Measurement, Self::Error>;
}

/// Capability-tagged device table provided by the host environment.
pub trait SensorRegistry {
    type Device: Sensor;

    /// Returns the first registered device of the given class, if any.
    fn find(&mut self, class: SenseClass) -> Option<&mut Self::Device>;
}

/// Reads the internal board temperature and formats it.
///
/// Fails with [`SensorError::NotFound`] when no temperature-class device
/// is registered and [`SensorError::Read`] when the sample fails.
pub fn read_internal_temperature<R: SensorRegistry>(
    registry: &mut R,
) -> Result<FormattedReading, SensorError> {
    let device = registry
        .find(SenseClass::Temperature)
        .ok_or(SensorError::NotFound)?;
    let sample = device.read().map_err(|_| {
        log::warn!("internal temperature sensor read failed");
        SensorError::Read
    })?;
    Ok(sample.format())
}
