//! DHT11/DHT22 read path.
//!
//! The single-wire driver itself lives in the host environment; this
//! module initializes a device from the configured pin and model, waits a
//! fixed settle time, and performs exactly one blocking read. The settle
//! delay blocks the dispatch context, which is acceptable because the
//! host stack serves requests one at a time and nothing else is queued.

use embedded_hal::delay::DelayNs;

use crate::config::DhtConfig;
use crate::error::SensorError;
use crate::reading::{FormattedReading, format_deci};

/// Settle time before the read attempt, in milliseconds.
pub const DHT_SETTLE_MS: u32 = 1000;

/// Raw sample from the DHT driver: one implied decimal digit each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DhtSample {
    /// Temperature in tenths of a degree Celsius.
    pub temperature: i16,
    /// Relative humidity in tenths of a percent.
    pub humidity: i16,
}

/// An initialized DHT device, good for one blocking read.
pub trait DhtDevice {
    type Error;

    fn read(&mut self) -> Result<DhtSample, Self::Error>;
}

/// Host-side driver entry point: initializes a device by pin and model.
pub trait DhtBackend {
    type Device: DhtDevice;
    type Error;

    fn init(&mut self, config: &DhtConfig) -> Result<Self::Device, Self::Error>;
}

/// Initializes the DHT sensor, waits [`DHT_SETTLE_MS`], reads once, and
/// formats both values with one decimal digit.
///
/// Fails with [`SensorError::Init`] before any read is attempted when
/// initialization fails, and with [`SensorError::Read`] when the sample
/// fails.
pub fn read_dht<B, D>(
    backend: &mut B,
    delay: &mut D,
    config: &DhtConfig,
) -> Result<(FormattedReading, FormattedReading), SensorError>
where
    B: DhtBackend,
    D: DelayNs,
{
    let mut device = backend.init(config).map_err(|_| {
        log::warn!("DHT init failed on port {} pin {}", config.port, config.pin);
        SensorError::Init
    })?;

    delay.delay_ms(DHT_SETTLE_MS);

    let sample = device.read().map_err(|_| {
        log::warn!("DHT read failed");
        SensorError::Read
    })?;

    Ok((format_deci(sample.temperature), format_deci(sample.humidity)))
}

/// Reads the DHT sensor and returns only the temperature.
pub fn read_dht_temp<B, D>(
    backend: &mut B,
    delay: &mut D,
    config: &DhtConfig,
) -> Result<FormattedReading, SensorError>
where
    B: DhtBackend,
    D: DelayNs,
{
    read_dht(backend, delay, config).map(|(temperature, _)| temperature)
}

/// Reads the DHT sensor and returns only the humidity.
pub fn read_dht_hum<B, D>(
    backend: &mut B,
    delay: &mut D,
    config: &DhtConfig,
) -> Result<FormattedReading, SensorError>
where
    B: DhtBackend,
    D: DelayNs,
{
    read_dht(backend, delay, config).map(|(_, humidity)| humidity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::{CheckedDelay, NoopDelay, Transaction as DelayTx};

    struct FakeDevice {
        sample: Result<DhtSample, ()>,
    }

    impl DhtDevice for FakeDevice {
        type Error = ();

        fn read(&mut self) -> Result<DhtSample, ()> {
            self.sample
        }
    }

    struct FakeBackend {
        init_ok: bool,
        sample: Result<DhtSample, ()>,
        init_calls: usize,
    }

    impl FakeBackend {
        fn new(init_ok: bool, sample: Result<DhtSample, ()>) -> Self {
            Self {
                init_ok,
                sample,
                init_calls: 0,
            }
        }
    }

    impl DhtBackend for FakeBackend {
        type Device = FakeDevice;
        type Error = ();

        fn init(&mut self, _config: &DhtConfig) -> Result<FakeDevice, ()> {
            self.init_calls += 1;
            if self.init_ok {
                Ok(FakeDevice {
                    sample: self.sample,
                })
            } else {
                Err(())
            }
        }
    }

    #[test]
    fn settles_then_reads_once() {
        let mut backend = FakeBackend::new(
            true,
            Ok(DhtSample {
                temperature: 235,
                humidity: 605,
            }),
        );
        let mut delay = CheckedDelay::new(&[DelayTx::delay_ms(DHT_SETTLE_MS)]);

        let (temperature, humidity) =
            read_dht(&mut backend, &mut delay, &DhtConfig::default()).unwrap();
        assert_eq!(temperature.as_str(), "23.5");
        assert_eq!(humidity.as_str(), "60.5");
        assert_eq!(backend.init_calls, 1);

        delay.done();
    }

    #[test]
    fn init_failure_skips_the_read_and_the_delay() {
        let mut backend = FakeBackend::new(false, Ok(DhtSample {
            temperature: 0,
            humidity: 0,
        }));
        // No delay transactions expected: init fails first.
        let mut delay = CheckedDelay::new(&[]);

        assert_eq!(
            read_dht(&mut backend, &mut delay, &DhtConfig::default()),
            Err(SensorError::Init)
        );

        delay.done();
    }

    #[test]
    fn read_failure_is_reported() {
        let mut backend = FakeBackend::new(true, Err(()));
        assert_eq!(
            read_dht(&mut backend, &mut NoopDelay, &DhtConfig::default()),
            Err(SensorError::Read)
        );
    }

    #[test]
    fn accessors_pick_one_value_each() {
        let sample = Ok(DhtSample {
            temperature: -15,
            humidity: 421,
        });

        let mut backend = FakeBackend::new(true, sample);
        let temperature =
            read_dht_temp(&mut backend, &mut NoopDelay, &DhtConfig::default()).unwrap();
        assert_eq!(temperature.as_str(), "-1.5");

        let mut backend = FakeBackend::new(true, sample);
        let humidity = read_dht_hum(&mut backend, &mut NoopDelay, &DhtConfig::default()).unwrap();
        assert_eq!(humidity.as_str(), "42.1");
    }

    #[test]
    fn both_accessors_fail_when_the_read_fails() {
        let mut backend = FakeBackend::new(true, Err(()));
        assert!(read_dht_temp(&mut backend, &mut NoopDelay, &DhtConfig::default()).is_err());

        let mut backend = FakeBackend::new(true, Err(()));
        assert!(read_dht_hum(&mut backend, &mut NoopDelay, &DhtConfig::default()).is_err());
    }
}
