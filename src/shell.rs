//! Debug shell commands.
//!
//! Two ad-hoc commands for poking the sensors from the console. The host
//! environment owns the interactive loop and line parsing; these
//! functions just render into whatever sink it hands over.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;

use crate::config::DhtConfig;
use crate::sensors::dht::{DhtBackend, read_dht};
use crate::sensors::{SensorRegistry, read_internal_temperature};

pub struct ShellCommand {
    pub name: &'static str,
    pub help: &'static str,
}

pub const SHELL_COMMANDS: [ShellCommand; 2] = [
    ShellCommand {
        name: "saul",
        help: "print the internal temperature sensor",
    },
    ShellCommand {
        name: "dht",
        help: "print the DHT sensor values",
    },
];

/// `saul`: prints the internal board temperature.
pub fn cmd_internal_temp<R, W>(registry: &mut R, out: &mut W) -> fmt::Result
where
    R: SensorRegistry,
    W: Write,
{
    match read_internal_temperature(registry) {
        Ok(reading) => writeln!(out, "temperature: {reading}"),
        Err(err) => writeln!(out, "internal temperature unavailable: {err}"),
    }
}

/// `dht`: prints the DHT temperature and humidity.
pub fn cmd_dht<B, D, W>(
    backend: &mut B,
    delay: &mut D,
    config: &DhtConfig,
    out: &mut W,
) -> fmt::Result
where
    B: DhtBackend,
    D: DelayNs,
    W: Write,
{
    match read_dht(backend, delay, config) {
        Ok((temperature, humidity)) => {
            writeln!(
                out,
                "temperature: {temperature} \u{b0}C, humidity: {humidity} %"
            )
        }
        Err(err) => writeln!(out, "DHT sensor unavailable: {err}"),
    }
}
