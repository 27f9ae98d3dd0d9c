//! Hardware-independent core for thermo-node
//!
//! thermo-node is a small CoAP sensor node exposing three read-only
//! resources: the internal board temperature (`/internal_temp`), and the
//! temperature (`/external_temp`) and relative humidity (`/hum`) of an
//! external DHT11 sensor. This crate contains everything above the
//! hardware: the measurement model and fixed-point formatting, the sensor
//! port traits, the request handlers, and the bootstrap that wires the
//! resource table (and optionally a DTLS pre-shared key) into the host
//! CoAP stack.
//!
//! The CoAP message layer, DTLS, and the concrete sensor drivers are
//! reached through narrow port traits, so the crate compiles for embedded
//! targets and tests on the host.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod reading;
pub mod sensors;
pub mod server;
pub mod shell;

pub use config::{Config, DhtConfig, DhtModel, PskConfig};
pub use error::SensorError;
pub use reading::{FormattedReading, Measurement, Unit};
pub use server::{CoapServer, server_init};
