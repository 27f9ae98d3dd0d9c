//! Node configuration.
//!
//! Everything here is decided once at startup and never mutated: the DHT
//! wiring, and the optional pre-shared key for the encrypted transport.

use serde::{Deserialize, Serialize};

/// DHT sensor model selector.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DhtModel {
    #[default]
    Dht11,
    Dht22,
}

/// Wiring and model of the external DHT sensor.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DhtConfig {
    pub port: u8,
    pub pin: u8,
    pub model: DhtModel,
}

impl Default for DhtConfig {
    fn default() -> Self {
        Self {
            port: 0,
            pin: 31,
            model: DhtModel::Dht11,
        }
    }
}

/// Pre-shared key credential for the DTLS transport.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PskConfig<'a> {
    /// Credential slot in the host credential store.
    pub tag: u16,
    pub identity: &'a str,
    pub key: &'a str,
}

impl Default for PskConfig<'_> {
    fn default() -> Self {
        Self {
            tag: 10,
            identity: "Client_identity",
            key: "secretPSK",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(bound(deserialize = "'de: 'a"))]
pub struct Config<'a> {
    pub dht: DhtConfig,
    /// `None` runs the server over plain UDP.
    pub security: Option<PskConfig<'a>>,
}
