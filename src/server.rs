//! CoAP resources, request handlers, and bootstrap.
//!
//! The host CoAP stack owns message parsing, retransmission, and DTLS; it
//! is reached through the [`ResponseWriter`], [`CoapStack`], and
//! [`CredentialStore`] ports. This module contributes the fixed resource
//! table, the three stateless GET handlers, and the one-shot bootstrap
//! that registers the table and optionally installs a PSK credential.

use embedded_hal::delay::DelayNs;
use thiserror_no_std::Error;

use crate::config::{Config, PskConfig};
use crate::error::SensorError;
use crate::reading::FormattedReading;
use crate::sensors::dht::{DhtBackend, read_dht_hum, read_dht_temp};
use crate::sensors::{SensorRegistry, read_internal_temperature};

pub const INTERNAL_TEMP_PATH: &str = "/internal_temp";
pub const EXTERNAL_TEMP_PATH: &str = "/external_temp";
pub const HUMIDITY_PATH: &str = "/hum";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Response status, host-stack flavored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseCode {
    /// 2.05 Content.
    Content,
    /// 5.03 Service Unavailable.
    ServiceUnavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentFormat {
    Text,
}

/// One entry in the listener table.
#[derive(Debug)]
pub struct Resource {
    pub path: &'static str,
    pub method: Method,
}

/// The node's complete resource surface. Immutable, registered once.
pub const RESOURCES: [Resource; 3] = [
    Resource {
        path: INTERNAL_TEMP_PATH,
        method: Method::Get,
    },
    Resource {
        path: EXTERNAL_TEMP_PATH,
        method: Method::Get,
    },
    Resource {
        path: HUMIDITY_PATH,
        method: Method::Get,
    },
];

/// Response surface of the host stack for a single in-flight exchange.
pub trait ResponseWriter {
    fn init_response(&mut self, code: ResponseCode);
    fn set_content_format(&mut self, format: ContentFormat);
    /// Finalizes the header section and returns the bytes written so far.
    fn finish_headers(&mut self) -> usize;
    /// Appends payload bytes; returns how many were written.
    fn write_payload(&mut self, payload: &[u8]) -> usize;
    /// Sends a header-only response with the given status.
    fn send_status(&mut self, code: ResponseCode) -> usize;
}

/// Errors from the host credential store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// The credential is already registered. Not a failure at bootstrap.
    #[error("credential already registered")]
    Exists,
    #[error("credential rejected by the store")]
    Rejected,
}

/// Credential store of the encrypted transport.
pub trait CredentialStore {
    fn add_credential(&mut self, credential: &PskConfig<'_>) -> Result<(), CredentialError>;
    fn bind_to_transport(&mut self, tag: u16) -> Result<(), CredentialError>;
}

/// Listener-registration surface of the host stack.
pub trait CoapStack {
    type Security: CredentialStore;

    fn register_listener(&mut self, resources: &'static [Resource]);

    /// The transport's credential store, when DTLS is compiled in.
    fn security(&mut self) -> Option<&mut Self::Security>;
}

/// Registers the resource table with the host stack, installing the PSK
/// credential first when one is configured. Called exactly once at
/// startup.
///
/// Credential trouble never aborts bootstrap: a duplicate registration
/// counts as success, and any other store error is logged and the node
/// keeps serving, possibly unencrypted.
pub fn server_init<S: CoapStack>(stack: &mut S, security: Option<&PskConfig<'_>>) {
    if let Some(psk) = security {
        match stack.security() {
            Some(store) => install_credential(store, psk),
            None => log::warn!("PSK configured but the transport has no credential store"),
        }
    }
    stack.register_listener(&RESOURCES);
}

fn install_credential<C: CredentialStore>(store: &mut C, psk: &PskConfig<'_>) {
    match store.add_credential(psk) {
        Ok(()) | Err(CredentialError::Exists) => {
            if let Err(err) = store.bind_to_transport(psk.tag) {
                log::warn!("cannot bind credential {} to the transport: {err}", psk.tag);
            }
        }
        Err(err) => {
            log::warn!("cannot add credential {}: {err}", psk.tag);
        }
    }
}

/// Request dispatcher bundling the sensor ports behind the three
/// resources. The host stack hands each matched request to
/// [`CoapServer::handle`] on its own processing context, one at a time.
pub struct CoapServer<'a, R, B, D> {
    registry: R,
    dht: B,
    delay: D,
    config: Config<'a>,
}

impl<'a, R, B, D> CoapServer<'a, R, B, D>
where
    R: SensorRegistry,
    B: DhtBackend,
    D: DelayNs,
{
    pub fn new(registry: R, dht: B, delay: D, config: Config<'a>) -> Self {
        Self {
            registry,
            dht,
            delay,
            config,
        }
    }

    /// Serves one request. Returns the total response length, or `None`
    /// when the path/method pair is not in the resource table (the host
    /// stack produces the error response in that case).
    pub fn handle<W: ResponseWriter>(
        &mut self,
        path: &str,
        method: Method,
        response: &mut W,
    ) -> Option<usize> {
        let resource = RESOURCES
            .iter()
            .find(|r| r.path == path && r.method == method)?;

        let result = match resource.path {
            INTERNAL_TEMP_PATH => read_internal_temperature(&mut self.registry),
            EXTERNAL_TEMP_PATH => read_dht_temp(&mut self.dht, &mut self.delay, &self.config.dht),
            HUMIDITY_PATH => read_dht_hum(&mut self.dht, &mut self.delay, &self.config.dht),
            _ => return None,
        };

        Some(respond(resource.path, result, response))
    }
}

/// Collapses the two-outcome handler contract: Content with the formatted
/// reading as payload, or Service Unavailable with an empty body. The
/// payload length is the formatted string's actual length, never the
/// backing buffer size.
fn respond<W: ResponseWriter>(
    path: &str,
    result: Result<FormattedReading, SensorError>,
    response: &mut W,
) -> usize {
    match result {
        Ok(reading) => {
            log::info!("GET {path}: {reading}");
            response.init_response(ResponseCode::Content);
            response.set_content_format(ContentFormat::Text);
            let header_len = response.finish_headers();
            header_len + response.write_payload(reading.as_bytes())
        }
        Err(err) => {
            log::warn!("GET {path} unavailable: {err}");
            response.send_status(ResponseCode::ServiceUnavailable)
        }
    }
}
