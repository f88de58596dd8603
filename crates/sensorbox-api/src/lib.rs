// sensorbox-api: Async Rust client for the telemetry registry REST API

pub mod client;
pub mod devices;
pub mod error;
pub mod organisations;
pub mod topics;
pub mod transport;
pub mod types;
pub mod users;

pub use client::RegistryClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
