//! # AEP Relay Library
//!
//! Receives inbound event payloads over HTTP, authenticates against Adobe
//! IMS with the OAuth2 client-credentials grant, and forwards the payloads
//! to an Adobe Experience Platform ingestion endpoint, retrying exactly
//! once when the access token expired mid-flight.
//!
//! Modules:
//! - `config`: credentials and server settings
//! - `cache`: access-token cache with expiry-aware refresh
//! - `sources`: IMS token issuer
//! - `sinks`: AEP forwarder with the one-shot 401 retry
//! - `server`: the HTTP ingest surface standing in for the invocation trigger

pub mod cache;
pub mod config;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod server;
pub mod sinks;
pub mod sources;
pub mod tests;
pub mod utils;

pub use crate::error::RelayError;
