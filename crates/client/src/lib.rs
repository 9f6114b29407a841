//! Typed client for the research group site API.
//!
//! [`LabClient`] keeps one short-lived list cache per entity type so that
//! repeated reads within a few seconds do not hit the network, and reconciles
//! those caches locally after every successful mutation.

pub mod client;
pub mod error;
pub mod resource;
pub mod transport;

pub use client::LabClient;
pub use error::ClientError;
pub use resource::{Keyed, Resource, FRESHNESS_WINDOW};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
