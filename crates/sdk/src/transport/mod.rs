//! Transport layer for the Folo SDK.

pub mod http;
pub mod query;

pub use http::{ApiResponse, HttpTransport};
