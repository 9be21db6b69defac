//! Client for the Garoon REST API using the `X-Cybozu-Authorization` header.

pub mod client;
pub mod error;
pub mod models;

pub use client::GaroonClient;
pub use error::GaroonError;
