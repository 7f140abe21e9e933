//! DigitalOcean API client.
//!
//! Handlers talk to the API through the [`CloudApi`] trait so they can be
//! exercised without network access. [`DigitalOceanClient`] is the real,
//! token-authenticated implementation.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use client::{CloudApi, DigitalOceanClient};
pub use error::ApiError;
