//! Typed HTTP client for the blog platform admin API.

mod client;
mod error;

pub use client::{ApiClient, ApiRequest};
pub use error::RequestError;
