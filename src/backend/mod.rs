//! Knowledge-base backend access.
//!
//! [`payload`] shapes the JSON bodies the backend expects; [`client`] sends
//! them and decodes responses.

pub mod client;
pub mod payload;

pub use client::BackendClient;
pub use payload::{QueryArgs, QueryPayload, RetrieveArgs, RetrievePayload};
