//! CodeVF Client - HTTP binding for the CodeVF review API
//!
//! This crate owns the network side of the integration: API key and base URL
//! resolution, the reqwest client, and the task create/retrieve endpoints.
//! It implements [`codevf_core::TasksApi`] so the core stays network-free.
//! No retry/backoff lives here; failures propagate to the caller unmodified.

mod client;
mod error;
mod tasks;

pub use client::{ClientConfig, CodeVfClient, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{Error, Result};
