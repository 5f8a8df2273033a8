//! # evercam-core
//!
//! Core request/response machinery for the Evercam camera-management API.
//!
//! This crate turns a logical API operation (path suffix, verb, parameters) into
//! an HTTP exchange and turns the reply into either parsed JSON or an
//! [`ApiError`]. Resource-specific operations live in the `evercam` crate and
//! only ever talk to [`ApiClient::execute`], [`ApiClient::interpret`] and
//! [`ApiClient::interpret_raw`].
//!
//! ## Modules
//!
//! - [`error`] - The unified [`ApiError`] type
//! - [`config`] - Client configuration and defaults
//! - [`logger`] - Injected logging collaborator
//! - [`query`] - Request parameter builder
//! - [`types`] - HTTP verbs and response envelopes
//! - [`client`] - The request pipeline
//! - [`response`] - The response interpreter

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod query;
pub mod response;
pub mod types;

// Re-export commonly used types
pub use client::{ApiClient, ApiClientBuilder};
pub use config::EvercamConfig;
pub use error::{ApiError, Result};
pub use logger::{NullLogger, RequestLogger, TracingLogger};
pub use query::Params;
pub use response::ResponseInterpreter;
pub use types::{ResponseEnvelope, Verb};
