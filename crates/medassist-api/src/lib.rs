//! medassist-api: wire contract for the medical dialogue backend
//!
//! This crate provides the request/response types exchanged with the backend
//! reasoning service and an HTTP client for its dialogue and image endpoints.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DialogueClient, Endpoints};
pub use error::{Error, Result};
pub use types::*;
