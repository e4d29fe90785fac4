//! API client module for the temp-mail backend.
//!
//! Provides the HTTP client with auth header injection and the named
//! endpoint wrappers for settings, user and admin operations.

pub mod admin;
pub mod client;
pub mod settings;
pub mod types;
pub mod user;

pub use client::{ApiClient, ApiError, RequestOptions};
