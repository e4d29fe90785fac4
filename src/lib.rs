//! Client for the temp-mail backend API.
//!
//! `ApiClient` wraps a `reqwest::Client` bound to an explicit `AppState`
//! session: it injects the credential headers, toggles the loading flag and
//! raises auth dialogs on 401. The `api` submodules expose one function per
//! backend endpoint.

pub mod api;
pub mod commands;
pub mod config;
pub mod settings;
pub mod state;

pub use api::{ApiClient, ApiError, RequestOptions};
pub use config::ClientConfig;
pub use state::{AppState, Credentials};
