//! Axum-based HTTP server implementation for the sdapi-venice bridge.
//!
//! This module sets up the HTTP server that speaks the Stable Diffusion WebUI
//! `/sdapi/v1` API and bridges each call to the Venice image API.
//!
//! # Components
//!
//! - `handlers`: Implementation of the individual `/sdapi/v1` endpoints.
//! - `routes`: The router configuration, request ID and trace layers, and the
//!   shared `AppState`.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod routes;

pub use routes::{create_router, AppState};
