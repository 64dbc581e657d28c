//! Axum-based HTTP server implementation for the analysis gateway.
//!
//! This module is responsible for setting up the HTTP server, configuring
//! routes and handling incoming requests from upload clients. It bridges
//! those requests to the Google Gemini vision API.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual API endpoints (generate, health).
//! - `middleware`: CORS and request ID layers.
//! - `routes`: The main router configuration that ties everything together.

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
