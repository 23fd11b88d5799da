//! Things catalog HTTP service

#![deny(clippy::all, clippy::pedantic, clippy::nursery, missing_docs, dead_code)]

/// Image validation and object storage
pub mod image_storage;

/// HTTP routes
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Admin password gate and session tokens
pub mod session;

/// Injected services
pub mod state;

/// Configuration, errors, extractors
pub mod types;
