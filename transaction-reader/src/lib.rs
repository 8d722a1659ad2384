//! Retrieval endpoint for queued transaction candidates

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod routes;
pub mod server;
pub mod settings;
pub mod types;
