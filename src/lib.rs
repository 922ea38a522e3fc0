//! dashgate - HTTP front end for an adaptive-streaming transcoding pipeline
//!
//! This library crate exposes the server, configuration and pipeline client
//! for integration testing.

pub mod config;
pub mod pipeline;
pub mod server;
