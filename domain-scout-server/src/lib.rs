//! Application library for the domain-scout HTTP server.
//!
//! Exposes the API router and state wiring so integration tests can drive
//! the service in-process.

pub mod api;
