//! HTTP and WebSocket surface of the alloy advisor.
//!
//! Everything the binary wires together lives here as a library so the
//! integration tests can assemble the identical router and drive it
//! in-process.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
