//! Request handlers for the advisor API.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the process store and the core domain crates and
//! map errors via [`AppError`](crate::error::AppError).

pub mod alerts;
pub mod analytics;
pub mod evaluation;
pub mod feeds;
pub mod readings;
pub mod recommendations;
