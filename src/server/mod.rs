//! HTTP surface.
//!
//! This module provides:
//! - Configuration types (`config`)
//! - The route table (`router`), with handlers under `routes`
//! - Parameter extraction (`params`) and error mapping (`error`)
//!
//! Handlers hand each command to a blocking worker thread; the async
//! runtime only moves bytes.

pub mod config;
mod error;
mod params;
mod router;
mod routes;
mod state;

pub use error::ApiError;
pub use params::RequestParams;
pub use router::router;
pub use state::AppState;
