//! Infrastructure adapters and services for the blue/green status service.

#[path = "../config/mod.rs"]
pub mod config;
pub mod http;
pub mod telemetry;
pub mod watcher;

pub use http::{AppState, build_router};
