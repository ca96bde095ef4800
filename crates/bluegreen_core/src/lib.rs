//! Core identity, chaos and alerting logic for the blue/green status service.

pub mod alerting;
pub mod chaos;
pub mod identity;
pub mod report;

pub use chaos::{ChaosKind, ChaosSnapshot, ChaosState, VersionFault};
pub use identity::Identity;
