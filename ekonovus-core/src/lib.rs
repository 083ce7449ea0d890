//! Core types and service wiring for the ekonovus waste collection schedule lookup.

/// Domain models shared by the provider and its clients.
pub mod model;
/// Traits describing the provider interfaces.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;

pub use model::*;
pub use ports::*;
pub use service::*;
