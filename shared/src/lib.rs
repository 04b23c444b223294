//! Shared types and models for the Store Inventory Analytics platform
//!
//! This crate contains the data model shared between the analytics engine,
//! the backend host, and the browser client (via WASM).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
