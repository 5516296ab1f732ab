//! Shared types and pricing logic for the perfume backoffice
//!
//! This crate holds the pure calculations used by both the backend and the
//! browser (via WASM): currency formatting, price rounding, the low-stock
//! policy and the margin calculator.

pub mod error;
pub mod format;
pub mod models;
pub mod rounding;
pub mod types;
pub mod validation;

pub use error::*;
pub use format::*;
pub use models::*;
pub use rounding::*;
pub use types::*;
pub use validation::*;
