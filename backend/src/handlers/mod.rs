//! HTTP request handlers

pub mod catalog;
pub mod health;
pub mod inventory;
pub mod margin;
pub mod rates;

pub use catalog::*;
pub use health::*;
pub use inventory::*;
pub use margin::*;
pub use rates::*;
