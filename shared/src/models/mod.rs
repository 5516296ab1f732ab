//! Domain models for the perfume backoffice

mod inventory;
mod margin;
mod rates;
mod supply;

pub use inventory::*;
pub use margin::*;
pub use rates::*;
pub use supply::*;
