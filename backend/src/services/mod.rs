//! Business logic services for the perfume backoffice

pub mod catalog;
pub mod inventory;
pub mod pricing;
pub mod rate_cache;

pub use catalog::CatalogService;
pub use inventory::InventoryService;
pub use pricing::PricingService;
pub use rate_cache::RateCache;
