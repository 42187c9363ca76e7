pub mod aggregate;
pub mod offer_catalog;
