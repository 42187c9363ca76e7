pub mod aggregate;
pub mod links;
pub mod offer;
