pub mod catalog;
pub mod seed;
pub mod store;
