pub mod aggregate;
pub mod search;
pub mod summary;
