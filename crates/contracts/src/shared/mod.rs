pub mod error;
pub mod handback;
pub mod logger;
pub mod money;
