pub mod audit;
pub mod backend;
pub mod error;
pub mod id;
