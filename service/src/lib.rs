pub mod authentication;
pub mod dto;
pub mod error;
pub mod mutation;
pub mod points;
pub mod query;
pub mod scoring;
pub mod standings;

pub use mutation::*;
pub use query::*;

pub use sea_orm;
