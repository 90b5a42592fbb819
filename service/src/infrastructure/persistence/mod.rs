pub mod memory;
pub mod query;
pub mod repository;
pub mod schema;
