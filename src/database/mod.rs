pub mod manager;
pub mod models;
pub mod repository;
pub mod schema;

pub use manager::{Database, DatabaseError};
pub use repository::{Entity, Repository};
