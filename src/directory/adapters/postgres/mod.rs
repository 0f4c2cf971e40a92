//! `PostgreSQL` adapters for user directory consultation.

mod models;
mod repository;
mod schema;

pub use repository::{DirectoryPgPool, PostgresUserDirectory};
