//! `PostgreSQL` adapters for task persistence.
//!
//! Claims are written with a conditional `UPDATE` that only matches rows
//! whose `assignee_email` is still null.

mod models;
mod repository;
mod schema;


pub use repository::{PostgresTaskRepository, TaskPgPool};
