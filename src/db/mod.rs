//! Database module: the store interface and the actor that owns the store connection.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring `student` rows and write inputs/results
//! - `schema.rs`: SQL DDL for bootstrapping the table (SQLite and MySQL)
//! - `traits.rs`: `StudentStore`, the substitutable store interface
//! - `actor.rs`: `DbActor` and its `StudentStore` handle

pub mod actor;
pub mod models;
pub mod schema;
pub mod traits;

pub use actor::{DbActorArgs, DbActorHandle, spawn};
pub use models::{DbStudent, InsertOutcome, StudentFields};
pub use traits::StudentStore;
