pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod service;

pub use error::{StoreError, StudentError};
pub use service::StudentService;
