mod store;
mod student;

pub use store::StoreError;
pub use student::{ApiErrorBody, StoreOp, StudentError};
