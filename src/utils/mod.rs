pub mod error;
pub mod outcome;
pub mod password;
pub mod response;

pub use error::StoreError;
pub use outcome::{Failure, Outcome, Status};
