pub mod error;
pub mod storage;

pub use error::*;
pub use storage::*;
