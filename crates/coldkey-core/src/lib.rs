pub mod error;
pub mod types;

pub use error::{ColdkeyError, ColdkeyResult};
pub use types::Network;
