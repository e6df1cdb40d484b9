pub mod constants;
mod error;
mod types;
pub mod util;

pub use constants::*;
pub use error::{ErrorCode, Result, TrackerError};
pub use types::ReferenceNumber;
pub use util::time::now_millis;
