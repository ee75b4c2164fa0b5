//! Configuration types
//!
//! The persisted system and output records, their factory defaults, the
//! calibration transform and the instrument's capability limits.

pub mod calibration;
pub mod limits;
#[cfg(feature = "serde")]
pub mod record;
pub mod types;

pub use calibration::{fixed_milli, FIXED_SHIFT};
pub use limits::{Limits, RangeError, LIMITS};
pub use types::*;
