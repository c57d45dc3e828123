//! Configuration types
//!
//! Thresholds and timing parameters for pose detection, plus the text and
//! binary forms they are loaded from.

pub mod crc;
#[cfg(feature = "serde")]
pub mod stored;
pub mod toml;
pub mod types;

pub use crc::{crc32, Crc32};
#[cfg(feature = "serde")]
pub use stored::{StoreError, StoredConfig};
pub use toml::{parse_config, ParseError};
pub use types::*;
