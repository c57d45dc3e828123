//! Stored configuration
//!
//! Wraps a `PoseConfig` with a magic number, format version and CRC so it
//! can be kept in flash or a settings blob and rejected if it is stale or
//! corrupted. Encoded with postcard.

use serde::{Deserialize, Serialize};

use super::crc::Crc32;
use super::types::{ConfigError, PoseConfig};

/// Magic number to identify stored pose configuration
pub const CONFIG_MAGIC: u32 = 0x504F5345; // "POSE"

/// Current stored config version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound on the encoded size (postcard varints included)
pub const MAX_STORED_SIZE: usize = 32;

/// Errors reading or writing a stored configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Output buffer too small
    BufferTooSmall,
    /// Bytes are not a postcard-encoded `StoredConfig`
    Deserialize,
    /// Magic number mismatch
    BadMagic,
    /// Written by a different format version
    VersionMismatch,
    /// CRC mismatch
    Corrupted,
    /// Contents decoded but failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for StoreError {
    fn from(e: ConfigError) -> Self {
        StoreError::Invalid(e)
    }
}

/// Persistable pose configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoredConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Format version
    pub version: u8,
    /// Wrapped configuration
    pub config: PoseConfig,
    /// CRC32 over magic, version and config fields
    pub crc: u32,
}

impl StoredConfig {
    /// Wrap a configuration with the current magic, version and CRC
    pub fn new(config: PoseConfig) -> Self {
        let mut stored = Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            config,
            crc: 0,
        };
        stored.update_crc();
        stored
    }

    /// Calculate CRC32 for the data (excluding the crc field itself)
    pub fn calculate_crc(&self) -> u32 {
        Crc32::new()
            .update(&self.magic.to_le_bytes())
            .update(&[self.version])
            .update(&self.config.gamma_threshold_deg.to_le_bytes())
            .update(&self.config.beta_threshold_deg.to_le_bytes())
            .update(&self.config.stability_time_ms.to_le_bytes())
            .finish()
    }

    /// Update the CRC field
    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    /// Verify the CRC is correct
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Encode into `buf`, returning the used prefix
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], StoreError> {
        postcard::to_slice(self, buf).map_err(|_| StoreError::BufferTooSmall)
    }

    /// Decode and check magic, version, CRC and config ranges
    pub fn decode(bytes: &[u8]) -> Result<PoseConfig, StoreError> {
        let stored: StoredConfig =
            postcard::from_bytes(bytes).map_err(|_| StoreError::Deserialize)?;

        if stored.magic != CONFIG_MAGIC {
            return Err(StoreError::BadMagic);
        }

        if stored.version != CONFIG_VERSION {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Stored config version mismatch: found {}, expected {}",
                stored.version,
                CONFIG_VERSION
            );
            return Err(StoreError::VersionMismatch);
        }

        if !stored.verify_crc() {
            return Err(StoreError::Corrupted);
        }

        stored.config.validate()?;
        Ok(stored.config)
    }
}
