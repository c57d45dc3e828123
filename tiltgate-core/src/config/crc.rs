//! CRC32 checksum for stored blobs
//!
//! Reflected IEEE 802.3 polynomial, computed bitwise so no lookup table is
//! kept in flash.

const POLY: u32 = 0xEDB88320;

/// Running CRC32 over a sequence of byte slices
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32 {
    /// Start a new checksum
    pub const fn new() -> Self {
        Self { state: u32::MAX }
    }

    /// Feed more bytes
    pub fn update(mut self, data: &[u8]) -> Self {
        for &byte in data {
            self.state ^= byte as u32;
            for _ in 0..8 {
                let mask = (self.state & 1).wrapping_neg();
                self.state = (self.state >> 1) ^ (POLY & mask);
            }
        }
        self
    }

    /// Final checksum value
    pub const fn finish(self) -> u32 {
        !self.state
    }
}

/// CRC32 of a single slice
pub fn crc32(data: &[u8]) -> u32 {
    Crc32::new().update(data).finish()
}
