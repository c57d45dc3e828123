//! Fixed-point orientation frame
//!
//! Sensors and bridges that report orientation as integer registers send
//! three little-endian values in hundredths of a degree. Heading is
//! unsigned so the whole [0, 360) range fits; tilt axes are signed:
//!
//! ```text
//! ┌─────────┬─────────┬─────────┐
//! │ ALPHA   │ BETA    │ GAMMA   │
//! │ u16 LE  │ i16 LE  │ i16 LE  │
//! └─────────┴─────────┴─────────┘
//! ```
//!
//! `u16::MAX` (alpha) and `i16::MIN` (beta, gamma) mark an axis the sensor
//! could not report. Readings outside the axis range are treated the same
//! way, never clamped.

use tiltgate_core::orientation::OrientationSample;

/// Encoded frame size in bytes
pub const FRAME_LEN: usize = 6;

/// Alpha register value for an unavailable heading
pub const ALPHA_UNAVAILABLE: u16 = u16::MAX;

/// Beta/gamma register value for an unavailable axis
pub const UNAVAILABLE: i16 = i16::MIN;

/// Alpha range: [0, 360) degrees
const ALPHA_MAX_EXCLUSIVE: u16 = 36_000;

/// Beta range: [-180, 180] degrees
const BETA_LIMIT: i16 = 18_000;

/// Gamma range: [-90, 90] degrees
const GAMMA_LIMIT: i16 = 9_000;

/// Errors that can occur decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Fewer than `FRAME_LEN` bytes
    Incomplete,
}

/// Decode one frame into a sample
pub fn decode_frame(bytes: &[u8]) -> Result<OrientationSample, FrameError> {
    if bytes.len() < FRAME_LEN {
        return Err(FrameError::Incomplete);
    }

    let alpha = u16::from_le_bytes([bytes[0], bytes[1]]);
    let beta = i16::from_le_bytes([bytes[2], bytes[3]]);
    let gamma = i16::from_le_bytes([bytes[4], bytes[5]]);

    Ok(OrientationSample::new(
        (alpha < ALPHA_MAX_EXCLUSIVE).then_some(alpha as f32 / 100.0),
        decode_tilt(beta, BETA_LIMIT),
        decode_tilt(gamma, GAMMA_LIMIT),
    ))
}

/// Encode a sample into one frame
///
/// Unknown axes, and known values the register cannot hold, are written
/// as unavailable.
pub fn encode_frame(sample: &OrientationSample) -> [u8; FRAME_LEN] {
    let alpha = sample
        .alpha
        .map(centidegrees)
        .filter(|&c| (0..ALPHA_MAX_EXCLUSIVE as i32).contains(&c))
        .map_or(ALPHA_UNAVAILABLE, |c| c as u16);

    let mut frame = [0u8; FRAME_LEN];
    frame[0..2].copy_from_slice(&alpha.to_le_bytes());
    frame[2..4].copy_from_slice(&encode_tilt(sample.beta, BETA_LIMIT).to_le_bytes());
    frame[4..6].copy_from_slice(&encode_tilt(sample.gamma, GAMMA_LIMIT).to_le_bytes());
    frame
}

fn decode_tilt(raw: i16, limit: i16) -> Option<f32> {
    if raw == UNAVAILABLE || !(-limit..=limit).contains(&raw) {
        return None;
    }
    Some(raw as f32 / 100.0)
}

fn encode_tilt(degrees: Option<f32>, limit: i16) -> i16 {
    degrees
        .map(centidegrees)
        .filter(|&c| (-(limit as i32)..=limit as i32).contains(&c))
        .map_or(UNAVAILABLE, |c| c as i16)
}

/// Degrees to hundredths, rounding half away from zero
fn centidegrees(degrees: f32) -> i32 {
    let scaled = degrees * 100.0;
    // `as` saturates, which the range filters then reject
    if scaled < 0.0 {
        (scaled - 0.5) as i32
    } else {
        (scaled + 0.5) as i32
    }
}
