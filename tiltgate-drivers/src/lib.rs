//! Driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tiltgate-core:
//!
//! - Timers (manually advanced simulated clock)
//! - Sample sources (bounded push queue, recorded trace replay)
//! - Sensor frame decoding (fixed-point centidegree registers)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;
pub mod source;
pub mod timer;
