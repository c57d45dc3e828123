//! Sensor frame decoders

pub mod centidegree;

pub use centidegree::{
    decode_frame, encode_frame, FrameError, ALPHA_UNAVAILABLE, FRAME_LEN, UNAVAILABLE,
};
