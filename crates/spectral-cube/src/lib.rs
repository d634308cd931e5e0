//! Hyperspectral Cube Data Model
//!
//! Provides the cube/mask pairing loaded per agricultural field, with shape
//! validation and the masking helpers the feature pipeline consumes.

mod error;
mod sample;

pub use error::CubeError;
pub use sample::{mask_from_flags, Cube, FieldSample, Mask, REFERENCE_BAND_COUNT};
