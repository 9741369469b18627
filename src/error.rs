//! Error type for the rasterizer.
//!
//! Pixel-level outcomes (rejected, occluded, tied) are not errors; they are
//! reported through [`PixelStatus`](crate::PixelStatus) and the stats types.
//! Only caller mistakes and I/O failures end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    /// A buffer needs at least one pixel in each direction, sides that fit an
    /// `i32` coordinate and a pixel count that fits a `u32`.
    #[error("invalid raster dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Reciprocal depth needs a finite, strictly positive z.
    #[error("invalid depth {0}: reciprocal depth needs a finite z > 0")]
    InvalidDepth(f32),

    /// An axis-specialized line was given a segment whose major axis is the other one.
    #[error("segment with dx={dx}, dy={dy} does not match the requested major axis")]
    MajorAxisMismatch { dx: i32, dy: i32 },

    /// Writing the backing image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
