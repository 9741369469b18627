//! Raster buffer configuration.
//!
//! Everything a host can choose about a [`RasterBuffer`](crate::RasterBuffer)
//! lives here. The resolution is fixed once the buffer is built; the clear
//! values and the blending flag can still be changed on the buffer later.

use crate::colors::{self, Color};
use crate::error::RasterError;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Depth meaning "nothing drawn yet". Any real depth is larger, since the
/// buffer keeps the bigger z.
pub const DEFAULT_CLEAR_DEPTH: f32 = -100_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterConfig {
    pub width: u32,
    pub height: u32,
    pub clear_color: Color,
    pub clear_depth: f32,
    pub alpha_blending: bool,
}

impl RasterConfig {
    /// Configuration with the given size and default clear values.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_clear_depth(mut self, depth: f32) -> Self {
        self.clear_depth = depth;
        self
    }

    pub fn with_alpha_blending(mut self, enable: bool) -> Self {
        self.alpha_blending = enable;
        self
    }

    /// Check that the configuration describes a usable buffer.
    ///
    /// Both sides must be non-zero and addressable by `i32` pixel
    /// coordinates, and the pixel count must fit in a `u32`.
    pub fn validate(&self) -> Result<(), RasterError> {
        let addressable = |side: u32| side > 0 && i32::try_from(side).is_ok();
        let fits = self.width.checked_mul(self.height).is_some();
        if !(addressable(self.width) && addressable(self.height) && fits) {
            return Err(RasterError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            clear_color: colors::BACKGROUND,
            clear_depth: DEFAULT_CLEAR_DEPTH,
            alpha_blending: false,
        }
    }
}
