//! Drawing targets.
//!
//! Two capabilities are defined here:
//!
//! - [`PixelSink`]: the bare "pick a color, plot a point" target used by the
//!   stand-alone line algorithms. A window or a raster buffer can be one.
//! - [`RasterSurface`]: a color + depth target with depth-tested writes,
//!   line draws and the edge-pair scanline fill.

use image::RgbaImage;

use super::edge::EdgeWalker;
use crate::colors::Color;
use crate::error::RasterError;

/// Minimal point plotting target.
pub trait PixelSink {
    fn set_draw_color(&mut self, color: Color);

    fn draw_point(&mut self, x: i32, y: i32);
}

/// Outcome of a depth-tested pixel write.
///
/// The discriminants are the numeric status codes hosts may log or compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum PixelStatus {
    /// Outside the buffer, nothing written.
    Rejected = -1,
    /// Behind the stored depth, nothing written.
    Occluded = 0,
    /// In front of the stored depth, color and depth written.
    Written = 1,
    /// Same depth as stored, nothing written.
    Tied = 2,
}

impl PixelStatus {
    #[inline]
    pub fn code(self) -> i8 {
        self as i8
    }

    #[inline]
    pub fn is_visible(self) -> bool {
        self == PixelStatus::Written
    }
}

/// Pixel outcome counters for one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelStats {
    pub written: u32,
    pub occluded: u32,
    pub tied: u32,
    pub rejected: u32,
}

impl PixelStats {
    #[inline]
    pub fn record(&mut self, status: PixelStatus) {
        match status {
            PixelStatus::Written => self.written += 1,
            PixelStatus::Occluded => self.occluded += 1,
            PixelStatus::Tied => self.tied += 1,
            PixelStatus::Rejected => self.rejected += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.written + self.occluded + self.tied + self.rejected
    }
}

impl std::ops::AddAssign for PixelStats {
    fn add_assign(&mut self, rhs: Self) {
        self.written += rhs.written;
        self.occluded += rhs.occluded;
        self.tied += rhs.tied;
        self.rejected += rhs.rejected;
    }
}

/// Result of a scanline fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillStats {
    /// Number of scanlines a span was drawn on.
    pub rows: u32,
    pub pixels: PixelStats,
}

impl std::ops::AddAssign for FillStats {
    fn add_assign(&mut self, rhs: Self) {
        self.rows += rhs.rows;
        self.pixels += rhs.pixels;
    }
}

/// A color + depth buffer that triangles and lines are rasterized into.
///
/// Writes use the current pen color set by
/// [`set_pixel_color`](RasterSurface::set_pixel_color) and keep the larger z
/// per pixel. Callers wanting "smaller z is closer" pass reciprocal depths.
pub trait RasterSurface {
    fn enable_alpha_blending(&mut self, enable: bool);

    /// Backing pixel grid, ready to be blitted by a host.
    fn pixels(&self) -> &RgbaImage;

    /// Reset every color to the clear color and every depth to the clear depth.
    fn clear(&mut self);

    /// Depth-tested write of the pen color at `(x, y)`.
    fn set_pixel(&mut self, x: i32, y: i32, z: f32) -> PixelStatus;

    /// Set the pen color used by every following write.
    fn set_pixel_color(&mut self, color: Color);

    /// Line with reciprocal depth interpolated from `1/zp` to `1/zq`.
    ///
    /// A segment with an end point outside the buffer is dropped as a whole.
    fn draw_line(
        &mut self,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
        zp: f32,
        zq: f32,
    ) -> Result<PixelStats, RasterError>;

    /// Line drawn at the constant depth `zp`; `zq` is accepted for symmetry
    /// with [`draw_line`](RasterSurface::draw_line) and ignored.
    fn draw_line_ammeraal(
        &mut self,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
        zp: f32,
        zq: f32,
    ) -> PixelStats;

    /// Fill the flat-top or flat-bottom triangle bounded by two edges.
    ///
    /// Both edges must be freshly [`set`](EdgeWalker::set) and cover the same
    /// rows. With `skip_last` the final row between the two end points is left
    /// to the neighbouring triangle that shares it; pixels of x-major edges
    /// beyond the end points are still filled. `rows` counts full spans only.
    fn fill_triangle_ammeraal(
        &mut self,
        left_edge: &mut dyn EdgeWalker,
        right_edge: &mut dyn EdgeWalker,
        skip_last: bool,
    ) -> FillStats;
}
