//! Color and depth buffer.
//!
//! [`RasterBuffer`] owns an RGBA color grid and a depth grid of the same size.
//! It is the [`RasterSurface`] every triangle and line in the crate ends up
//! in, and the image a host blits to the screen or writes to disk.
//!
//! # Depth Convention
//!
//! Bigger z wins. A write lands only when its z is strictly greater than the
//! stored one, and the clear depth is a large negative value meaning
//! "nothing drawn yet". The z-aware line stores 1/z, so for positive
//! camera-space depths a closer point has the larger value.

use std::path::Path;

use image::RgbaImage;
use log::{debug, trace};

use super::edge::EdgeWalker;
use super::line::LineWalk;
use super::surface::{FillStats, PixelSink, PixelStats, PixelStatus, RasterSurface};
use crate::colors::{self, Color};
use crate::config::RasterConfig;
use crate::error::RasterError;

pub struct RasterBuffer {
    pixels: RgbaImage,
    depth: Vec<f32>,
    width: u32,
    height: u32,
    clear_color: Color,
    clear_depth: f32,
    pixel_color: Color,
    alpha_blending: bool,
}

impl RasterBuffer {
    /// Allocate a cleared buffer with default clear values.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        Self::from_config(&RasterConfig::new(width, height))
    }

    pub fn from_config(config: &RasterConfig) -> Result<Self, RasterError> {
        config.validate()?;
        let size = config
            .width
            .checked_mul(config.height)
            .ok_or(RasterError::InvalidDimensions {
                width: config.width,
                height: config.height,
            })? as usize;
        Ok(Self {
            pixels: RgbaImage::from_pixel(config.width, config.height, config.clear_color),
            depth: vec![config.clear_depth; size],
            width: config.width,
            height: config.height,
            clear_color: config.clear_color,
            clear_depth: config.clear_depth,
            pixel_color: colors::WHITE,
            alpha_blending: config.alpha_blending,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn clear_depth(&self) -> f32 {
        self.clear_depth
    }

    pub fn set_clear_depth(&mut self, depth: f32) {
        self.clear_depth = depth;
    }

    /// Current pen color.
    pub fn pixel_color(&self) -> Color {
        self.pixel_color
    }

    pub fn alpha_blending(&self) -> bool {
        self.alpha_blending
    }

    /// Reset only the color grid.
    pub fn clear_colors(&mut self) {
        let color = self.clear_color;
        self.pixels.pixels_mut().for_each(|p| *p = color);
    }

    /// Reset only the depth grid.
    pub fn clear_depths(&mut self) {
        self.depth.fill(self.clear_depth);
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Get the color at (x, y), or None if out of bounds.
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.contains(x, y)
            .then(|| *self.pixels.get_pixel(x as u32, y as u32))
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.contains(x, y).then(|| self.depth[self.index(x, y)])
    }

    /// Raw RGBA8 bytes, row-major, `width * 4` bytes per row.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Write the color grid as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RasterError> {
        self.pixels
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(RasterError::from)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y as u32 * self.width + x as u32) as usize
    }

    /// Store the pen color at an in-bounds pixel, blending when enabled.
    #[inline]
    fn write_color(&mut self, x: i32, y: i32) {
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        *dst = if self.alpha_blending {
            colors::blend_over(self.pixel_color, *dst)
        } else {
            self.pixel_color
        };
    }

    /// Fill `x_min..=x_max` on row `y` at constant depth.
    fn fill_span(&mut self, y: i32, x_min: i32, x_max: i32, z: f32, stats: &mut PixelStats) {
        let span = u32::try_from(i64::from(x_max) - i64::from(x_min) + 1).unwrap_or(u32::MAX);
        if y < 0 || y >= self.height as i32 {
            trace!("span on row {y} outside {}x{}, dropped", self.width, self.height);
            stats.rejected = stats.rejected.saturating_add(span);
            return;
        }
        let start = x_min.max(0);
        let end = x_max.min(self.width as i32 - 1);
        if start > end {
            stats.rejected = stats.rejected.saturating_add(span);
            return;
        }
        let clipped = span - (end - start + 1) as u32;
        stats.rejected = stats.rejected.saturating_add(clipped);
        for x in start..=end {
            let status = self.set_pixel(x, y, z);
            stats.record(status);
        }
    }
}

impl RasterSurface for RasterBuffer {
    fn enable_alpha_blending(&mut self, enable: bool) {
        self.alpha_blending = enable;
    }

    fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    fn clear(&mut self) {
        self.clear_colors();
        self.clear_depths();
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is written only when `z` is greater than the stored depth.
    /// A NaN depth never passes the test and reports [`PixelStatus::Occluded`].
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, z: f32) -> PixelStatus {
        if !self.contains(x, y) {
            trace!("pixel ({x}, {y}) outside {}x{}, dropped", self.width, self.height);
            return PixelStatus::Rejected;
        }

        let idx = self.index(x, y);
        match z.partial_cmp(&self.depth[idx]) {
            Some(std::cmp::Ordering::Greater) => {
                self.depth[idx] = z;
                self.write_color(x, y);
                PixelStatus::Written
            }
            Some(std::cmp::Ordering::Equal) => PixelStatus::Tied,
            Some(std::cmp::Ordering::Less) | None => PixelStatus::Occluded,
        }
    }

    fn set_pixel_color(&mut self, color: Color) {
        self.pixel_color = color;
    }

    fn draw_line(
        &mut self,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
        zp: f32,
        zq: f32,
    ) -> Result<PixelStats, RasterError> {
        for z in [zp, zq] {
            if !(z.is_finite() && z > 0.0) {
                return Err(RasterError::InvalidDepth(z));
            }
        }

        let walk = LineWalk::new(xp, yp, xq, yq);
        let mut stats = PixelStats::default();

        if !self.contains(xp, yp) || !self.contains(xq, yq) {
            debug!(
                "segment ({xp}, {yp})->({xq}, {yq}) leaves {}x{}, dropped",
                self.width, self.height
            );
            stats.rejected = walk.len().saturating_add(1);
            return Ok(stats);
        }

        // 1/z is linear in screen space, so it is stepped by a fixed amount
        // per major-axis unit.
        let inv_zp = 1.0 / zp;
        let inv_zq = 1.0 / zq;
        let steps = walk.len();
        for (i, (x, y)) in walk.pixels().enumerate() {
            let inv_z = if steps == 0 {
                inv_zp
            } else {
                let t = i as f32 / steps as f32;
                inv_zp + t * (inv_zq - inv_zp)
            };
            stats.record(self.set_pixel(x, y, inv_z));
        }
        Ok(stats)
    }

    fn draw_line_ammeraal(
        &mut self,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
        zp: f32,
        _zq: f32,
    ) -> PixelStats {
        let mut stats = PixelStats::default();
        for (x, y) in LineWalk::new(xp, yp, xq, yq).pixels() {
            stats.record(self.set_pixel(x, y, zp));
        }
        stats
    }

    /// Scanline fill between two edges.
    ///
    /// Each iteration consumes one row of the left edge, brings the right
    /// edge down to the same row and fills between the outermost x of the
    /// two. Spans use the left edge's `z1`: every edge pair is shaded at one
    /// flat depth.
    fn fill_triangle_ammeraal(
        &mut self,
        left_edge: &mut dyn EdgeWalker,
        right_edge: &mut dyn EdgeWalker,
        skip_last: bool,
    ) -> FillStats {
        let mut stats = FillStats::default();

        let (_, y_top) = left_edge.xy();
        let y_bot = left_edge.y_bot();
        if y_top == y_bot {
            trace!("zero-height edge pair on row {y_top}, nothing to fill");
            return stats;
        }

        let z = left_edge.z1();
        let descending = y_bot > y_top;

        loop {
            let left = left_edge.step_row();

            // An x-major edge may still sit on an earlier row.
            loop {
                let (_, ry) = right_edge.xy();
                let behind = if descending { ry < left.y } else { ry > left.y };
                if !behind || !right_edge.step() {
                    break;
                }
            }
            let right = right_edge.step_row();

            let x_min = left.x_min.min(right.x_min);
            let x_max = left.x_max.max(right.x_max);
            if skip_last && left.y == y_bot {
                // Both edges now rest on their end points. The neighbour's
                // first row spans exactly those, so only the overhang of
                // x-major edges past them is drawn here.
                let (lx, _) = left_edge.xy();
                let (rx, _) = right_edge.xy();
                let (inner_min, inner_max) = (lx.min(rx), lx.max(rx));
                trace!(
                    "row {}: {inner_min}..={inner_max} left to the neighbouring triangle",
                    left.y
                );
                if x_min < inner_min {
                    self.fill_span(left.y, x_min, inner_min - 1, z, &mut stats.pixels);
                }
                if x_max > inner_max {
                    self.fill_span(left.y, inner_max + 1, x_max, z, &mut stats.pixels);
                }
            } else {
                self.fill_span(left.y, x_min, x_max, z, &mut stats.pixels);
                stats.rows += 1;
            }

            if !left.more {
                break;
            }
        }

        stats
    }
}

impl PixelSink for RasterBuffer {
    fn set_draw_color(&mut self, color: Color) {
        self.pixel_color = color;
    }

    /// Write the pen color without depth testing (for overlays).
    fn draw_point(&mut self, x: i32, y: i32) {
        if self.contains(x, y) {
            self.write_color(x, y);
        } else {
            trace!("point ({x}, {y}) outside {}x{}, dropped", self.width, self.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::rgba;
    use crate::render::edge::Edge;
    use approx::assert_relative_eq;

    fn buffer(width: u32, height: u32) -> RasterBuffer {
        RasterBuffer::new(width, height).unwrap()
    }

    fn written_in_row(buf: &RasterBuffer, y: i32) -> Vec<i32> {
        (0..buf.width() as i32)
            .filter(|&x| buf.color_at(x, y) != Some(buf.clear_color()))
            .collect()
    }

    #[test]
    fn zero_sized_buffer_is_an_error() {
        assert!(matches!(
            RasterBuffer::new(0, 4),
            Err(RasterError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn oversized_buffer_is_an_error_not_a_panic() {
        assert!(matches!(
            RasterBuffer::new(u32::MAX, 2),
            Err(RasterError::InvalidDimensions { width: u32::MAX, height: 2 })
        ));
        assert!(RasterBuffer::new(65_536, 65_536).is_err());
    }

    #[test]
    fn new_buffer_is_cleared() {
        let buf = buffer(4, 3);
        assert_eq!(buf.color_at(3, 2), Some(colors::BACKGROUND));
        assert_eq!(buf.depth_at(0, 0), Some(-1.0e8));
        assert_eq!(buf.as_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn out_of_bounds_pixels_are_rejected() {
        let mut buf = buffer(4, 4);
        assert_eq!(buf.set_pixel(-1, 0, 1.0), PixelStatus::Rejected);
        assert_eq!(buf.set_pixel(0, -1, 1.0), PixelStatus::Rejected);
        assert_eq!(buf.set_pixel(4, 0, 1.0), PixelStatus::Rejected);
        assert_eq!(buf.set_pixel(0, 4, 1.0), PixelStatus::Rejected);
        assert_eq!(buf.set_pixel(3, 3, 1.0), PixelStatus::Written);
    }

    #[test]
    fn bigger_z_wins() {
        let mut buf = buffer(2, 2);
        buf.set_pixel_color(colors::RED);
        assert_eq!(buf.set_pixel(1, 1, 1.0), PixelStatus::Written);
        buf.set_pixel_color(colors::GREEN);
        assert_eq!(buf.set_pixel(1, 1, 0.5), PixelStatus::Occluded);
        assert_eq!(buf.color_at(1, 1), Some(colors::RED));
        assert_eq!(buf.set_pixel(1, 1, 2.0), PixelStatus::Written);
        assert_eq!(buf.color_at(1, 1), Some(colors::GREEN));
        assert_eq!(buf.depth_at(1, 1), Some(2.0));
    }

    #[test]
    fn equal_z_keeps_the_first_write() {
        let mut buf = buffer(2, 2);
        buf.set_pixel_color(colors::RED);
        buf.set_pixel(0, 0, 3.0);
        buf.set_pixel_color(colors::BLUE);
        assert_eq!(buf.set_pixel(0, 0, 3.0), PixelStatus::Tied);
        assert_eq!(buf.color_at(0, 0), Some(colors::RED));
    }

    #[test]
    fn nan_depth_never_writes() {
        let mut buf = buffer(2, 2);
        assert_eq!(buf.set_pixel(0, 0, f32::NAN), PixelStatus::Occluded);
        assert_eq!(buf.color_at(0, 0), Some(colors::BACKGROUND));
    }

    #[test]
    fn pen_color_persists_across_writes() {
        let mut buf = buffer(3, 1);
        buf.set_pixel_color(colors::ORANGE);
        for x in 0..3 {
            buf.set_pixel(x, 0, 1.0);
        }
        assert_eq!(written_in_row(&buf, 0), vec![0, 1, 2]);
        assert!((0..3).all(|x| buf.color_at(x, 0) == Some(colors::ORANGE)));
    }

    #[test]
    fn alpha_blending_composites_over_existing_color() {
        let config = RasterConfig::new(2, 1).with_clear_color(colors::BLUE);
        let mut buf = RasterBuffer::from_config(&config).unwrap();
        buf.enable_alpha_blending(true);
        buf.set_pixel_color(rgba(255, 0, 0, 128));
        buf.set_pixel(0, 0, 1.0);
        assert_eq!(buf.color_at(0, 0), Some(rgba(128, 0, 127, 255)));

        buf.enable_alpha_blending(false);
        buf.set_pixel(1, 0, 1.0);
        assert_eq!(buf.color_at(1, 0), Some(rgba(255, 0, 0, 128)));
    }

    #[test]
    fn clear_resets_both_grids() {
        let mut buf = buffer(5, 5);
        buf.set_pixel_color(colors::WHITE);
        buf.fill_span(2, 0, 4, 7.0, &mut PixelStats::default());
        buf.set_clear_color(colors::BLACK);
        buf.set_clear_depth(-5.0);
        buf.clear();
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(buf.color_at(x, y), Some(colors::BLACK));
                assert_eq!(buf.depth_at(x, y), Some(-5.0));
            }
        }
    }

    #[test]
    fn separate_clears_touch_one_grid() {
        let mut buf = buffer(2, 2);
        buf.set_pixel(0, 0, 1.0);
        buf.clear_colors();
        assert_eq!(buf.color_at(0, 0), Some(colors::BACKGROUND));
        assert_eq!(buf.depth_at(0, 0), Some(1.0));
        buf.clear_depths();
        assert_eq!(buf.depth_at(0, 0), Some(-1.0e8));
    }

    #[test]
    fn z_line_interpolates_reciprocal_depth() {
        let mut buf = buffer(16, 16);
        let stats = buf.draw_line(0, 0, 10, 5, 1.0, 4.0).unwrap();
        assert_eq!(stats.written, 11);
        assert_relative_eq!(buf.depth_at(0, 0).unwrap(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(buf.depth_at(10, 5).unwrap(), 0.25, epsilon = 1e-6);
        // Half way along the major axis: (1 + 0.25) / 2
        assert_relative_eq!(buf.depth_at(5, 3).unwrap(), 0.625, epsilon = 1e-6);
    }

    #[test]
    fn z_line_rejects_bad_depth() {
        let mut buf = buffer(8, 8);
        assert!(matches!(
            buf.draw_line(0, 0, 4, 4, 0.0, 1.0),
            Err(RasterError::InvalidDepth(z)) if z == 0.0
        ));
        assert!(buf.draw_line(0, 0, 4, 4, 1.0, -2.0).is_err());
        assert!(buf.draw_line(0, 0, 4, 4, f32::INFINITY, 1.0).is_err());
        assert!(written_in_row(&buf, 0).is_empty());
    }

    #[test]
    fn z_line_leaving_the_buffer_is_dropped_whole() {
        let mut buf = buffer(8, 8);
        let stats = buf.draw_line(2, 2, 8, 4, 1.0, 1.0).unwrap();
        assert_eq!(stats.written, 0);
        assert_eq!(stats.rejected, 7);
        assert!((0..8).all(|y| written_in_row(&buf, y).is_empty()));
    }

    #[test]
    fn constant_depth_line_clips_per_pixel() {
        let mut buf = buffer(8, 8);
        let stats = buf.draw_line_ammeraal(5, 1, 10, 1, 2.0, 9.0);
        assert_eq!(stats.written, 3);
        assert_eq!(stats.rejected, 3);
        assert_eq!(written_in_row(&buf, 1), vec![5, 6, 7]);
        assert_eq!(buf.depth_at(6, 1), Some(2.0));
    }

    #[test]
    fn pixel_sink_ignores_depth() {
        let mut buf = buffer(3, 3);
        buf.set_pixel(1, 1, 100.0);
        buf.set_draw_color(colors::GREEN);
        buf.draw_point(1, 1);
        buf.draw_point(9, 9);
        assert_eq!(buf.color_at(1, 1), Some(colors::GREEN));
        assert_eq!(buf.depth_at(1, 1), Some(100.0));
    }

    #[test]
    fn flat_bottom_fill_includes_the_bottom_row() {
        // Apex (0,0), flat edge from (50,50) to (100,50)
        let mut buf = buffer(128, 64);
        let mut left = Edge::new(0, 0, 50, 50, 1.0, 1.0);
        let mut right = Edge::new(0, 0, 100, 50, 1.0, 1.0);
        let stats = buf.fill_triangle_ammeraal(&mut left, &mut right, false);
        assert_eq!(stats.rows, 51);
        assert_eq!(stats.pixels.tied, 0);
        let bottom = written_in_row(&buf, 50);
        assert_eq!(bottom.first(), Some(&50));
        assert_eq!(bottom.last(), Some(&100));
        assert_eq!(bottom.len(), 51);
        assert_eq!(written_in_row(&buf, 0), vec![0]);
    }

    #[test]
    fn skip_last_leaves_the_final_row_empty() {
        let mut buf = buffer(128, 64);
        let mut left = Edge::new(0, 0, 50, 50, 1.0, 1.0);
        let mut right = Edge::new(0, 0, 100, 50, 1.0, 1.0);
        let stats = buf.fill_triangle_ammeraal(&mut left, &mut right, true);
        assert_eq!(stats.rows, 50);
        assert!(written_in_row(&buf, 50).is_empty());
        assert!(!written_in_row(&buf, 49).is_empty());
    }

    #[test]
    fn skip_last_keeps_the_overhang_of_x_major_edges() {
        // Shallow edges reach the final row before their end points
        let mut buf = buffer(64, 64);
        let mut left = Edge::new(25, 44, 30, 45, 1.0, 1.0);
        let mut right = Edge::new(25, 44, 39, 45, 1.0, 1.0);
        let stats = buf.fill_triangle_ammeraal(&mut left, &mut right, true);

        let overhang_start = [(30, 45), (39, 45)]
            .iter()
            .flat_map(|&(xq, yq)| LineWalk::new(25, 44, xq, yq).pixels())
            .filter(|&(_, y)| y == 45)
            .map(|(x, _)| x)
            .min()
            .unwrap();
        assert!(overhang_start < 30);
        assert_eq!(
            written_in_row(&buf, 45),
            (overhang_start..30).collect::<Vec<_>>()
        );
        assert_eq!(stats.rows, 1);
        assert_eq!(stats.pixels.tied, 0);
    }

    #[test]
    fn swapped_edges_fill_the_same_pixels() {
        let mut a = buffer(64, 64);
        let mut b = buffer(64, 64);
        a.fill_triangle_ammeraal(
            &mut Edge::new(30, 5, 10, 40, 1.0, 1.0),
            &mut Edge::new(30, 5, 55, 40, 1.0, 1.0),
            false,
        );
        b.fill_triangle_ammeraal(
            &mut Edge::new(30, 5, 55, 40, 1.0, 1.0),
            &mut Edge::new(30, 5, 10, 40, 1.0, 1.0),
            false,
        );
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn fill_uses_left_edge_depth() {
        let mut buf = buffer(32, 32);
        let mut left = Edge::new(0, 10, 10, 20, 3.0, 9.0);
        let mut right = Edge::new(20, 10, 10, 20, 5.0, 9.0);
        buf.fill_triangle_ammeraal(&mut left, &mut right, false);
        assert_eq!(buf.depth_at(10, 10), Some(3.0));
        assert_eq!(buf.depth_at(10, 20), Some(3.0));
    }

    #[test]
    fn zero_height_edges_fill_nothing() {
        let mut buf = buffer(32, 32);
        let mut left = Edge::new(0, 4, 20, 4, 1.0, 1.0);
        let mut right = Edge::new(0, 4, 30, 4, 1.0, 1.0);
        let stats = buf.fill_triangle_ammeraal(&mut left, &mut right, false);
        assert_eq!(stats, FillStats::default());
    }

    #[test]
    fn fill_partly_outside_counts_rejected_pixels() {
        let mut buf = buffer(10, 10);
        let mut left = Edge::new(-5, 0, -5, 4, 1.0, 1.0);
        let mut right = Edge::new(4, 0, 4, 4, 1.0, 1.0);
        let stats = buf.fill_triangle_ammeraal(&mut left, &mut right, false);
        assert_eq!(stats.rows, 5);
        assert_eq!(stats.pixels.written, 25);
        assert_eq!(stats.pixels.rejected, 25);
    }
}
