//! The test scene both hosts render.
//!
//! Lines in every orientation and both walk directions, one triangle of each
//! shape, a translucent overlapping fill and one triangle whose vertices
//! bounce back and forth so the split moves between frames.

use log::debug;

use crate::colors;
use crate::error::RasterError;
use crate::render::{
    BresenhamRasterizer, Direction, FillStats, PixelSink, RasterBuffer, RasterSurface, Rasterizer,
    Triangle,
};

/// A coordinate bouncing between two limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounce {
    value: i32,
    velocity: i32,
    min: i32,
    max: i32,
    speed: i32,
}

impl Bounce {
    const fn new(value: i32, velocity: i32, min: i32, max: i32, speed: i32) -> Self {
        Self {
            value,
            velocity,
            min,
            max,
            speed,
        }
    }

    fn advance(&mut self) {
        if self.value < self.min {
            self.velocity = self.speed;
        } else if self.value > self.max {
            self.velocity = -self.speed;
        }
        self.value += self.velocity;
    }
}

pub struct DemoScene {
    rasterizer: BresenhamRasterizer,
    triangle: Triangle,
    apex_x: Bounce,
    apex_y: Bounce,
    corner_x: Bounce,
    paused: bool,
    step: bool,
    frame: u64,
}

impl Default for DemoScene {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoScene {
    pub fn new() -> Self {
        Self {
            rasterizer: BresenhamRasterizer::new(),
            triangle: Triangle::new(),
            apex_x: Bounce::new(0, 1, -50, 100, 2),
            apex_y: Bounce::new(100, 1, 0, 100, 1),
            corner_x: Bounce::new(75, 1, -50, 100, 1),
            paused: false,
            step: false,
            frame: 0,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advance exactly one frame on the next [`advance`](Self::advance), even when paused.
    pub fn request_step(&mut self) {
        self.step = true;
    }

    /// Number of frames the animation has moved.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Move the animated triangle unless paused.
    pub fn advance(&mut self) {
        if !self.paused || self.step {
            self.apex_x.advance();
            self.apex_y.advance();
            self.corner_x.advance();
            self.frame += 1;
        }
        self.step = false;
    }

    /// Vertices of the animated triangle for the current frame.
    pub fn animated_vertices(&self) -> [(i32, i32); 3] {
        let (x, y) = (350, 200);
        [
            (x + self.apex_x.value, y + self.apex_y.value),
            (x + self.corner_x.value, y + 50),
            (x + 25, y),
        ]
    }

    /// Clear `buffer` and draw the whole scene into it.
    pub fn render(&mut self, buffer: &mut RasterBuffer) -> Result<FillStats, RasterError> {
        buffer.clear();
        self.draw_lines(buffer)?;

        let mut stats = FillStats::default();

        // Flat-bottom
        buffer.set_pixel_color(colors::WHITE);
        self.triangle.set(200, 75, 250, 75, 225, 25);
        stats += self.triangle.fill(buffer);

        // Flat-top, in front of the flat-bottom where they overlap
        buffer.set_pixel_color(colors::CYAN_TRANSLUCENT);
        self.triangle.set_with_z(225, 100, 2.0, 200, 50, 2.0, 250, 50, 2.0);
        stats += self.triangle.fill(buffer);

        // General, outlined first: the fill ties with the outline and leaves it
        self.triangle.set(225, 250, 200, 150, 250, 200);
        buffer.set_pixel_color(colors::ORANGE);
        self.triangle.draw(buffer);
        buffer.set_pixel_color(colors::WHITE);
        stats += self.triangle.fill(buffer);

        // Animated
        buffer.set_pixel_color(colors::WHITE);
        let [(x1, y1), (x2, y2), (x3, y3)] = self.animated_vertices();
        self.triangle.set(x1, y1, x2, y2, x3, y3);
        stats += self.triangle.fill(buffer);

        debug!(
            "frame {}: {} rows, {} pixels written",
            self.frame, stats.rows, stats.pixels.written
        );
        Ok(stats)
    }

    fn draw_lines(&self, buffer: &mut RasterBuffer) -> Result<(), RasterError> {
        let r = &self.rasterizer;

        // Shallow slopes
        buffer.set_draw_color(colors::BLUE);
        r.draw_line_ammeraal(buffer, Direction::Forward, 0, 0, 100, 25);
        r.draw_line_ammeraal(buffer, Direction::Forward, 0, 25, 100, 0);

        // Steep slopes
        buffer.set_draw_color(colors::RED);
        r.draw_line_ammeraal(buffer, Direction::Reverse, 50, 100, 100, 200);
        r.draw_line_ammeraal(buffer, Direction::Reverse, 100, 100, 50, 200);

        // Horizontal
        buffer.set_draw_color(colors::BLUE);
        r.draw_line_x_major(buffer, Direction::Forward, 100, 5, 200, 5)?;
        r.draw_line_x_major(buffer, Direction::Reverse, 100, 10, 200, 10)?;

        // Vertical
        buffer.set_draw_color(colors::RED);
        r.draw_line_y_major(buffer, Direction::Reverse, 100, 20, 100, 120)?;
        r.draw_line_y_major(buffer, Direction::Forward, 110, 20, 110, 120)?;

        // Classic rounding, for comparison with the row above
        buffer.set_draw_color(colors::GREEN);
        r.draw_line(buffer, 0, 30, 100, 55);

        // Depth-tested, nearer at the left end
        buffer.set_pixel_color(colors::GREEN);
        if buffer.contains(300, 330) {
            buffer.draw_line(20, 300, 300, 330, 1.0, 4.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::rgba;
    use crate::config::RasterConfig;

    fn buffer() -> RasterBuffer {
        RasterBuffer::new(800, 600).unwrap()
    }

    #[test]
    fn bounce_reverses_past_its_limits() {
        let mut b = Bounce::new(99, 1, 0, 100, 1);
        b.advance();
        b.advance();
        assert_eq!(b.value, 101);
        b.advance();
        assert_eq!((b.value, b.velocity), (100, -1));
    }

    #[test]
    fn render_draws_every_part_of_the_scene() {
        let mut scene = DemoScene::new();
        let mut buf = buffer();
        let stats = scene.render(&mut buf).unwrap();
        assert!(stats.rows > 0);
        assert_eq!(stats.pixels.rejected, 0);

        // Lines
        assert_eq!(buf.color_at(0, 0), Some(colors::BLUE));
        assert_eq!(buf.color_at(100, 120), Some(colors::RED));
        // Flat-bottom alone
        assert_eq!(buf.color_at(225, 40), Some(colors::WHITE));
        // Flat-top over the flat-bottom
        assert_eq!(buf.color_at(225, 60), Some(colors::CYAN_TRANSLUCENT));
        assert_eq!(buf.depth_at(225, 60), Some(2.0));
        // General triangle keeps its outline
        assert_eq!(buf.color_at(200, 150), Some(colors::ORANGE));
        assert_eq!(buf.color_at(225, 180), Some(colors::WHITE));
        assert!(stats.pixels.tied > 0);
        // Depth-tested line
        assert_eq!(buf.color_at(20, 300), Some(colors::GREEN));
        // Untouched
        assert_eq!(buf.color_at(700, 550), Some(colors::BACKGROUND));
    }

    #[test]
    fn translucent_fill_blends_when_enabled() {
        let mut scene = DemoScene::new();
        let config = RasterConfig::new(800, 600).with_alpha_blending(true);
        let mut buf = RasterBuffer::from_config(&config).unwrap();
        scene.render(&mut buf).unwrap();
        assert_eq!(buf.color_at(225, 60), Some(rgba(128, 255, 255, 255)));
    }

    #[test]
    fn render_is_repeatable_on_the_same_frame() {
        let mut scene = DemoScene::new();
        let mut a = buffer();
        let mut b = buffer();
        scene.render(&mut a).unwrap();
        scene.render(&mut b).unwrap();
        scene.render(&mut b).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn small_buffer_clips_without_errors() {
        let mut scene = DemoScene::new();
        let mut buf = RasterBuffer::new(120, 90).unwrap();
        let stats = scene.render(&mut buf).unwrap();
        assert!(stats.pixels.rejected > 0);
    }

    #[test]
    fn pause_and_step_control_the_animation() {
        let mut scene = DemoScene::new();
        let start = scene.animated_vertices();
        scene.advance();
        assert_eq!(scene.frame(), 1);
        assert_ne!(scene.animated_vertices(), start);

        scene.toggle_pause();
        assert!(scene.is_paused());
        let paused = scene.animated_vertices();
        scene.advance();
        assert_eq!(scene.animated_vertices(), paused);

        scene.request_step();
        scene.advance();
        assert_eq!(scene.frame(), 2);
        scene.advance();
        assert_eq!(scene.frame(), 2);
    }

    #[test]
    fn animation_stays_within_bounds() {
        let mut scene = DemoScene::new();
        for _ in 0..1000 {
            scene.advance();
            for (x, y) in scene.animated_vertices() {
                assert!((296..=452).contains(&x), "x = {x}");
                assert!((199..=301).contains(&y), "y = {y}");
            }
        }
    }
}
