//! Stand-alone line and outline rasterization onto a [`PixelSink`].
//!
//! Unlike [`RasterSurface`](super::RasterSurface), a sink has no depth
//! buffer: every visited pixel is plotted with the sink's current draw color.
//! This is what the hosts use for debug overlays and what the tests use to
//! record exact pixel sequences.

use super::line::{Direction, LineWalk};
use super::surface::PixelSink;
use super::triangle::{sort_by_y, Shape, Vertex};
use crate::error::RasterError;

/// Line and triangle-outline algorithms bound to a pixel sink.
///
/// Implementors are stateless; every call walks its own segment from scratch.
pub trait Rasterizer {
    /// Textbook Bresenham from `(xp, yp)` to `(xq, yq)`.
    fn draw_line<S: PixelSink + ?Sized>(&self, sink: &mut S, xp: i32, yp: i32, xq: i32, yq: i32);

    /// Symmetric (Ammeraal) Bresenham, walked from the end picked by `direction`.
    fn draw_line_ammeraal<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        direction: Direction,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
    );

    /// Symmetric walk of a segment whose major axis must be x.
    fn draw_line_x_major<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        direction: Direction,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
    ) -> Result<(), RasterError>;

    /// Symmetric walk of a segment whose major axis must be y.
    fn draw_line_y_major<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        direction: Direction,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
    ) -> Result<(), RasterError>;

    /// Triangle outline; a general triangle also shows its split edge.
    #[allow(clippy::too_many_arguments)]
    fn draw_triangle<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
    );
}

/// The crate's only [`Rasterizer`]: every routine is a [`LineWalk`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BresenhamRasterizer;

impl BresenhamRasterizer {
    pub fn new() -> Self {
        Self
    }

    fn plot<S: PixelSink + ?Sized>(sink: &mut S, walk: LineWalk) {
        for (x, y) in walk.pixels() {
            sink.draw_point(x, y);
        }
    }
}

impl Rasterizer for BresenhamRasterizer {
    fn draw_line<S: PixelSink + ?Sized>(&self, sink: &mut S, xp: i32, yp: i32, xq: i32, yq: i32) {
        Self::plot(sink, LineWalk::classic(xp, yp, xq, yq));
    }

    fn draw_line_ammeraal<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        direction: Direction,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
    ) {
        Self::plot(sink, LineWalk::oriented(direction, xp, yp, xq, yq));
    }

    fn draw_line_x_major<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        direction: Direction,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
    ) -> Result<(), RasterError> {
        let walk = LineWalk::x_major(direction, xp, yp, xq, yq)?;
        Self::plot(sink, walk);
        Ok(())
    }

    fn draw_line_y_major<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        direction: Direction,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
    ) -> Result<(), RasterError> {
        let walk = LineWalk::y_major(direction, xp, yp, xq, yq)?;
        Self::plot(sink, walk);
        Ok(())
    }

    fn draw_triangle<S: PixelSink + ?Sized>(
        &self,
        sink: &mut S,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
    ) {
        let mut v = [
            Vertex::new(x1, y1, 1.0),
            Vertex::new(x2, y2, 1.0),
            Vertex::new(x3, y3, 1.0),
        ];
        sort_by_y(&mut v);
        let [v1, v2, v3] = v;

        match Shape::classify(&v) {
            Shape::Degenerate | Shape::FlatBottom | Shape::FlatTop => {
                self.draw_line(sink, v1.x, v1.y, v2.x, v2.y);
                self.draw_line(sink, v2.x, v2.y, v3.x, v3.y);
                self.draw_line(sink, v3.x, v3.y, v1.x, v1.y);
            }
            Shape::General { split_x } => {
                // Top half
                self.draw_line(sink, v1.x, v1.y, v2.x, v2.y);
                self.draw_line(sink, v2.x, v2.y, split_x, v2.y);
                self.draw_line(sink, split_x, v2.y, v1.x, v1.y);
                // Bottom half
                self.draw_line(sink, v3.x, v3.y, v2.x, v2.y);
                self.draw_line(sink, v2.x, v2.y, split_x, v2.y);
                self.draw_line(sink, split_x, v2.y, v3.x, v3.y);
            }
        }
    }
}
