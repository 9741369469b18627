//! Integer line walking (Bresenham / Ammeraal).
//!
//! [`LineWalk`] holds the stepping state for one segment. It is the single
//! piece of Bresenham arithmetic in the crate: the edge walker, the
//! stand-alone line rasterizer and the raster buffer's line draws all step
//! through it.
//!
//! # Algorithm
//!
//! With absolute deltas `dx`, `dy` the axis with the larger delta is the
//! major axis. Every step moves one unit along it. A decision variable `d`
//! starts at 0 and grows by `m = 2 * minor` each step; once it reaches the
//! threshold the minor axis moves one unit and `c = 2 * major` is taken off.
//!
//! ```text
//!   d += m
//!   if d >= threshold { minor += inc; d -= c }
//! ```
//!
//! The threshold decides how ties at exactly half a pixel are rounded:
//!
//! - [`Rounding::Symmetric`] (Ammeraal): `threshold = major`, plus one when
//!   the major axis runs in the negative direction. Ties always round the
//!   same way in screen space, so P->Q and Q->P cover the same pixels.
//! - [`Rounding::Classic`]: `threshold = major + 1` ("d exceeds major"),
//!   the textbook form. Reversing the segment may shift tie pixels.
//!
//! Both forms land exactly on the end point after `major` steps.
//!
//! Deltas and the decision variable are kept in `i64`, so any pair of `i32`
//! end points can be walked, including `i32::MIN` to `i32::MAX`.

use crate::error::RasterError;

/// How the decision variable resolves half-pixel ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Direction independent rounding (Ammeraal).
    #[default]
    Symmetric,
    /// Step the minor axis only once the error strictly exceeds the major delta.
    Classic,
}

/// Which end of a segment the walk starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Walk from P to Q.
    #[default]
    Forward,
    /// Walk from Q to P.
    Reverse,
}

impl Direction {
    /// Order the two end points so the walk origin comes first.
    #[inline]
    pub fn order(self, p: (i32, i32), q: (i32, i32)) -> ((i32, i32), (i32, i32)) {
        match self {
            Direction::Forward => (p, q),
            Direction::Reverse => (q, p),
        }
    }
}

/// Bresenham stepping state along one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineWalk {
    x: i32,
    y: i32,
    x_end: i32,
    y_end: i32,
    x_inc: i32,
    y_inc: i32,
    d: i64,
    m: i64,
    c: i64,
    threshold: i64,
    x_major: bool,
}

impl LineWalk {
    /// Symmetric walk from `(xp, yp)` to `(xq, yq)`.
    pub fn new(xp: i32, yp: i32, xq: i32, yq: i32) -> Self {
        Self::with_rounding(xp, yp, xq, yq, Rounding::Symmetric)
    }

    /// Textbook walk from `(xp, yp)` to `(xq, yq)`.
    pub fn classic(xp: i32, yp: i32, xq: i32, yq: i32) -> Self {
        Self::with_rounding(xp, yp, xq, yq, Rounding::Classic)
    }

    /// Symmetric walk over P and Q, starting from the end chosen by `direction`.
    pub fn oriented(direction: Direction, xp: i32, yp: i32, xq: i32, yq: i32) -> Self {
        let ((x0, y0), (x1, y1)) = direction.order((xp, yp), (xq, yq));
        Self::new(x0, y0, x1, y1)
    }

    pub fn with_rounding(xp: i32, yp: i32, xq: i32, yq: i32, rounding: Rounding) -> Self {
        let dx = (i64::from(xq) - i64::from(xp)).abs();
        let dy = (i64::from(yq) - i64::from(yp)).abs();
        let x_inc = if xq < xp { -1 } else { 1 };
        let y_inc = if yq < yp { -1 } else { 1 };
        let x_major = dx >= dy;

        let (major, minor, major_inc) = if x_major {
            (dx, dy, x_inc)
        } else {
            (dy, dx, y_inc)
        };

        let threshold = match rounding {
            Rounding::Symmetric if major_inc < 0 => major + 1,
            Rounding::Symmetric => major,
            Rounding::Classic => major + 1,
        };

        Self {
            x: xp,
            y: yp,
            x_end: xq,
            y_end: yq,
            x_inc,
            y_inc,
            d: 0,
            m: minor << 1,
            c: major << 1,
            threshold,
            x_major,
        }
    }

    /// Like [`LineWalk::oriented`], but requires x to be the major axis.
    pub fn x_major(
        direction: Direction,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
    ) -> Result<Self, RasterError> {
        let walk = Self::oriented(direction, xp, yp, xq, yq);
        if walk.is_x_major() {
            Ok(walk)
        } else {
            Err(RasterError::MajorAxisMismatch {
                dx: xq.saturating_sub(xp),
                dy: yq.saturating_sub(yp),
            })
        }
    }

    /// Like [`LineWalk::oriented`], but requires y to be the major axis.
    ///
    /// A segment with `dx == dy` counts as x-major and is refused here.
    pub fn y_major(
        direction: Direction,
        xp: i32,
        yp: i32,
        xq: i32,
        yq: i32,
    ) -> Result<Self, RasterError> {
        let walk = Self::oriented(direction, xp, yp, xq, yq);
        if walk.is_x_major() {
            Err(RasterError::MajorAxisMismatch {
                dx: xq.saturating_sub(xp),
                dy: yq.saturating_sub(yp),
            })
        } else {
            Ok(walk)
        }
    }

    #[inline]
    pub fn xy(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn end(&self) -> (i32, i32) {
        (self.x_end, self.y_end)
    }

    #[inline]
    pub fn is_x_major(&self) -> bool {
        self.x_major
    }

    /// Number of steps between the two end points (the major delta).
    #[inline]
    pub fn len(&self) -> u32 {
        (self.c >> 1) as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.c == 0
    }

    /// True once the major coordinate sits on the end point.
    #[inline]
    pub fn is_done(&self) -> bool {
        if self.x_major {
            self.x == self.x_end
        } else {
            self.y == self.y_end
        }
    }

    /// Advance one unit along the major axis.
    ///
    /// Returns false, without moving, once the end point has been reached.
    #[inline]
    pub fn step(&mut self) -> bool {
        if self.is_done() {
            return false;
        }

        self.d += self.m;
        let minor_step = self.d >= self.threshold;
        if minor_step {
            self.d -= self.c;
        }

        if self.x_major {
            self.x += self.x_inc;
            if minor_step {
                self.y += self.y_inc;
            }
        } else {
            self.y += self.y_inc;
            if minor_step {
                self.x += self.x_inc;
            }
        }
        true
    }

    /// Iterate every pixel of the remaining walk, current position first and
    /// end point last.
    pub fn pixels(self) -> LinePixels {
        LinePixels {
            walk: self,
            finished: false,
        }
    }
}

/// Iterator over the pixels of a [`LineWalk`].
#[derive(Debug, Clone)]
pub struct LinePixels {
    walk: LineWalk,
    finished: bool,
}

impl Iterator for LinePixels {
    type Item = (i32, i32);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let pixel = self.walk.xy();
        self.finished = !self.walk.step();
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let (x, y) = self.walk.xy();
        let (x_end, y_end) = self.walk.end();
        let left = if self.walk.is_x_major() {
            x_end.abs_diff(x)
        } else {
            y_end.abs_diff(y)
        } as usize;
        (left + 1, Some(left + 1))
    }
}

impl ExactSizeIterator for LinePixels {}
