//! Edge walkers for scanline filling.
//!
//! An edge is one side of a flat-top or flat-bottom triangle. The fill walks
//! a left and a right edge down the triangle in lock-step and fills the
//! horizontal span between them on every row.

use super::line::LineWalk;

/// The x extent an edge covers on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub y: i32,
    pub x_min: i32,
    pub x_max: i32,
    /// False once the edge has handed out its last row.
    pub more: bool,
}

/// Incremental stepper along one segment.
///
/// After [`set`](EdgeWalker::set) the current position is the start point.
/// Every [`step`](EdgeWalker::step) moves one unit along the major axis
/// until the end point is reached; from then on `step` returns false and
/// the position stays on the end point.
pub trait EdgeWalker {
    fn set(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, z1: f32, z2: f32);

    fn step(&mut self) -> bool;

    fn xy(&self) -> (i32, i32);

    /// Terminal y of the segment.
    fn y_bot(&self) -> i32;

    fn z1(&self) -> f32;

    fn z2(&self) -> f32;

    /// Walk every point of the current row and report its x extent.
    ///
    /// The edge is left on the first point of the next row, or on the end
    /// point when there is no next row.
    fn step_row(&mut self) -> RowSpan {
        let (x, y) = self.xy();
        let mut span = RowSpan {
            y,
            x_min: x,
            x_max: x,
            more: true,
        };
        loop {
            if !self.step() {
                span.more = false;
                return span;
            }
            let (x, next_y) = self.xy();
            if next_y != y {
                return span;
            }
            span.x_min = span.x_min.min(x);
            span.x_max = span.x_max.max(x);
        }
    }
}

/// Bresenham edge carrying constant depth end points.
///
/// The depths are not interpolated while stepping; the fill shades each edge
/// pair flat with the left edge's `z1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edge {
    walk: LineWalk,
    y_bot: i32,
    z1: f32,
    z2: f32,
}

impl Edge {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, z1: f32, z2: f32) -> Self {
        let mut edge = Self::default();
        edge.set(x1, y1, x2, y2, z1, z2);
        edge
    }

    /// Whether x is the major axis of this edge.
    pub fn is_x_major(&self) -> bool {
        self.walk.is_x_major()
    }
}

impl EdgeWalker for Edge {
    fn set(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, z1: f32, z2: f32) {
        self.walk = LineWalk::new(x1, y1, x2, y2);
        self.y_bot = y2;
        self.z1 = z1;
        self.z2 = z2;
    }

    #[inline]
    fn step(&mut self) -> bool {
        self.walk.step()
    }

    #[inline]
    fn xy(&self) -> (i32, i32) {
        self.walk.xy()
    }

    #[inline]
    fn y_bot(&self) -> i32 {
        self.y_bot
    }

    #[inline]
    fn z1(&self) -> f32 {
        self.z1
    }

    #[inline]
    fn z2(&self) -> f32 {
        self.z2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(edge: &mut Edge) -> Vec<(i32, i32)> {
        let mut points = vec![edge.xy()];
        while edge.step() {
            points.push(edge.xy());
        }
        points
    }

    #[test]
    fn set_places_walker_on_start_point() {
        let mut edge = Edge::default();
        edge.set(3, 4, 10, 20, 1.0, 2.0);
        assert_eq!(edge.xy(), (3, 4));
        assert_eq!(edge.y_bot(), 20);
        assert_eq!(edge.z1(), 1.0);
        assert_eq!(edge.z2(), 2.0);
    }

    #[test]
    fn steps_from_origin_to_four_two() {
        let mut edge = Edge::new(0, 0, 4, 2, 1.0, 1.0);
        assert_eq!(trace(&mut edge), vec![(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]);
        assert!(!edge.step());
        assert_eq!(edge.xy(), (4, 2));
    }

    #[test]
    fn zero_length_edge_never_steps() {
        let mut edge = Edge::new(5, 5, 5, 5, 1.0, 1.0);
        assert!(!edge.step());
        assert_eq!(edge.xy(), (5, 5));
    }

    #[test]
    fn reset_reuses_the_edge() {
        let mut edge = Edge::new(0, 0, 3, 3, 1.0, 1.0);
        while edge.step() {}
        edge.set(10, 0, 10, 2, 4.0, 4.0);
        assert_eq!(trace(&mut edge), vec![(10, 0), (10, 1), (10, 2)]);
    }

    #[test]
    fn step_row_collects_x_major_runs() {
        // Rows: y=0 {0}, y=1 {1,2}, y=2 {3,4}
        let mut edge = Edge::new(0, 0, 4, 2, 1.0, 1.0);
        assert!(edge.is_x_major());
        let mut rows = vec![edge.step_row()];
        while rows[rows.len() - 1].more {
            rows.push(edge.step_row());
        }
        assert_eq!(
            rows.iter().map(|r| (r.y, r.x_min, r.x_max)).collect::<Vec<_>>(),
            vec![(0, 0, 0), (1, 1, 2), (2, 3, 4)]
        );
        assert!(rows[0].more && rows[1].more && !rows[2].more);
    }

    #[test]
    fn step_row_on_y_major_edge_takes_one_point_per_row() {
        let mut edge = Edge::new(0, 0, 2, 5, 1.0, 1.0);
        let mut ys = Vec::new();
        loop {
            let row = edge.step_row();
            assert_eq!(row.x_min, row.x_max);
            ys.push(row.y);
            if !row.more {
                break;
            }
        }
        assert_eq!(ys, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn step_row_on_leftward_edge_keeps_min_and_max() {
        let mut edge = Edge::new(8, 0, 0, 2, 1.0, 1.0);
        let first = edge.step_row();
        assert_eq!(first.y, 0);
        assert!(first.x_min <= first.x_max);
        assert_eq!(first.x_max, 8);
        let mut last = first;
        while last.more {
            last = edge.step_row();
        }
        assert_eq!((last.y, last.x_min), (2, 0));
    }
}
