//! Triangle decomposition and filling.
//!
//! Any triangle can be cut into at most two triangles with a horizontal edge:
//!
//! ```text
//!        v1                   v1
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v2.y
//!     v2     \             v2   split
//!       \     \             \    \
//!         \    \              \   \
//!           \   \               \  \
//!             \  \                \ \
//!               v3                  v3
//!
//!   General triangle      Flat-bottom (top) + Flat-top (bottom)
//! ```
//!
//! Each half is filled by walking its left and right edges with the raster
//! buffer's scanline fill. The horizontal split edge is shared by the two
//! halves; the top half skips its last row so the bottom half draws it once.

use log::debug;

use super::edge::{Edge, EdgeWalker};
use super::surface::{FillStats, RasterSurface};

/// A screen-space vertex. `z` defaults to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
    pub z: f32,
}

impl Vertex {
    pub const fn new(x: i32, y: i32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(0, 0, 1.0)
    }
}

/// How a y-sorted triangle decomposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// All three vertices on one row.
    Degenerate,
    /// `y2 == y3`: apex on top, horizontal edge at the bottom.
    FlatBottom,
    /// `y1 == y2`: horizontal edge on top, apex at the bottom.
    FlatTop,
    /// `y1 < y2 < y3`: split on row `y2` at `split_x` on the long edge v1-v3.
    General { split_x: i32 },
}

impl Shape {
    /// Classify three vertices already sorted by ascending y.
    pub fn classify(v: &[Vertex; 3]) -> Self {
        let [v1, v2, v3] = v;
        if v1.y == v3.y {
            Shape::Degenerate
        } else if v2.y == v3.y {
            Shape::FlatBottom
        } else if v1.y == v2.y {
            Shape::FlatTop
        } else {
            Shape::General {
                split_x: split_x(v1, v2, v3),
            }
        }
    }
}

/// Sort three vertices so that `y1 <= y2 <= y3`.
///
/// Three compare-and-swaps, moving whole vertices so each keeps its x and z.
pub fn sort_by_y(v: &mut [Vertex; 3]) {
    if v[0].y > v[1].y {
        v.swap(0, 1);
    }
    if v[0].y > v[2].y {
        v.swap(0, 2);
    }
    if v[1].y > v[2].y {
        v.swap(1, 2);
    }
}

/// X where the long edge v1-v3 crosses row `v2.y`, truncated toward zero.
///
/// Requires `v1.y < v3.y`.
pub fn split_x(v1: &Vertex, v2: &Vertex, v3: &Vertex) -> i32 {
    let t = (v2.y - v1.y) as f32 / (v3.y - v1.y) as f32;
    (v1.x as f32 + t * (v3.x - v1.x) as f32) as i32
}

/// Depth on the long edge v1-v3 at row `v2.y`.
fn split_z(v1: &Vertex, v2: &Vertex, v3: &Vertex) -> f32 {
    let t = (v2.y - v1.y) as f32 / (v3.y - v1.y) as f32;
    v1.z + t * (v3.z - v1.z)
}

/// A reusable triangle owning the two edge walkers used to fill it.
///
/// `set`/`set_with_z` overwrite the vertices; [`draw`](Triangle::draw) and
/// [`fill`](Triangle::fill) sort them in place before rasterizing.
#[derive(Debug, Clone)]
pub struct Triangle<E: EdgeWalker = Edge> {
    vertices: [Vertex; 3],
    left_edge: E,
    right_edge: E,
}

impl Triangle<Edge> {
    pub fn new() -> Self {
        Self::with_edges(Edge::default(), Edge::default())
    }
}

impl Default for Triangle<Edge> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EdgeWalker> Triangle<E> {
    /// Build a triangle around caller supplied edge walkers.
    pub fn with_edges(left_edge: E, right_edge: E) -> Self {
        Self {
            vertices: [Vertex::default(); 3],
            left_edge,
            right_edge,
        }
    }

    /// Set the vertices; every depth becomes 1.0.
    pub fn set(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32) {
        self.set_with_z(x1, y1, 1.0, x2, y2, 1.0, x3, y3, 1.0);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_with_z(
        &mut self,
        x1: i32,
        y1: i32,
        z1: f32,
        x2: i32,
        y2: i32,
        z2: f32,
        x3: i32,
        y3: i32,
        z3: f32,
    ) {
        self.vertices = [
            Vertex::new(x1, y1, z1),
            Vertex::new(x2, y2, z2),
            Vertex::new(x3, y3, z3),
        ];
    }

    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    pub fn sort(&mut self) {
        sort_by_y(&mut self.vertices);
    }

    /// Sort the vertices and report how the triangle decomposes.
    pub fn shape(&mut self) -> Shape {
        self.sort();
        Shape::classify(&self.vertices)
    }

    /// Draw the outline at constant depth per segment.
    ///
    /// A general triangle is outlined as its two halves, so the split edge
    /// shows up as well.
    pub fn draw<R: RasterSurface + ?Sized>(&mut self, raster: &mut R) {
        let shape = self.shape();
        let [v1, v2, v3] = self.vertices;

        match shape {
            Shape::Degenerate | Shape::FlatBottom | Shape::FlatTop => {
                segment(raster, v1, v2);
                segment(raster, v2, v3);
                segment(raster, v1, v3);
            }
            Shape::General { split_x } => {
                let split = Vertex::new(split_x, v2.y, split_z(&v1, &v2, &v3));
                // Top half, flat-bottom
                segment(raster, v1, v2);
                segment(raster, v2, split);
                segment(raster, v1, split);
                // Bottom half, flat-top
                segment(raster, v2, v3);
                segment(raster, v2, split);
                segment(raster, split, v3);
            }
        }
    }

    /// Fill the triangle.
    ///
    /// A stand-alone flat-bottom triangle draws its bottom row; it is an outer
    /// edge. The top half of a split triangle leaves the split row between
    /// v2 and the split point to the bottom half, and draws only what its
    /// edges reach past those two points.
    pub fn fill<R: RasterSurface + ?Sized>(&mut self, raster: &mut R) -> FillStats {
        let shape = self.shape();
        let [v1, v2, v3] = self.vertices;

        match shape {
            Shape::Degenerate => {
                debug!(
                    "degenerate triangle on row {} from x={} to x={}, nothing to fill",
                    v1.y,
                    v1.x.min(v2.x).min(v3.x),
                    v1.x.max(v2.x).max(v3.x)
                );
                FillStats::default()
            }
            Shape::FlatBottom => self.fill_flat_bottom(raster, v1, v2, v3, false),
            Shape::FlatTop => self.fill_flat_top(raster, v1, v2, v3),
            Shape::General { split_x } => {
                let split = Vertex::new(split_x, v2.y, split_z(&v1, &v2, &v3));
                let mut stats = self.fill_flat_bottom(raster, v1, v2, split, true);
                stats += self.fill_flat_top(raster, v2, split, v3);
                stats
            }
        }
    }

    /// Apex `top`, bottom corners `a` and `b` on the same row.
    fn fill_flat_bottom<R: RasterSurface + ?Sized>(
        &mut self,
        raster: &mut R,
        top: Vertex,
        a: Vertex,
        b: Vertex,
        skip_last: bool,
    ) -> FillStats {
        let (left, right) = if b.x < a.x { (b, a) } else { (a, b) };
        self.left_edge.set(top.x, top.y, left.x, left.y, top.z, left.z);
        self.right_edge.set(top.x, top.y, right.x, right.y, top.z, right.z);
        raster.fill_triangle_ammeraal(&mut self.left_edge, &mut self.right_edge, skip_last)
    }

    /// Top corners `a` and `b` on the same row, apex `bottom`.
    fn fill_flat_top<R: RasterSurface + ?Sized>(
        &mut self,
        raster: &mut R,
        a: Vertex,
        b: Vertex,
        bottom: Vertex,
    ) -> FillStats {
        let (left, right) = if b.x < a.x { (b, a) } else { (a, b) };
        self.left_edge.set(left.x, left.y, bottom.x, bottom.y, left.z, bottom.z);
        self.right_edge.set(right.x, right.y, bottom.x, bottom.y, right.z, bottom.z);
        raster.fill_triangle_ammeraal(&mut self.left_edge, &mut self.right_edge, false)
    }
}

fn segment<R: RasterSurface + ?Sized>(raster: &mut R, p: Vertex, q: Vertex) {
    raster.draw_line_ammeraal(p.x, p.y, q.x, q.y, p.z, q.z);
}
