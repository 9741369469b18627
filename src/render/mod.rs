//! The rasterization core.
//!
//! Leaf first:
//! - [`line`]: Bresenham stepping state shared by everything below
//! - [`edge`]: edge walkers bounding a scanline fill
//! - [`surface`]: the [`PixelSink`] and [`RasterSurface`] drawing targets
//! - [`raster_buffer`]: color + depth buffer, the one [`RasterSurface`]
//! - [`triangle`]: sort, split and fill of screen-space triangles
//! - [`rasterizer`]: line and outline drawing onto any [`PixelSink`]

pub mod edge;
pub mod line;
pub mod raster_buffer;
pub mod rasterizer;
pub mod surface;
pub mod triangle;

pub use edge::{Edge, EdgeWalker, RowSpan};
pub use line::{Direction, LineWalk, Rounding};
pub use raster_buffer::RasterBuffer;
pub use rasterizer::{BresenhamRasterizer, Rasterizer};
pub use surface::{FillStats, PixelSink, PixelStats, PixelStatus, RasterSurface};
pub use triangle::{Shape, Triangle, Vertex};
