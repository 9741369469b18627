//! A CPU-based software rasterizer.
//!
//! Triangles with integer screen coordinates and per-vertex depth are
//! decomposed into flat-top and flat-bottom halves and scan-converted with
//! Bresenham edge walkers into a depth-tested color buffer. Lines are drawn
//! with the same integer walk. SDL2 is only used (behind the `window`
//! feature) to show the result.
//!
//! # Quick Start
//!
//! ```no_run
//! use softras::prelude::*;
//!
//! # fn main() -> Result<(), RasterError> {
//! let mut buffer = RasterBuffer::new(320, 240)?;
//! let mut triangle = Triangle::new();
//!
//! buffer.set_pixel_color(colors::ORANGE);
//! triangle.set(40, 20, 10, 200, 300, 120);
//! triangle.fill(&mut buffer);
//! buffer.save_png("triangle.png")?;
//! # Ok(())
//! # }
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod demo;
pub mod error;
#[cfg(feature = "window")]
pub mod window;

// Internal layout; the types are re-exported below
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use colors::Color;
pub use config::RasterConfig;
pub use error::RasterError;
pub use render::{
    BresenhamRasterizer, Direction, Edge, EdgeWalker, FillStats, LineWalk, PixelSink, PixelStats,
    PixelStatus, RasterBuffer, RasterSurface, Rasterizer, Rounding, RowSpan, Shape, Triangle,
    Vertex,
};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softras::prelude::*;
/// ```
pub mod prelude {
    // Colors
    pub use crate::colors::{self, Color};

    // Configuration & errors
    pub use crate::config::RasterConfig;
    pub use crate::error::RasterError;

    // Drawing targets
    pub use crate::render::{PixelSink, PixelStatus, RasterBuffer, RasterSurface};

    // Primitives
    pub use crate::render::{
        BresenhamRasterizer, Direction, Edge, EdgeWalker, Rasterizer, Triangle, Vertex,
    };

    // Demo
    pub use crate::demo::DemoScene;

    // Window & Input
    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
