//! Color type and blending helpers.
//!
//! Colors are stored as non-premultiplied RGBA8, the same layout as the
//! backing [`image::RgbaImage`] of the raster buffer, so a pen color can be
//! written into the image without conversion.

use image::Rgba;

/// An RGBA8 color, non-premultiplied.
pub type Color = Rgba<u8>;

pub const BACKGROUND: Color = Rgba([127, 127, 127, 255]);
pub const WHITE: Color = Rgba([255, 255, 255, 255]);
pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const RED: Color = Rgba([255, 0, 0, 255]);
pub const GREEN: Color = Rgba([0, 255, 0, 255]);
pub const BLUE: Color = Rgba([0, 0, 255, 255]);
pub const ORANGE: Color = Rgba([255, 127, 0, 255]);
/// Half transparent cyan, used by the demo scene to show blending.
pub const CYAN_TRANSLUCENT: Color = Rgba([0, 255, 255, 127]);

/// Build a color from its four channels.
#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Rgba([r, g, b, a])
}

/// Composite `src` over `dst` with standard "over" blending.
///
/// Each color channel becomes `src * alpha + dst * (1 - alpha)` where
/// `alpha = src.a / 255`, rounded to the nearest integer. The result is
/// always fully opaque.
#[inline]
pub fn blend_over(src: Color, dst: Color) -> Color {
    let alpha = src[3] as f32 / 255.0;
    let mix = |s: u8, d: u8| -> u8 {
        (s as f32 * alpha + d as f32 * (1.0 - alpha))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        255,
    ])
}
