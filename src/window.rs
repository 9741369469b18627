//! SDL2 window host (feature `window`).
//!
//! The window shows a [`RasterBuffer`](crate::RasterBuffer) by streaming its
//! RGBA bytes into a texture. It is also a [`PixelSink`], so overlays can be
//! drawn straight onto the canvas after the blit.

use std::time::Duration;

use log::warn;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::{Point, Rect};

use crate::colors::Color;
use crate::render::PixelSink;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 60;
/// Frame budget in whole milliseconds.
pub const FRAME_TIME_MS: u64 = 1000 / FPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    TogglePause,
    Step,
    ToggleAlpha,
}

/// Holds the demo at [`FPS`] frames per second.
///
/// The scene moves one step per frame rather than per elapsed time, so the
/// limiter is what keeps the animation speed steady.
pub struct FrameLimiter {
    frame_start: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            frame_start: window.timer().ticks64(),
        }
    }

    /// Sleep out the rest of the frame budget and start the next frame.
    ///
    /// Returns how long the finished frame took in milliseconds, sleep
    /// included. A value above [`FRAME_TIME_MS`] means the frame overran.
    pub fn pace(&mut self, window: &Window) -> u64 {
        let elapsed = window.timer().ticks64().saturating_sub(self.frame_start);
        if let Some(wait) = remaining_wait(elapsed) {
            std::thread::sleep(wait);
        }
        let now = window.timer().ticks64();
        let frame_time = now.saturating_sub(self.frame_start);
        self.frame_start = now;
        frame_time
    }
}

/// Time left in the frame budget after `elapsed_ms`, if any.
fn remaining_wait(elapsed_ms: u64) -> Option<Duration> {
    FRAME_TIME_MS
        .checked_sub(elapsed_ms)
        .filter(|&ms| ms > 0)
        .map(Duration::from_millis)
}

/// Translate one SDL event into the demo's controls.
fn map_event(event: &Event) -> Option<WindowEvent> {
    match *event {
        Event::Quit { .. }
        | Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } => Some(WindowEvent::Quit),
        Event::KeyDown {
            keycode: Some(Keycode::P),
            repeat: false,
            ..
        } => Some(WindowEvent::TogglePause),
        // Held S keeps stepping
        Event::KeyDown {
            keycode: Some(Keycode::S),
            ..
        } => Some(WindowEvent::Step),
        Event::KeyDown {
            keycode: Some(Keycode::A),
            repeat: false,
            ..
        } => Some(WindowEvent::ToggleAlpha),
        Event::Window {
            win_event: sdl2::event::WindowEvent::Resized(w, h),
            ..
        } => Some(WindowEvent::Resize(w.max(0) as u32, h.max(0) as u32)),
        _ => None,
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Field order matters: the texture borrows from the creator and must drop first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = Self::create_texture(&texture_creator, width, height)?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Streaming texture matching the raster buffer's byte order (R, G, B, A in memory).
    fn create_texture(
        texture_creator: &sdl2::render::TextureCreator<sdl2::video::WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<sdl2::render::Texture<'static>, String> {
        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared before texture_creator, so it drops first.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drain the SDL queue, keeping every event the demo reacts to in order.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.event_pump
            .poll_iter()
            .filter_map(|event| map_event(&event))
            .collect()
    }

    /// Upload a frame of RGBA8 bytes (`width * 4` per row) and copy it to the canvas.
    pub fn blit(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        Ok(())
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

impl PixelSink for Window {
    fn set_draw_color(&mut self, color: Color) {
        let [r, g, b, a] = color.0;
        self.canvas
            .set_draw_color(sdl2::pixels::Color::RGBA(r, g, b, a));
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        if let Err(e) = self.canvas.draw_point(Point::new(x, y)) {
            warn!("draw_point({x}, {y}) failed: {e}");
        }
    }
}
