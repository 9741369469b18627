use anyhow::Result;
use log::{debug, info};

use softras::prelude::*;
use softras::window::{FRAME_TIME_MS, WINDOW_HEIGHT, WINDOW_WIDTH};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut window =
        Window::new("softras", WINDOW_WIDTH, WINDOW_HEIGHT).map_err(anyhow::Error::msg)?;
    let mut buffer = RasterBuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut scene = DemoScene::new();
    let mut frame_limiter = FrameLimiter::new(&window);

    info!(
        "window {}x{} open (Esc quit, P pause, S step, A alpha blending)",
        WINDOW_WIDTH, WINDOW_HEIGHT
    );

    'frames: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'frames,
                WindowEvent::Resize(w, h) => {
                    if w > 0 && h > 0 {
                        window.resize(w, h).map_err(anyhow::Error::msg)?;
                        let config =
                            RasterConfig::new(w, h).with_alpha_blending(buffer.alpha_blending());
                        buffer = RasterBuffer::from_config(&config)?;
                        info!("resized to {w}x{h}");
                    }
                }
                WindowEvent::TogglePause => {
                    scene.toggle_pause();
                    info!("paused: {}", scene.is_paused());
                }
                WindowEvent::Step => scene.request_step(),
                WindowEvent::ToggleAlpha => {
                    let enable = !buffer.alpha_blending();
                    buffer.enable_alpha_blending(enable);
                    info!("alpha blending: {enable}");
                }
            }
        }

        let frame_ms = frame_limiter.pace(&window);
        if frame_ms > 2 * FRAME_TIME_MS {
            debug!("frame {} took {frame_ms} ms", scene.frame());
        }

        scene.advance();
        scene.render(&mut buffer)?;

        window.blit(buffer.as_bytes()).map_err(anyhow::Error::msg)?;

        // Overlay straight onto the canvas: the animated triangle's outline
        let [(x1, y1), (x2, y2), (x3, y3)] = scene.animated_vertices();
        window.set_draw_color(colors::RED);
        BresenhamRasterizer.draw_triangle(&mut window, x1, y1, x2, y2, x3, y3);

        window.present();
    }

    info!("quit after {} frames", scene.frame());
    Ok(())
}
