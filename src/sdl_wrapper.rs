//! Thin wrapper over SDL2 - owns the window, canvas, event pump and
//! frame clock, and drives a [`GraphicsLoop`] implementation.

use sdl2::event::Event;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::time::{Duration, Instant};

/// Where the renderers put their pixels. The only pixel sink the core
/// knows about; the SDL canvas implements it during the paint phase.
pub trait Painter {
    fn put_pixel(&mut self, x: i32, y: i32, color: u32);
}

/// Implemented by the game loop facade; called back by
/// [`run_game_loop`] once per frame, in this order.
pub trait GraphicsLoop {
    /// Return `false` to quit.
    fn handle_event(&mut self, event: &Event) -> bool;
    /// Return `false` to quit. `elapsed_time` is in seconds.
    fn update_state(&mut self, elapsed_time: f64) -> bool;
    fn paint(&self, painter: &mut dyn Painter);
    /// Optional window title for this frame (applied at most a few
    /// times per second).
    fn window_title(&self) -> Option<String> {
        None
    }
}

/// How to wait between frames.
#[derive(Clone, Copy)]
pub enum SleepKind {
    NONE,
    YIELD,
    SLEEP(u64), // milliseconds
}

pub struct SdlConfiguration {
    name: String,
    width: i32,
    height: i32,
    pixel_size: i32,
    sleep_kind: SleepKind,
}

impl SdlConfiguration {
    pub fn new(name: &str, width: i32, height: i32, pixel_size: i32, sleep_kind: SleepKind) -> Self {
        assert!(width > 0 && height > 0 && pixel_size > 0);
        Self {
            name: name.to_string(),
            width,
            height,
            pixel_size,
            sleep_kind,
        }
    }
}

/// Run the main game loop until quit (window closed, or the loop
/// implementation returns `false`).
pub fn run_game_loop(cfg: &SdlConfiguration, gfx_loop: &mut dyn GraphicsLoop) -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let win_width = (cfg.width * cfg.pixel_size) as u32;
    let win_height = (cfg.height * cfg.pixel_size) as u32;
    let window = video_subsystem
        .window(&cfg.name, win_width, win_height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let mut event_pump = sdl_context.event_pump()?;

    let mut last_moment = Instant::now();
    let mut last_title_update: Option<Instant> = None;

    'running: loop {
        // consume the event queue
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                _ => {
                    if !gfx_loop.handle_event(&event) {
                        break 'running;
                    }
                }
            }
        }

        // update state, based on elapsed time
        let next_moment = Instant::now();
        let elapsed_time = next_moment.duration_since(last_moment).as_secs_f64();
        last_moment = next_moment;
        if !gfx_loop.update_state(elapsed_time) {
            break 'running;
        }

        let title_due = match last_title_update {
            Some(t) => next_moment.duration_since(t) >= TITLE_UPDATE_INTERVAL,
            None => true,
        };
        if title_due {
            if let Some(title) = gfx_loop.window_title() {
                if let Err(e) = canvas.window_mut().set_title(&title) {
                    println!("[WARN] failed to set window title: {e}");
                }
                last_title_update = Some(next_moment);
            }
        }

        // paint everything
        canvas.set_draw_color(Color::BLACK);
        canvas.clear();
        let mut painter = CanvasPainter {
            canvas: &mut canvas,
            pixel_size: cfg.pixel_size,
        };
        gfx_loop.paint(&mut painter);
        canvas.present();

        // let the CPU breathe
        match cfg.sleep_kind {
            SleepKind::NONE => {}
            SleepKind::YIELD => std::thread::yield_now(),
            SleepKind::SLEEP(ms) => std::thread::sleep(Duration::from_millis(ms)),
        }
    }

    Ok(())
}

//--------------------------
// Internal stuff

const TITLE_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

struct CanvasPainter<'a> {
    canvas: &'a mut Canvas<Window>,
    pixel_size: i32,
}

impl Painter for CanvasPainter<'_> {
    fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        let r = ((color >> 16) & 0xFF) as u8;
        let g = ((color >> 8) & 0xFF) as u8;
        let b = (color & 0xFF) as u8;
        self.canvas.set_draw_color(Color::RGB(r, g, b));
        if self.pixel_size == 1 {
            let _ = self.canvas.draw_point(sdl2::rect::Point::new(x, y));
        } else {
            let ps = self.pixel_size;
            let _ = self
                .canvas
                .fill_rect(Rect::new(x * ps, y * ps, ps as u32, ps as u32));
        }
    }
}
