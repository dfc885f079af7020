//! Main game loop.
//! Also acts as a facade, to hold and manage all game objects
//! (level, player, camera, renderers, inputs) and to enforce the
//! movement contract: a move that lands on a wall or outside the level
//! is rolled back to the exact pre-move position.

use crate::*;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

// frame statistics are reported this often, in seconds
const STATS_INTERVAL: f64 = 3.0;

pub struct GameLoop {
    scrbuf: ScreenBuffer,
    level: Level,
    player: Player,
    camera: Camera,
    render3d: ThreeDRenderer,
    automap: AutomapRenderer,
    inputs: InputManager,
    mode: GameMode,
    acc_time: f64,
    acc_frames: usize,
}

impl GameLoop {
    pub fn new(
        width: i32,
        height: i32,
        pixel_size: i32,
        level: Level,
        player: Player,
    ) -> Result<Self, CameraError> {
        let camera = Camera::new(width, height, DEFAULT_FOV, DEFAULT_DEPTH)?;
        Ok(Self {
            scrbuf: ScreenBuffer::new(width, height),
            level,
            player,
            camera,
            render3d: ThreeDRenderer::new(width),
            automap: AutomapRenderer::new(),
            inputs: InputManager::new(pixel_size),
            mode: GameMode::Live,
            acc_time: 0.0,
            acc_frames: 0,
        })
    }

    /// Move the player and validate the destination cell. On an invalid
    /// destination the pre-move position is restored bit-for-bit.
    /// Destination-only checking means a step of >= 1 cell could tunnel
    /// a one-cell wall; the loop keeps per-tick steps far below that.
    fn try_advance(&mut self, delta: f64) {
        let before = self.player.position();
        self.player.advance(delta);
        if self.level.is_wall_or_outside(self.player.position()) {
            self.player.set_position(before);
        }
    }

    fn update_live(&mut self, elapsed_time: f64) {
        if self.inputs.consume_key(Keycode::Tab) {
            self.mode = GameMode::Automap;
            return;
        }

        match self.inputs.movement_command() {
            InputCommand::MoveForward => self.try_advance(self.player.speed * elapsed_time),
            InputCommand::MoveBack => self.try_advance(-self.player.speed * elapsed_time),
            InputCommand::TurnLeft => self.player.turn(self.player.turn_step * elapsed_time),
            InputCommand::TurnRight => self.player.turn(-self.player.turn_step * elapsed_time),
            InputCommand::None => {}
        }

        self.camera.raycast_frame(&self.player, &self.level);
        self.render3d
            .paint(&self.camera, &self.level, &mut self.scrbuf);
    }

    fn report_frame_stats(&mut self, elapsed_time: f64) {
        self.acc_time += elapsed_time;
        self.acc_frames += 1;
        if self.acc_time >= STATS_INTERVAL {
            let avg_ms = self.acc_time * 1000.0 / self.acc_frames as f64;
            println!("avg frame: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            self.acc_time = 0.0;
            self.acc_frames = 0;
        }
    }
}

impl GraphicsLoop for GameLoop {
    fn handle_event(&mut self, event: &Event) -> bool {
        self.inputs.handle_event(event);
        // quick exit via Esc
        !self.inputs.consume_key(Keycode::Escape)
    }

    fn update_state(&mut self, elapsed_time: f64) -> bool {
        self.report_frame_stats(elapsed_time);

        match self.mode {
            GameMode::Live => self.update_live(elapsed_time),
            GameMode::Automap => {
                if let Some(mode) = self.automap.handle_inputs(&mut self.inputs, elapsed_time) {
                    self.mode = mode;
                }
                self.automap
                    .paint(&self.level, &self.player, &self.camera, &mut self.scrbuf);
            }
        }

        true
    }

    fn paint(&self, painter: &mut dyn Painter) {
        self.scrbuf.paint(painter);
    }

    fn window_title(&self) -> Option<String> {
        let p = self.player.position();
        Some(format!(
            "GRIDCASTER  |  x={:6.2} y={:6.2} dir={:5.1} {}",
            p.x,
            p.y,
            self.player.heading(),
            self.player.facing_glyph()
        ))
    }
}

//----------------------
//  Tests
