//! AutomapRenderer - top-down view of the level grid, the player and
//! the current frame's ray fan.

use crate::*;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;

// constants for movement and scaling speeds
const DEFAULT_SCALE: f64 = 14.5;
const MIN_SCALE: f64 = 4.5;
const MAX_SCALE: f64 = 40.5;
const MOVE_SPEED: f64 = 12.0;
const SCALE_SPEED: f64 = 8.0;
const MIN_POS: f64 = -14.0;
const MAX_POS: f64 = 60.0;
const DIV_MOUSE: f64 = 12.0;

const GRID_EMPTY_COLOR: u32 = rgb(26, 26, 30);
const RAY_COLOR: u32 = rgb(90, 90, 70);
const PLAYER_COLOR: u32 = rgb(250, 250, 250);
const HEADING_COLOR: u32 = rgb(250, 60, 60);

pub struct AutomapRenderer {
    xpos: f64,
    ypos: f64,
    scale: f64,
}

impl AutomapRenderer {
    pub fn new() -> Self {
        Self {
            xpos: 0.0,
            ypos: 0.0,
            scale: DEFAULT_SCALE,
        }
    }

    pub fn handle_inputs(&mut self, inputs: &mut InputManager, elapsed_time: f64) -> Option<GameMode> {
        if inputs.consume_key(Keycode::Tab) {
            return Some(GameMode::Live);
        }

        if inputs.key(Keycode::W) || inputs.key(Keycode::Up) {
            self.ypos = (self.ypos - MOVE_SPEED * elapsed_time).clamp(MIN_POS, MAX_POS);
        } else if inputs.key(Keycode::S) || inputs.key(Keycode::Down) {
            self.ypos = (self.ypos + MOVE_SPEED * elapsed_time).clamp(MIN_POS, MAX_POS);
        }

        if inputs.key(Keycode::A) || inputs.key(Keycode::Left) {
            self.xpos = (self.xpos - MOVE_SPEED * elapsed_time).clamp(MIN_POS, MAX_POS);
        } else if inputs.key(Keycode::D) || inputs.key(Keycode::Right) {
            self.xpos = (self.xpos + MOVE_SPEED * elapsed_time).clamp(MIN_POS, MAX_POS);
        }

        if inputs.key(Keycode::KpMinus) {
            self.scale = (self.scale - SCALE_SPEED * elapsed_time).clamp(MIN_SCALE, MAX_SCALE);
        } else if inputs.key(Keycode::KpPlus) {
            self.scale = (self.scale + SCALE_SPEED * elapsed_time).clamp(MIN_SCALE, MAX_SCALE);
        }

        if inputs.mouse_btn(MouseButton::Left) {
            let (dx, dy) = inputs.mouse_motion();
            self.xpos = (self.xpos - (dx as f64) / DIV_MOUSE).clamp(MIN_POS, MAX_POS);
            self.ypos = (self.ypos - (dy as f64) / DIV_MOUSE).clamp(MIN_POS, MAX_POS);
        }

        None
    }

    pub fn paint(
        &self,
        level: &Level,
        player: &Player,
        camera: &Camera,
        scrbuf: &mut ScreenBuffer,
    ) {
        let sw = scrbuf.width();
        let sh = scrbuf.height();
        scrbuf.fill_rect(0, 0, sw, sh, 0);

        let scl = self.scale as i32;

        // the level grid
        for y in 0..level.height() {
            for x in 0..level.width() {
                let ix = ((x as f64 - self.xpos) * self.scale) as i32;
                let iy = ((y as f64 - self.ypos) * self.scale) as i32;
                if let Some(kind) = level.cell(x, y) {
                    let color = if kind == CellKind::Empty {
                        GRID_EMPTY_COLOR
                    } else {
                        scale_rgb(material_color(kind), 0.8)
                    };
                    scrbuf.fill_rect(ix, iy, scl - 1, scl - 1, color);
                }
            }
        }

        // the current ray fan, thinned out
        let (px, py) = self.to_screen(player.position());
        for hit in camera.hits().iter().step_by(4) {
            let (hx, hy) = self.to_screen(hit.end_point());
            scrbuf.draw_line(px, py, hx, hy, RAY_COLOR);
        }

        // the player marker and its heading
        let look = Vector::from_polar(player.position(), player.heading(), 1.5);
        let (lx, ly) = self.to_screen(look.end_point());
        scrbuf.draw_line(px, py, lx, ly, HEADING_COLOR);
        scrbuf.fill_rect(px - 2, py - 2, 5, 5, PLAYER_COLOR);
    }

    #[inline]
    fn to_screen(&self, p: Point) -> (i32, i32) {
        (
            ((p.x - self.xpos) * self.scale) as i32,
            ((p.y - self.ypos) * self.scale) as i32,
        )
    }
}

impl Default for AutomapRenderer {
    fn default() -> Self {
        Self::new()
    }
}
