//! InputManager - handles keyboard & mouse and derives the per-tick
//! movement command for the player.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use std::collections::HashMap;

/// The discrete movement command for one tick. At most one fires per
/// tick; when several keys are held, movement takes priority over turning.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputCommand {
    MoveForward,
    MoveBack,
    TurnLeft,
    TurnRight,
    None,
}

pub struct InputManager {
    // keys and mouse buttons together, by converting their enum values to i32
    pressed: HashMap<i32, bool>,
    // accumulated mouse movement since last consumed
    mouse_rel_x: i32,
    mouse_rel_y: i32,
    pixel_size: i32,
}

impl InputManager {
    pub fn new(pixel_size: i32) -> Self {
        Self {
            pressed: HashMap::new(),
            mouse_rel_x: 0,
            mouse_rel_y: 0,
            pixel_size,
        }
    }

    /// The movement command for this tick, from the currently held keys.
    pub fn movement_command(&self) -> InputCommand {
        if self.key(Keycode::W) || self.key(Keycode::Up) {
            InputCommand::MoveForward
        } else if self.key(Keycode::S) || self.key(Keycode::Down) {
            InputCommand::MoveBack
        } else if self.key(Keycode::A) || self.key(Keycode::Left) {
            InputCommand::TurnLeft
        } else if self.key(Keycode::D) || self.key(Keycode::Right) {
            InputCommand::TurnRight
        } else {
            InputCommand::None
        }
    }

    #[inline]
    pub fn key(&self, key: Keycode) -> bool {
        self.pressed.contains_key(&key2code(key))
    }

    /// True if the key is pressed; also marks it consumed, so it fires
    /// once per press (used for mode toggles).
    #[inline]
    pub fn consume_key(&mut self, key: Keycode) -> bool {
        self.consume_input(key2code(key))
    }

    #[inline]
    pub fn mouse_btn(&self, mb: MouseButton) -> bool {
        self.pressed.contains_key(&mousebtn2code(mb))
    }

    /// Relative mouse motion since the last call (consumed).
    #[inline]
    pub fn mouse_motion(&mut self) -> (i32, i32) {
        let ret = (self.mouse_rel_x, self.mouse_rel_y);
        self.mouse_rel_x = 0;
        self.mouse_rel_y = 0;
        ret
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::KeyDown { keycode: Some(key), .. } => {
                self.set_pressed(key2code(*key));
            }
            Event::KeyUp { keycode: Some(key), .. } => {
                self.set_released(key2code(*key));
            }
            Event::MouseButtonDown { mouse_btn, .. } => {
                self.set_pressed(mousebtn2code(*mouse_btn));
            }
            Event::MouseButtonUp { mouse_btn, .. } => {
                self.set_released(mousebtn2code(*mouse_btn));
            }
            Event::MouseMotion { xrel, yrel, .. } => {
                self.mouse_rel_x += *xrel / self.pixel_size;
                self.mouse_rel_y += *yrel / self.pixel_size;
            }
            _ => {}
        }
    }

    #[inline]
    fn set_pressed(&mut self, keybtn: i32) {
        self.pressed.entry(keybtn).or_insert(true);
    }

    #[inline]
    fn set_released(&mut self, keybtn: i32) {
        self.pressed.remove(&keybtn);
    }

    fn consume_input(&mut self, code: i32) -> bool {
        let mut pressed = false;
        if let Some(flag) = self.pressed.get_mut(&code) {
            pressed = *flag;
            *flag = false;
        }
        pressed
    }
}

//------------------
//  Internal stuff

#[inline(always)]
fn key2code(key: Keycode) -> i32 {
    key as i32
}

#[inline(always)]
fn mousebtn2code(mb: MouseButton) -> i32 {
    (mb as i32) - 1000
}
