//! The player: position + heading + movement primitives. Collision is
//! deliberately NOT checked here - that is the game loop's contract.

use crate::{Point, Vector};

// 8 compass octants, counter-clockwise from east, with '→' repeated so
// headings just below 360° wrap onto the same glyph.
const FACING_GLYPHS: [char; 9] = ['→', '↗', '↑', '↖', '←', '↙', '↓', '↘', '→'];

pub struct Player {
    position: Point,
    heading: f64, // degrees, always in [0, 360)
    pub speed: f64,
    pub turn_step: f64,
}

impl Player {
    pub fn new(position: Point, heading_degrees: f64, speed: f64, turn_step: f64) -> Self {
        Self {
            position,
            heading: heading_degrees.rem_euclid(360.0),
            speed,
            turn_step,
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Move `delta` cells along the current heading (negative = back).
    /// The new position is NOT validated - callers roll back via
    /// [`Player::set_position`] when the destination turns out blocked.
    pub fn advance(&mut self, delta: f64) {
        self.position = Vector::from_polar(self.position, self.heading, delta).end_point();
    }

    /// Replace the position wholesale (used for the collision rollback,
    /// which must restore the pre-move position bit-for-bit).
    #[inline]
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn turn(&mut self, delta_degrees: f64) {
        self.heading = (self.heading + delta_degrees).rem_euclid(360.0);
    }

    /// Directional indicator for the heading's compass octant
    /// (boundaries at k*45° + 22.5°).
    pub fn facing_glyph(&self) -> char {
        FACING_GLYPHS[((self.heading + 22.5) / 45.0) as usize]
    }
}

//----------------------
//  Tests
