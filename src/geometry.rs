//! Geometric primitives: points in level-grid units (1.0 = one cell)
//! and vectors anchored at an origin point, with cached trigonometry.

/// An immutable 2D point, in level-grid units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A vector anchored at an origin point.
///
/// Angles are in degrees, 0° = +x axis, increasing counter-clockwise
/// *on screen* - since the screen y axis grows downwards, the y
/// component is `-length * sin(direction)`.
///
/// The sin/cos of the direction are computed once at construction;
/// [`Vector::with_length`] re-derives the components from them, which is
/// what makes the ray-marching inner loop cheap.
#[derive(Clone, Copy, Debug)]
pub struct Vector {
    origin: Point,
    dx: f64,
    dy: f64,
    length: f64,
    direction: f64,
    sin: f64,
    cos: f64,
}

impl Vector {
    /// Construct from origin, direction (degrees) and length.
    pub fn from_polar(origin: Point, direction_degrees: f64, length: f64) -> Self {
        let direction = direction_degrees.rem_euclid(360.0);
        let (sin, cos) = direction.to_radians().sin_cos();
        Self {
            origin,
            dx: cos * length,
            dy: -sin * length,
            length,
            direction,
            sin,
            cos,
        }
    }

    /// Construct from origin and end point; length and direction are derived.
    pub fn between(origin: Point, end_point: Point) -> Self {
        let dx = end_point.x - origin.x;
        let dy = end_point.y - origin.y;
        let length = dx.hypot(dy);
        let direction = derive_direction(dx, dy);
        let (sin, cos) = if length > 0.0 {
            (-dy / length, dx / length)
        } else {
            direction.to_radians().sin_cos()
        };
        Self {
            origin,
            dx,
            dy,
            length,
            direction,
            sin,
            cos,
        }
    }

    /// A copy of this vector scaled to `length`, re-deriving dx/dy from
    /// the cached sin/cos (the direction never changes, so the cache
    /// cannot go stale).
    #[inline]
    pub fn with_length(&self, length: f64) -> Self {
        Self {
            dx: self.cos * length,
            dy: -self.sin * length,
            length,
            ..*self
        }
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Direction in degrees. For polar-built vectors this is normalized
    /// into [0, 360); for point-built vectors it comes from the arctan
    /// derivation (range (-90, 270]).
    #[inline]
    pub fn direction_degrees(&self) -> f64 {
        self.direction
    }

    #[inline]
    pub fn end_point(&self) -> Point {
        Point::new(self.origin.x + self.dx, self.origin.y + self.dy)
    }
}

// Angle of a (dx, dy) displacement, in degrees. The dx = 0 case is
// fixed by convention: 90° if dy >= 0, else 270°.
fn derive_direction(dx: f64, dy: f64) -> f64 {
    if dx == 0.0 {
        if dy >= 0.0 {
            90.0
        } else {
            270.0
        }
    } else {
        let mut angle = (-dy / dx).atan().to_degrees();
        if dx < 0.0 {
            angle += 180.0;
        }
        angle
    }
}

//----------------------
//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_axes() {
        let o = Point::new(3.0, 4.0);
        let east = Vector::from_polar(o, 0.0, 2.0).end_point();
        assert!((east.x - 5.0).abs() < 1e-9 && (east.y - 4.0).abs() < 1e-9);
        // screen y is inverted: 90° points up-screen (smaller y)
        let up = Vector::from_polar(o, 90.0, 2.0).end_point();
        assert!((up.x - 3.0).abs() < 1e-9 && (up.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn direction_is_normalized() {
        let v = Vector::from_polar(Point::new(0.0, 0.0), -30.0, 1.0);
        assert!((v.direction_degrees() - 330.0).abs() < 1e-9);
        let w = Vector::from_polar(Point::new(0.0, 0.0), 725.0, 1.0);
        assert!((w.direction_degrees() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_polar_to_points() {
        let o = Point::new(2.0, 3.0);
        let v = Vector::from_polar(o, 33.0, 5.0);
        let w = Vector::between(o, v.end_point());
        assert!((w.length() - 5.0).abs() < 1e-6);
        assert!((w.direction_degrees() - 33.0).abs() < 1e-6);
    }

    #[test]
    fn vertical_direction_convention() {
        let o = Point::new(1.0, 1.0);
        let down = Vector::between(o, Point::new(1.0, 3.0));
        assert_eq!(down.direction_degrees(), 90.0);
        let up = Vector::between(o, Point::new(1.0, 0.0));
        assert_eq!(up.direction_degrees(), 270.0);
    }

    #[test]
    fn with_length_keeps_invariant() {
        let v = Vector::from_polar(Point::new(0.0, 0.0), 45.0, 2.0);
        let w = v.with_length(6.0);
        assert!((w.length() - 6.0).abs() < 1e-12);
        assert!((w.dx().hypot(w.dy()) - w.length()).abs() < 1e-9);
        assert!((w.direction_degrees() - v.direction_degrees()).abs() < 1e-12);
    }

    #[test]
    fn length_always_matches_components() {
        let v = Vector::between(Point::new(1.0, 2.0), Point::new(4.0, 6.0));
        assert!((v.length() - 5.0).abs() < 1e-9);
        assert!((v.dx().hypot(v.dy()) - v.length()).abs() < 1e-9);
    }
}
