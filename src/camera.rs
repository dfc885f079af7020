//! The camera: casts one ray per screen column through the level grid,
//! using coarse-to-fine marching, and derives the fisheye-corrected
//! distance map plus the wall-edge flags for the current frame.

use crate::{
    CellSet, Level, Player, Point, Vector, EDGE_ANGLE_THRESHOLD, EDGE_DEPTH_JUMP, MARCH_STEPS,
    MIN_WALL_DIST,
};
use thiserror::Error;

#[derive(Clone, PartialEq, Debug, Error)]
pub enum CameraError {
    #[error("field of view must be in (0, 180) degrees, got {0}")]
    BadFov(f64),
    #[error("max depth must be positive, got {0}")]
    BadDepth(f64),
    #[error("viewport must be at least 1x1, got {0}x{1}")]
    BadViewport(i32, i32),
}

/// Per-frame ray casting state. The output arrays are preallocated to
/// the viewport width and overwritten wholesale by every
/// [`Camera::raycast_frame`] call - readers must consume them before
/// the next frame is cast.
pub struct Camera {
    fov: f64,       // degrees
    max_depth: f64, // cells
    vp_width: i32,
    vp_height: i32,
    march_steps: [f64; 3],
    z_map: Vec<f64>,
    hits: Vec<Vector>,
    edges: Vec<bool>,
}

impl Camera {
    pub fn new(
        vp_width: i32,
        vp_height: i32,
        fov_degrees: f64,
        max_depth: f64,
    ) -> Result<Self, CameraError> {
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(CameraError::BadFov(fov_degrees));
        }
        if !(max_depth > 0.0) {
            return Err(CameraError::BadDepth(max_depth));
        }
        if vp_width < 1 || vp_height < 1 {
            return Err(CameraError::BadViewport(vp_width, vp_height));
        }
        let w = vp_width as usize;
        Ok(Self {
            fov: fov_degrees,
            max_depth,
            vp_width,
            vp_height,
            march_steps: MARCH_STEPS,
            z_map: vec![max_depth; w],
            hits: vec![Vector::from_polar(Point::new(0.0, 0.0), 0.0, 0.0); w],
            edges: vec![false; w],
        })
    }

    #[inline]
    pub fn max_depth(&self) -> f64 {
        self.max_depth
    }

    #[inline]
    pub fn vp_width(&self) -> i32 {
        self.vp_width
    }

    #[inline]
    pub fn vp_height(&self) -> i32 {
        self.vp_height
    }

    /// Fisheye-corrected distance per column, rebuilt each frame.
    #[inline]
    pub fn z_map(&self) -> &[f64] {
        &self.z_map
    }

    /// The raw hit vector per column, rebuilt each frame.
    #[inline]
    pub fn hits(&self) -> &[Vector] {
        &self.hits
    }

    /// Wall-edge flag per column, rebuilt each frame.
    #[inline]
    pub fn edges(&self) -> &[bool] {
        &self.edges
    }

    /// Angular offset of column `x` from the view axis, in degrees.
    /// Column 0 is the left edge of the field of view.
    #[inline]
    pub fn column_offset(&self, x: i32) -> f64 {
        (x as f64 / self.vp_width as f64) * self.fov - self.fov / 2.0
    }

    /// Cast a single ray from `origin` towards `angle_degrees`, looking
    /// for the first cell in `targets`.
    ///
    /// The march is three-pass: a coarse pass finds the hit cell, then
    /// each refinement pass steps back one previous-pass increment and
    /// re-marches at the finer step. Leaving the grid forces a miss at
    /// `max_depth`. The returned vector's length is the hit distance,
    /// or `max_depth` on a miss - never more, never negative.
    pub fn cast_ray(
        &self,
        level: &Level,
        origin: Point,
        angle_degrees: f64,
        targets: CellSet,
    ) -> Vector {
        let ray = Vector::from_polar(origin, angle_degrees, 0.0);
        let coarse = self.march_steps[0];

        let mut dist = 0.0;
        let mut hit = false;
        while !hit && dist < self.max_depth {
            dist += coarse;
            let probe = ray.with_length(dist).end_point();
            if !level.in_bounds(probe) {
                // outside the grid: nothing further can be hit
                dist = self.max_depth;
            } else if level.is_in_category(probe, targets) {
                hit = true;
            }
        }

        if hit {
            for pair in self.march_steps.windows(2) {
                let (back, step) = (pair[0], pair[1]);
                dist -= back;
                while dist < self.max_depth {
                    dist += step;
                    let probe = ray.with_length(dist).end_point();
                    if level.is_in_category(probe, targets) {
                        break;
                    }
                }
            }
        }

        ray.with_length(dist.min(self.max_depth))
    }

    /// Cast the whole ray fan for one frame and rebuild `z_map`, `hits`
    /// and `edges`.
    pub fn raycast_frame(&mut self, player: &Player, level: &Level) {
        self.edges.fill(false);
        let mut prev_dist: Option<f64> = None;

        for x in 0..self.vp_width {
            let offset = self.column_offset(x);
            let ray_angle = player.heading() + offset;
            let ray = self.cast_ray(level, player.position(), ray_angle, CellSet::SOLID);
            let raw_dist = ray.length();
            let wall_hit = raw_dist < self.max_depth;
            let xi = x as usize;

            // a ray grazing a block corner marks this column as an edge
            if wall_hit && ray_grazes_corner(player.position(), &ray) {
                self.edges[xi] = true;
            }
            // a sharp distance jump between neighbour columns marks the
            // column that sees past the corner
            if let Some(prev) = prev_dist {
                if prev - raw_dist > EDGE_DEPTH_JUMP {
                    self.edges[xi] = true;
                } else if raw_dist - prev > EDGE_DEPTH_JUMP {
                    self.edges[xi - 1] = true;
                }
            }
            prev_dist = Some(raw_dist);

            // radial distance would bend straight walls ("magnifying
            // glass" look); multiplying by the cosine of the off-axis
            // offset yields the perpendicular wall distance
            let corrected = (raw_dist * offset.to_radians().cos()).max(MIN_WALL_DIST);

            self.hits[xi] = ray;
            self.z_map[xi] = corrected;
        }
    }
}

//--------------------------
// Internal stuff

// Does the ray pass within a fraction of a degree of one of the two
// nearest lattice corners around its hit point? Tolerant by design -
// it only feeds the visual edge highlight.
fn ray_grazes_corner(player_pos: Point, ray: &Vector) -> bool {
    let hit = ray.end_point();
    let base_x = hit.x.trunc();
    let base_y = hit.y.trunc();

    let mut corners = [
        Vector::between(player_pos, Point::new(base_x, base_y)),
        Vector::between(player_pos, Point::new(base_x + 1.0, base_y)),
        Vector::between(player_pos, Point::new(base_x, base_y + 1.0)),
        Vector::between(player_pos, Point::new(base_x + 1.0, base_y + 1.0)),
    ];
    corners.sort_unstable_by(|a, b| a.length().partial_cmp(&b.length()).unwrap());

    let ray_dir = ray.direction_degrees();
    (ray_dir - corners[0].direction_degrees()).abs() < EDGE_ANGLE_THRESHOLD
        || (ray_dir - corners[1].direction_degrees()).abs() < EDGE_ANGLE_THRESHOLD
}

//----------------------
//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    fn corridor_level() -> Level {
        // 12 x 3, empty except a wall column at x = 10
        let row = "          # ";
        let map: String = [row; 3].concat();
        Level::parse(12, 3, &map).unwrap()
    }

    fn empty_level() -> Level {
        Level::parse(8, 8, &" ".repeat(64)).unwrap()
    }

    fn walled_room() -> Level {
        // 16 x 16 square room bordered by walls
        let mut map = String::new();
        for y in 0..16 {
            for x in 0..16 {
                let border = x == 0 || x == 15 || y == 0 || y == 15;
                map.push(if border { '#' } else { ' ' });
            }
        }
        Level::parse(16, 16, &map).unwrap()
    }

    fn camera(w: i32, h: i32) -> Camera {
        Camera::new(w, h, 60.0, 21.0).unwrap()
    }

    #[test]
    fn construction_fails_fast_on_bad_config() {
        assert!(matches!(
            Camera::new(64, 48, 0.0, 21.0),
            Err(CameraError::BadFov(_))
        ));
        assert!(matches!(
            Camera::new(64, 48, 60.0, -1.0),
            Err(CameraError::BadDepth(_))
        ));
        assert!(matches!(
            Camera::new(0, 48, 60.0, 21.0),
            Err(CameraError::BadViewport(0, 48))
        ));
    }

    #[test]
    fn ray_due_east_hits_wall_with_subcell_precision() {
        let level = corridor_level();
        let cam = camera(4, 4);
        let ray = cam.cast_ray(&level, Point::new(2.0, 1.5), 0.0, CellSet::SOLID);
        // wall face at x = 10, origin at x = 2 => distance 8, +-0.01
        assert!(
            (ray.length() - 8.0).abs() <= 0.0101,
            "got {}",
            ray.length()
        );
    }

    #[test]
    fn ray_into_boundary_misses_at_exactly_max_depth() {
        let level = empty_level();
        let cam = camera(4, 4);
        let ray = cam.cast_ray(&level, Point::new(1.0, 1.0), 0.0, CellSet::SOLID);
        assert_eq!(ray.length(), cam.max_depth());
    }

    #[test]
    fn ray_length_is_always_within_range() {
        let level = walled_room();
        let cam = camera(4, 4);
        for angle in [0.0, 17.0, 45.0, 90.0, 133.0, 180.0, 261.5, 359.0] {
            let ray = cam.cast_ray(&level, Point::new(8.0, 8.0), angle, CellSet::SOLID);
            assert!(ray.length() >= 0.0);
            assert!(ray.length() <= cam.max_depth());
        }
    }

    #[test]
    fn center_column_has_no_fisheye_correction() {
        let level = walled_room();
        // with an even width, the center column looks along the view axis
        let mut cam = camera(4, 4);
        assert_eq!(cam.column_offset(2), 0.0);
        let player = Player::new(Point::new(8.0, 8.0), 0.0, 1.0, 5.0);
        cam.raycast_frame(&player, &level);
        assert!((cam.z_map()[2] - cam.hits()[2].length()).abs() < 1e-12);
    }

    #[test]
    fn off_axis_column_is_cosine_corrected() {
        let level = walled_room();
        let mut cam = camera(4, 4);
        // column 0 sits at -fov/2 = -30 degrees
        assert_eq!(cam.column_offset(0), -30.0);
        let player = Player::new(Point::new(8.0, 8.0), 0.0, 1.0, 5.0);
        cam.raycast_frame(&player, &level);
        let raw = cam.hits()[0].length();
        let expected = raw * 30.0_f64.to_radians().cos();
        assert!((cam.z_map()[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn adjacent_wall_clamps_corrected_distance() {
        let level = walled_room();
        let mut cam = camera(4, 4);
        // half a cell away from the east wall
        let player = Player::new(Point::new(14.5, 8.0), 0.0, 1.0, 5.0);
        cam.raycast_frame(&player, &level);
        for &z in cam.z_map() {
            assert!(z >= 1.0);
        }
        assert_eq!(cam.z_map()[2], 1.0);
    }

    #[test]
    fn depth_jump_between_columns_marks_an_edge() {
        // a lone block in an otherwise huge empty area: some columns
        // hit it, the neighbours miss past it entirely
        let mut map = " ".repeat(16 * 16).into_bytes();
        map[8 * 16 + 8] = b'#';
        let level = Level::parse(16, 16, std::str::from_utf8(&map).unwrap()).unwrap();

        let mut cam = Camera::new(32, 32, 60.0, 21.0).unwrap();
        let player = Player::new(Point::new(3.0, 8.5), 0.0, 1.0, 5.0);
        cam.raycast_frame(&player, &level);

        assert!(cam.hits().iter().any(|h| h.length() < cam.max_depth()));
        assert!(cam.edges().iter().any(|&e| e));
    }

    #[test]
    fn corner_graze_flags_the_column_mid_cell_does_not() {
        let level = corridor_level();
        let cam = camera(4, 4);
        let origin = Point::new(2.0, 1.5);

        // aimed exactly at the lattice corner (10, 1) of the wall face
        let to_corner = (0.5_f64 / 8.0).atan().to_degrees();
        let graze = cam.cast_ray(&level, origin, to_corner, CellSet::SOLID);
        assert!(graze.length() < cam.max_depth());
        assert!(ray_grazes_corner(origin, &graze));

        // straight into the middle of the wall face: no corner nearby
        let mid = cam.cast_ray(&level, origin, 0.0, CellSet::SOLID);
        assert!(mid.length() < cam.max_depth());
        assert!(!ray_grazes_corner(origin, &mid));
    }

    #[test]
    fn frame_arrays_are_fully_rebuilt() {
        let level = walled_room();
        let mut cam = camera(8, 8);
        let player = Player::new(Point::new(8.0, 8.0), 0.0, 1.0, 5.0);
        cam.raycast_frame(&player, &level);
        let first: Vec<f64> = cam.z_map().to_vec();

        // turning around must overwrite every column
        let player = Player::new(Point::new(4.0, 4.0), 135.0, 1.0, 5.0);
        cam.raycast_frame(&player, &level);
        assert_eq!(cam.z_map().len(), first.len());
        assert!(cam.z_map().iter().zip(&first).any(|(a, b)| a != b));
    }
}
