//! Projection: turns per-column ray results into screen-space draw
//! commands (vertical extent, shade band, material, texture column).

use crate::{Camera, CellKind, Level, Vector};

// a hit this close to a cell border in x means the ray struck a wall
// face perpendicular to the x axis
const TEX_AXIS_EPS: f64 = 0.01;

/// Wall shade bands, nearest to farthest. The thresholds are fractions
/// of the configured view depth, so the banding scales with any depth.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WallShade {
    Solid,  // z <= depth/3
    Dark,   // z <  depth/2
    Medium, // z <  depth/1.5
    Light,  // z <  depth
    Beyond, // at or past the view depth: background
}

pub fn wall_shade(z: f64, max_depth: f64) -> WallShade {
    if z <= max_depth / 3.0 {
        WallShade::Solid
    } else if z < max_depth / 2.0 {
        WallShade::Dark
    } else if z < max_depth / 1.5 {
        WallShade::Medium
    } else if z < max_depth {
        WallShade::Light
    } else {
        WallShade::Beyond
    }
}

/// Floor fill bands, by distance from the screen's vertical center
/// (a cheap row-banded approximation, identical for every column).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FloorShade {
    Dense,
    Cross,
    Wave,
    Dash,
    Blank,
}

pub fn floor_shade(y: i32, vp_height: i32) -> FloorShade {
    let half = vp_height as f64 / 2.0;
    let floor_dist = 1.0 - ((y as f64) - half) / half;
    if floor_dist < 0.25 {
        FloorShade::Dense
    } else if floor_dist < 0.5 {
        FloorShade::Cross
    } else if floor_dist < 0.75 {
        FloorShade::Wave
    } else if floor_dist < 0.9 {
        FloorShade::Dash
    } else {
        FloorShade::Blank
    }
}

/// Unclamped vertical extent of the wall column at corrected distance
/// `z`: symmetric about the screen center, height snapped to an even
/// number so near-equal neighbour columns don't jitter by one pixel.
pub fn column_bounds(vp_height: i32, z: f64) -> (i32, i32) {
    let mut height = (vp_height as f64 / z) as i32;
    if height % 2 != 0 {
        height -= 1;
    }
    let y_top = vp_height / 2 - height;
    (y_top, vp_height - y_top)
}

/// Horizontal texture coordinate (fraction in [0, 1)) of the wall spot
/// the ray hit. If the hit is on a cell border in x, the wall face is
/// perpendicular to the x axis and the fractional y selects the texture
/// column; otherwise the fractional x does.
pub fn wall_tex_fraction(hit: &Vector) -> f64 {
    let end = hit.end_point();
    let fx = end.x - end.x.floor();
    if fx < TEX_AXIS_EPS || fx > 1.0 - TEX_AXIS_EPS {
        end.y - end.y.floor()
    } else {
        fx
    }
}

/// One wall column, ready for the presentation surface.
pub struct ColumnDraw {
    pub x: i32,
    pub y_top: i32, // clamped to the viewport
    pub y_bot: i32,
    pub shade: WallShade,
    pub material: CellKind, // Empty when the ray missed
    pub tex_u: f64,
    pub edge: bool,
}

/// Build the draw commands for every column of the camera's current
/// frame into `out` (cleared first; the buffer is reused frame to
/// frame).
pub fn build_columns(camera: &Camera, level: &Level, out: &mut Vec<ColumnDraw>) {
    out.clear();
    let vp_h = camera.vp_height();
    for x in 0..camera.vp_width() {
        let xi = x as usize;
        let z = camera.z_map()[xi];
        let hit = &camera.hits()[xi];
        let (y_top, y_bot) = column_bounds(vp_h, z);
        let material = level.cell_at(hit.end_point()).unwrap_or(CellKind::Empty);
        out.push(ColumnDraw {
            x,
            y_top: y_top.max(0),
            y_bot: y_bot.min(vp_h - 1),
            shade: wall_shade(z, camera.max_depth()),
            material,
            tex_u: wall_tex_fraction(hit),
            edge: camera.edges()[xi] && z < camera.max_depth(),
        });
    }
}

//----------------------
//  Tests
