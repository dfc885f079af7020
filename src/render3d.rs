//! ThreeDRenderer - paints the first-person view from the camera's
//! per-column ray results.

use crate::*;

const CEILING_COLOR: u32 = rgb(40, 44, 52);
const EDGE_COLOR: u32 = rgb(12, 12, 12);

// mortar seam width, in texture-fraction units
const MORTAR_WIDTH: f64 = 0.04;

pub struct ThreeDRenderer {
    // per-frame draw commands, reused to avoid reallocation
    columns: Vec<ColumnDraw>,
}

impl ThreeDRenderer {
    pub fn new(vp_width: i32) -> Self {
        Self {
            columns: Vec::with_capacity(vp_width as usize),
        }
    }

    pub fn paint(&mut self, camera: &Camera, level: &Level, scrbuf: &mut ScreenBuffer) {
        let w = scrbuf.width();
        let h = scrbuf.height();

        // ceiling, then the row-banded floor
        scrbuf.fill_rect(0, 0, w, h / 2, CEILING_COLOR);
        for y in h / 2..h {
            scrbuf.fill_rect(0, y, w, 1, floor_color(floor_shade(y, h)));
        }

        // walls, one column per screen x
        build_columns(camera, level, &mut self.columns);
        for col in &self.columns {
            if col.shade == WallShade::Beyond {
                continue;
            }
            let color = if col.edge {
                EDGE_COLOR
            } else {
                column_color(col)
            };
            scrbuf.fill_rect(col.x, col.y_top, 1, col.y_bot - col.y_top, color);
        }
    }
}

/// Base color of a wall material.
pub fn material_color(kind: CellKind) -> u32 {
    match kind {
        CellKind::Empty => 0,
        CellKind::Brick => rgb(178, 48, 42),
        CellKind::Eagle => rgb(140, 110, 62),
        CellKind::Wood => rgb(120, 78, 40),
        CellKind::Stone => rgb(128, 132, 136),
        CellKind::Bluestone => rgb(56, 86, 158),
        CellKind::Slime => rgb(70, 140, 60),
    }
}

//----------------------
// Internal stuff

fn column_color(col: &ColumnDraw) -> u32 {
    let lit = scale_rgb(material_color(col.material), shade_factor(col.shade));
    // a cheap mortar stripe from the texture-column fraction, so the
    // wall grid reads even without real textures
    if col.tex_u < MORTAR_WIDTH || col.tex_u > 1.0 - MORTAR_WIDTH {
        scale_rgb(lit, 0.6)
    } else {
        lit
    }
}

fn shade_factor(shade: WallShade) -> f64 {
    match shade {
        WallShade::Solid => 1.0,
        WallShade::Dark => 0.75,
        WallShade::Medium => 0.55,
        WallShade::Light => 0.35,
        WallShade::Beyond => 0.0,
    }
}

fn floor_color(shade: FloorShade) -> u32 {
    match shade {
        FloorShade::Dense => rgb(96, 88, 76),
        FloorShade::Cross => rgb(78, 72, 62),
        FloorShade::Wave => rgb(62, 58, 50),
        FloorShade::Dash => rgb(48, 46, 40),
        FloorShade::Blank => rgb(36, 35, 32),
    }
}
