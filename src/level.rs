//! The level grid: cell categories, bounds / collision queries and
//! parsing from an ASCII map literal.

use crate::{Point, EPSILON};
use thiserror::Error;

/// What a single grid cell holds. Everything except `Empty` is solid -
/// it blocks movement and stops rays - but each kind keeps its own
/// identity for material/texture selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellKind {
    Empty,
    Brick,
    Eagle,
    Wood,
    Stone,
    Bluestone,
    Slime,
}

impl CellKind {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' | '.' => Some(CellKind::Empty),
            '#' => Some(CellKind::Brick),
            'E' => Some(CellKind::Eagle),
            'W' => Some(CellKind::Wood),
            'S' => Some(CellKind::Stone),
            'B' => Some(CellKind::Bluestone),
            'M' => Some(CellKind::Slime),
            _ => None,
        }
    }
}

/// A set of cell categories, as a bit mask (one bit per `CellKind`).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellSet(u16);

impl CellSet {
    /// All the solid, ray-stopping categories.
    pub const SOLID: CellSet = CellSet::empty()
        .with(CellKind::Brick)
        .with(CellKind::Eagle)
        .with(CellKind::Wood)
        .with(CellKind::Stone)
        .with(CellKind::Bluestone)
        .with(CellKind::Slime);

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn with(self, kind: CellKind) -> Self {
        Self(self.0 | (1 << kind as u16))
    }

    #[inline]
    pub fn contains(self, kind: CellKind) -> bool {
        self.0 & (1 << kind as u16) != 0
    }
}

/// Query for a cell outside the grid. Callers that mean "is this spot
/// blocked" should use [`Level::is_wall_or_outside`] instead of
/// recovering from this.
#[derive(Clone, Copy, PartialEq, Debug, Error)]
#[error("point ({x:.3}, {y:.3}) is outside the level bounds")]
pub struct OutOfBounds {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum LevelError {
    #[error("level content holds {actual} cells, expected {expected} ({width}x{height})")]
    SizeMismatch {
        width: i32,
        height: i32,
        expected: usize,
        actual: usize,
    },
    #[error("unknown map symbol {symbol:?} at cell ({x}, {y})")]
    UnknownSymbol { symbol: char, x: i32, y: i32 },
}

/// A fixed-size grid of cells, row-major, immutable once loaded.
#[derive(Debug)]
pub struct Level {
    width: i32,
    height: i32,
    cells: Vec<CellKind>,
}

impl Level {
    /// Parse an ASCII map literal of exactly `width * height` symbols,
    /// laid out row by row.
    pub fn parse(width: i32, height: i32, content: &str) -> Result<Self, LevelError> {
        let expected = (width as usize) * (height as usize);
        let actual = content.chars().count();
        if actual != expected {
            return Err(LevelError::SizeMismatch {
                width,
                height,
                expected,
                actual,
            });
        }
        let mut cells = Vec::with_capacity(expected);
        for (idx, symbol) in content.chars().enumerate() {
            match CellKind::from_symbol(symbol) {
                Some(kind) => cells.push(kind),
                None => {
                    return Err(LevelError::UnknownSymbol {
                        symbol,
                        x: (idx as i32) % width,
                        y: (idx as i32) / width,
                    });
                }
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// True iff the point lies inside the grid. The lower bound is
    /// epsilon-tolerant, so a coordinate that went marginally negative
    /// through float error still counts as inside (and truncates to
    /// cell 0).
    #[inline]
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x > -EPSILON
            && point.x < self.width as f64
            && point.y > -EPSILON
            && point.y < self.height as f64
    }

    /// The cell under `point` (coordinates truncated, not rounded).
    pub fn cell_at(&self, point: Point) -> Result<CellKind, OutOfBounds> {
        if !self.in_bounds(point) {
            return Err(OutOfBounds {
                x: point.x,
                y: point.y,
            });
        }
        let idx = (point.y as i32) * self.width + (point.x as i32);
        Ok(self.cells[idx as usize])
    }

    /// True iff the cell under `point` is in `categories`. A point
    /// outside the grid is in no category (false, not an error).
    #[inline]
    pub fn is_in_category(&self, point: Point, categories: CellSet) -> bool {
        match self.cell_at(point) {
            Ok(kind) => categories.contains(kind),
            Err(_) => false,
        }
    }

    /// Collision query: the level boundary counts as an implicit solid
    /// wall, so a point outside the grid is "wall" here.
    #[inline]
    pub fn is_wall_or_outside(&self, point: Point) -> bool {
        match self.cell_at(point) {
            Ok(kind) => CellSet::SOLID.contains(kind),
            Err(_) => true,
        }
    }

    /// The cell at integer grid coordinates, if inside the grid.
    /// Used by the map view, which walks cells directly.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<CellKind> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some(self.cells[(y * self.width + x) as usize])
        } else {
            None
        }
    }
}

//----------------------
//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn small_level() -> Level {
        // 5 x 4, a wall ring with one interior wood block at (2, 2)
        let map = "#####\
                   #   #\
                   # W #\
                   #####";
        Level::parse(5, 4, map).unwrap()
    }

    #[test]
    fn in_bounds_matches_definition() {
        let level = small_level();
        let cases = [
            (0.0, 0.0, true),
            (4.999, 3.999, true),
            (5.0, 2.0, false),
            (2.0, 4.0, false),
            (-0.5, 2.0, false),
            (2.0, -0.5, false),
        ];
        for (x, y, expected) in cases {
            assert_eq!(level.in_bounds(Point::new(x, y)), expected, "({x}, {y})");
        }
        // marginally negative through float error is tolerated
        assert!(level.in_bounds(Point::new(-1e-9, 1.0)));
        // but a clearly negative coordinate is not
        assert!(!level.in_bounds(Point::new(-0.9, 1.0)));
    }

    #[test]
    fn cell_at_truncates_coordinates() {
        let level = small_level();
        assert_eq!(level.cell_at(Point::new(2.9, 2.1)).unwrap(), CellKind::Wood);
        assert_eq!(level.cell_at(Point::new(1.5, 1.5)).unwrap(), CellKind::Empty);
        assert_eq!(level.cell_at(Point::new(0.99, 0.99)).unwrap(), CellKind::Brick);
    }

    #[test]
    fn out_of_bounds_is_an_error_not_a_wall() {
        let level = small_level();
        let outside = Point::new(7.0, 1.0);
        assert!(level.cell_at(outside).is_err());
        // the category query recovers to false
        assert!(!level.is_in_category(outside, CellSet::SOLID));
        // the collision query treats the boundary as solid
        assert!(level.is_wall_or_outside(outside));
    }

    #[test]
    fn category_sets_keep_material_identity() {
        let level = small_level();
        let wood_only = CellSet::empty().with(CellKind::Wood);
        let brick_only = CellSet::empty().with(CellKind::Brick);
        let p = Point::new(2.5, 2.5);
        assert!(level.is_in_category(p, wood_only));
        assert!(!level.is_in_category(p, brick_only));
        assert!(level.is_in_category(p, CellSet::SOLID));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            Level::parse(3, 2, "#####").unwrap_err(),
            LevelError::SizeMismatch {
                width: 3,
                height: 2,
                expected: 6,
                actual: 5
            }
        );
        assert_eq!(
            Level::parse(3, 2, "###\n##").unwrap_err(),
            LevelError::UnknownSymbol {
                symbol: '\n',
                x: 0,
                y: 1
            }
        );
    }

    #[test]
    fn dots_parse_as_empty() {
        let level = Level::parse(3, 1, "#.#").unwrap();
        assert_eq!(level.cell(1, 0), Some(CellKind::Empty));
    }
}
