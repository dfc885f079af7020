//!  Various constants and small definitions.

/// Tolerance used for bounds checks and axis-aligned ray tests.
pub const EPSILON: f64 = 1e-6;

// camera defaults
pub const DEFAULT_FOV: f64 = 60.0;
pub const DEFAULT_DEPTH: f64 = 21.0;

/// Marching step sizes, coarse to fine. Each pass after the first steps
/// back one previous-pass increment and re-marches at the finer step,
/// so the final hit precision equals the last entry.
pub const MARCH_STEPS: [f64; 3] = [1.0, 0.1, 0.01];

/// Corrected distances are clamped to this minimum, so a wall right in
/// the player's face cannot project to a near-infinite column height.
pub const MIN_WALL_DIST: f64 = 1.0;

// edge-detection thresholds (tunable, visual-only)
pub const EDGE_ANGLE_THRESHOLD: f64 = 0.25; // degrees off a block corner
pub const EDGE_DEPTH_JUMP: f64 = 1.0; // cells, between adjacent columns

// player defaults
pub const MOVE_SPEED: f64 = 3.5; // cells per second
pub const TURN_SPEED: f64 = 120.0; // degrees per second
