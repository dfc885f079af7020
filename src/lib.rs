//! GRIDCASTER - a grid-based raycasting engine, WOLF3D style :)
//! Main library.

mod automap;
mod camera;
mod defs;
mod gameloop;
mod geometry;
mod input;
mod level;
mod player;
mod projection;
mod render3d;
mod scrbuf;
mod sdl_wrapper;

pub use automap::*;
pub use camera::*;
pub use defs::*;
pub use gameloop::*;
pub use geometry::*;
pub use input::*;
pub use level::*;
pub use player::*;
pub use projection::*;
pub use render3d::*;
pub use scrbuf::*;
pub use sdl_wrapper::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Live,
    Automap,
}
