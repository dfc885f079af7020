//! GRIDCASTER - a grid-based raycasting engine, WOLF3D style :)
//! Main starting point.

use anyhow::Result;
use gridcaster::*;

const SCR_WIDTH: i32 = 480;
const SCR_HEIGHT: i32 = 360;
const PIXEL_SIZE: i32 = 2;
const SLEEP_KIND: SleepKind = SleepKind::SLEEP(1);

const MAP_WIDTH: i32 = 25;
const MAP_HEIGHT: i32 = 16;
const MAP_CELLS: &str = concat!(
    "#########################",
    "#.......................#",
    "#....SSSSSSSSM..........#",
    "#............M..........#",
    "#............M..........#",
    "#............M..........#",
    "#............SSSSS......#",
    "#....BBB................#",
    "#....BBB.....W......##..#",
    "#............W......##..#",
    "#............W..........#",
    "#............W..........#",
    "#........E######E.......#",
    "#.......................#",
    "#.......................#",
    "#########################",
);

fn main() -> Result<()> {
    let level = Level::parse(MAP_WIDTH, MAP_HEIGHT, MAP_CELLS)?;
    let player = Player::new(Point::new(2.0, 2.0), 45.0, MOVE_SPEED, TURN_SPEED);
    let mut gameloop = GameLoop::new(SCR_WIDTH, SCR_HEIGHT, PIXEL_SIZE, level, player)?;

    let sdl_config = SdlConfiguration::new("GRIDCASTER", SCR_WIDTH, SCR_HEIGHT, PIXEL_SIZE, SLEEP_KIND);
    run_game_loop(&sdl_config, &mut gameloop).map_err(anyhow::Error::msg)?;

    println!("GRIDCASTER finished OK :)");
    Ok(())
}
