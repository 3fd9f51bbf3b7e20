mod food;
mod game;
mod grid;
mod snake;
mod term;

use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;

pub type CellInt = i16;
pub type Cell = (CellInt, CellInt);
pub type TermInt = u16;
pub type Coords = (u16, u16);

const LOG_FILE: &str = "gridsnake.log";

fn main() {
    // The terminal belongs to the game surface, diagnostics go to a file
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(LOG_FILE).expect("Error creating log file."),
    )
    .expect("Error initializing logger.");
    log::info!("starting gridsnake");

    let mut game = game::SnakeGame::new();
    game.initialize();

    // The game loop restarts lives internally and exits cleanly on CTRL+C
    game.run();
}
