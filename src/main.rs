mod config;
mod game;
mod grid;
mod input;
mod logger;
mod snake;
mod state;
mod term;
mod timer;

use anyhow::Result;
use clap::Parser;
use log::info;

use crate::config::Settings;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    let settings = Settings::parse();
    logger::init(&settings.log_file, settings.log_level.into())?;
    info!("Starting snake with {:?}", settings);

    let mut game = game::SnakeGame::new(&settings)?;
    game.initialize()?;

    let result = match game.show_intro() {
        Ok(true) => game.play(),
        Ok(false) => Ok(()),
        Err(e) => Err(e),
    };

    // The terminal has to be back to normal before any error gets printed
    game.shutdown()?;
    info!("Bye");
    result
}
