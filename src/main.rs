//! This crate contains the source code for the binary of the labyrinth maze generator.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use labyrinth::{generate, logging, App, Cli};

fn main() -> Result<()> {
    install()?;
    let cli = Cli::parse();
    logging::init(&cli.log_file)?;

    if cli.print {
        let maze = generate(&cli.generator_config()?)?;
        print!("{maze}");
        println!("seed {}", maze.seed());
        return Ok(());
    }

    let mut app = App::from_cli(&cli)?;
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
