//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::Result;
use log::warn;

use crate::{
    catalog_loader,
    elements::ElementCounts,
    generator::{GeneratorConfig, Strategy},
    preset::Preset,
    tile::TileCatalog,
};

/// Smallest grid size accepted from the user.
pub const MIN_SIZE: usize = 5;

/// Largest grid size accepted from the user.
pub const MAX_SIZE: usize = 50;

/// Grid size used when none is given.
pub const DEFAULT_SIZE: usize = 20;

/// Delay between two animation frames when none is given, in milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 30;

/// Command-line arguments of the labyrinth binary.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Side length of the square grid, clamped to 5..=50.
    #[arg(short, long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,
    /// Seed of the first maze; later regenerations draw fresh seeds.
    #[arg(long)]
    pub seed: Option<u64>,
    /// How the grid gets filled.
    #[arg(long, value_enum, default_value_t = Strategy::Propagate)]
    pub strategy: Strategy,
    /// A `.labtiles` catalog file to generate from instead of the default catalog.
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,
    /// Number of monsters to place.
    #[arg(long, default_value_t = 1)]
    pub monsters: usize,
    /// Number of wells to place.
    #[arg(long, default_value_t = 2)]
    pub wells: usize,
    /// Number of teleports to place.
    #[arg(long, default_value_t = 2)]
    pub teleports: usize,
    /// Delay between two animation frames, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
    pub frame_delay_ms: u64,
    /// Show each maze at once instead of animating its generation.
    #[arg(long)]
    pub no_animate: bool,
    /// Generate one maze, print it to standard output and exit.
    #[arg(short, long)]
    pub print: bool,
    /// File the log is written to.
    #[arg(long, default_value = "labyrinth.log")]
    pub log_file: PathBuf,
}

impl Cli {
    /// Turns the arguments into the settings of the terminal front end.
    pub(crate) fn settings(&self) -> Settings {
        Settings {
            size: clamp_size(self.size),
            seed: self.seed,
            strategy: self.strategy,
            elements: self.element_counts(),
            frame_delay: Duration::from_millis(self.frame_delay_ms),
            animate: !self.no_animate,
        }
    }

    /// Loads the catalog file named on the command line, or the default preset.
    pub(crate) fn preset(&self) -> Result<Preset> {
        self.catalog
            .as_deref()
            .map_or_else(|| Ok(Preset::default()), catalog_loader::load_file)
    }

    /// Builds the configuration of a single generation run.
    ///
    /// # Errors
    ///
    /// This function may return errors if the catalog file cannot be read or parsed.
    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        let settings = self.settings();
        Ok(settings.generator_config(self.preset()?.catalog, settings.seed))
    }

    /// Element counts requested on the command line.
    #[must_use]
    pub const fn element_counts(&self) -> ElementCounts {
        ElementCounts {
            monsters: self.monsters,
            teleports: self.teleports,
            wells: self.wells,
        }
    }
}

/// Settings of the terminal front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Side length of the grid, already clamped.
    pub(crate) size: usize,
    /// Seed of the first maze.
    pub(crate) seed: Option<u64>,
    /// Filling strategy.
    pub(crate) strategy: Strategy,
    /// Elements placed on every maze.
    pub(crate) elements: ElementCounts,
    /// Delay between two animation frames.
    pub(crate) frame_delay: Duration,
    /// Whether generation is animated.
    pub(crate) animate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            strategy: Strategy::default(),
            elements: ElementCounts::default(),
            frame_delay: Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
            animate: true,
        }
    }
}

impl Settings {
    /// Builds the configuration of one generation run over `catalog`.
    pub(crate) fn generator_config(
        &self,
        catalog: TileCatalog,
        seed: Option<u64>,
    ) -> GeneratorConfig {
        let config = GeneratorConfig::new(self.size, catalog).with_strategy(self.strategy);
        match seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Clamps a requested grid size to the accepted range, logging any change.
pub(crate) fn clamp_size(size: usize) -> usize {
    let clamped = size.clamp(MIN_SIZE, MAX_SIZE);
    if clamped != size {
        warn!("grid size {size} is out of range, using {clamped}");
    }
    clamped
}
