//! Core application state and logic for the terminal front end.

use color_eyre::eyre::Result;
use log::info;
use ratatui::DefaultTerminal;

use crate::{
    animation::AnimationManager,
    config::{Cli, Settings},
    events,
    preset::Preset,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the maze generator front end.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the interface and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen. It is used to determine which screen to render and
    /// what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Generation settings taken from the command line.
    pub(crate) settings: Settings,
    /// Currently active tile catalog.
    ///
    /// This field always holds a catalog, either the default preset or one selected by the user
    /// in the catalog menu.
    pub(crate) preset: Preset,
    /// Collection of all available catalogs.
    ///
    /// This field holds the built-in presets followed by the catalog files found in the current
    /// working directory, refreshed whenever the catalog menu is opened.
    pub(crate) presets: Vec<Preset>,
    /// Index of the preset under the cursor in the catalog menu.
    pub(crate) viewport_cursor: usize,
    /// Scrolling offset for the catalog list viewport.
    ///
    /// This field holds the offset by which to scroll the sliding window into the
    /// [`presets`](App::presets) vector in the catalog menu's viewport.
    pub(crate) viewport_offset: usize,
    /// Height of the catalog list rendering area.
    ///
    /// This field holds the height of the area in which the list of presets is being rendered as
    /// a measure of terminal cells during the last redraw of the on-screen frame.
    pub(crate) viewport_height: usize,
    /// Animation manager for the generation run on screen.
    pub(crate) animation_manager: AnimationManager,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default(), Preset::default())
    }
}

impl App {
    /// Creates a new instance of the App structure from its settings and starting catalog.
    pub(crate) fn new(settings: Settings, preset: Preset) -> Self {
        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Generate),
            animation_manager: AnimationManager::new(settings.frame_delay),
            settings,
            presets: vec![preset.clone()],
            preset,
            viewport_cursor: 0,
            viewport_offset: 0,
            viewport_height: 0,
        }
    }

    /// Creates the application from command-line arguments.
    ///
    /// # Errors
    ///
    /// This function may return errors if the catalog file named on the command line cannot be
    /// read or parsed.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self::new(cli.settings(), cli.preset()?))
    }

    /// Starts generating a maze from the active catalog.
    ///
    /// A missing `seed` draws a fresh one.
    ///
    /// # Errors
    ///
    /// This function may return errors if the active catalog is rejected.
    pub(crate) fn start_generation(&mut self, seed: Option<u64>) -> Result<()> {
        let config = self
            .settings
            .generator_config(self.preset.catalog.clone(), seed);
        info!("generating with the {} catalog", self.preset.key);

        self.animation_manager
            .start(&config, self.settings.elements, self.settings.animate)
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
