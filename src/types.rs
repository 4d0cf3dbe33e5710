//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the front end. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen.
    ///
    /// This variant represents the main menu screen of the front end.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    ///
    /// This variant represents the options menu screen of the front end.
    OptionsMenu(OptionsMenuItem),
    /// Maze generation screen.
    ///
    /// This variant represents the screen where the maze is generated, animated and displayed.
    InGame,
    /// Catalog selection screen.
    ///
    /// This variant represents the catalog menu screen. It contains a list of the built-in presets
    /// and the catalog files found in the working directory.
    CatalogMenu,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Generate" menu option.
    Generate,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Every item in display order.
    pub(crate) const ALL: [Self; 3] = [Self::Generate, Self::Options, Self::Quit];

    /// Label shown for the item.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Generate => "Generate",
            Self::Options => "Options",
            Self::Quit => "Quit",
        }
    }
}

/// Options menu navigation choices.
///
/// This enumeration holds the different items in the options menu. It is used to determine which
/// items can the user select in the options menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OptionsMenuItem {
    /// "Catalog" selection option.
    Catalog,
    /// "Back" navigation option.
    Back,
}

impl OptionsMenuItem {
    /// Every item in display order.
    pub(crate) const ALL: [Self; 2] = [Self::Catalog, Self::Back];

    /// Label shown for the item.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Catalog => "Catalog",
            Self::Back => "Return",
        }
    }
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    MainMenu(u8),
    /// Options menu configuration.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the number of items in the menu.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        assert_eq!(
            Screen::MainMenu(MainMenuItem::Generate),
            Screen::MainMenu(MainMenuItem::Generate)
        );
        assert_ne!(Screen::MainMenu(MainMenuItem::Generate), Screen::InGame);
        assert_ne!(
            Screen::OptionsMenu(OptionsMenuItem::Catalog),
            Screen::CatalogMenu
        );
    }

    #[test]
    fn test_menu_items_in_display_order() {
        assert_eq!(
            MainMenuItem::ALL.map(MainMenuItem::label),
            ["Generate", "Options", "Quit"]
        );
        assert_eq!(
            OptionsMenuItem::ALL.map(OptionsMenuItem::label),
            ["Catalog", "Return"]
        );
    }

    #[test]
    fn test_menu_type_repr_and_value() {
        let main_menu = MenuType::MainMenu(3);
        let options_menu = MenuType::OptionsMenu(2);

        assert_eq!(main_menu.repr(), "Main Menu");
        assert_eq!(options_menu.repr(), "Options Menu");
        assert_eq!(main_menu.value(), 3);
        assert_eq!(options_menu.value(), 2);
    }
}
