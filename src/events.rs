//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::{
    catalog_loader,
    preset::Preset,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. While a maze is being generated the poll timeout shrinks
/// to the animation frame delay so placements keep flowing.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = if app.animation_manager.is_running() {
        app.settings.frame_delay.min(Duration::from_millis(100))
    } else {
        Duration::from_millis(100)
    };

    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key.code)?;
        }
    }

    if matches!(app.screen, Screen::InGame) {
        app.animation_manager.update();
    }

    Ok(())
}

/// Dispatches a single key press.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app)?,
        KeyCode::Char('h') => handle_h_events(app),
        KeyCode::Char('r') => handle_r_events(app)?,
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// This function processes the 'j' key press which is used for moving down in menus and lists.
/// In the catalog menu the viewport scrolls along once the cursor reaches its bottom edge.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Generate) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Catalog) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        Screen::CatalogMenu if app.viewport_cursor + 1 < app.presets.len() => {
            app.viewport_cursor += 1;
            if app.viewport_cursor >= app.viewport_offset + app.viewport_height.max(1) {
                app.viewport_offset += 1;
            }
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
///
/// This function processes the 'k' key press which is used for moving up in menus and lists.
/// Like the 'j' handler, the catalog menu viewport follows the cursor.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Catalog);
        }
        Screen::CatalogMenu if app.viewport_cursor > 0 => {
            app.viewport_cursor -= 1;
            if app.viewport_cursor < app.viewport_offset {
                app.viewport_offset = app.viewport_cursor;
            }
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items and moving
/// forward in the application flow. It handles screen transitions, catalog loading, and starting
/// a generation run.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Generate) => {
            app.screen = Screen::InGame;
            app.start_generation(app.settings.seed)?;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Catalog);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Catalog) => {
            app.screen = Screen::CatalogMenu;

            app.presets = Preset::builtin();
            if !app.presets.contains(&app.preset) {
                app.presets.push(app.preset.clone());
            }
            catalog_loader::fetch_files(&mut app.presets)?;
            app.viewport_cursor = app
                .presets
                .iter()
                .position(|preset| *preset == app.preset)
                .unwrap_or_default();
            app.viewport_offset = 0;
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::CatalogMenu => {
            if let Some(preset) = app.presets.get(app.viewport_cursor) {
                app.preset = preset.clone();
            }
        }
        Screen::InGame => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// This function processes the 'h' key press which is used for moving back or returning to
/// previous screens. It handles returning from the in-game screen to the main menu and from the
/// catalog menu to the options menu.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            app.animation_manager.clear();
            app.screen = Screen::MainMenu(MainMenuItem::Generate);
        }
        Screen::CatalogMenu => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Catalog);
        }
        _ => {}
    }
}

/// Handles 'r' key press events, regenerating the maze with a fresh seed.
pub(crate) fn handle_r_events(app: &mut App) -> Result<()> {
    if matches!(app.screen, Screen::InGame) {
        app.start_generation(None)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_on(screen: Screen) -> App {
        let mut app = App::default();
        app.screen = screen;
        app
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut app = app_on(Screen::MainMenu(MainMenuItem::Generate));

        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));
        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));
        handle_k_events(&mut app);
        handle_k_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
    }

    #[test]
    fn test_quit_from_menu_and_key() {
        let mut app = app_on(Screen::MainMenu(MainMenuItem::Quit));
        handle_l_events(&mut app).expect("quitting never fails");
        assert!(app.exit);

        let mut app = app_on(Screen::InGame);
        handle_key(&mut app, KeyCode::Char('q')).expect("quitting never fails");
        assert!(app.exit);
    }

    #[test]
    fn test_options_menu_navigation() {
        let mut app = app_on(Screen::MainMenu(MainMenuItem::Options));

        handle_l_events(&mut app).expect("entering options never fails");
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Catalog));
        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Back));
        handle_l_events(&mut app).expect("returning never fails");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
    }

    #[test]
    fn test_catalog_menu_cursor_and_selection() {
        let mut app = app_on(Screen::CatalogMenu);
        app.presets = Preset::builtin();
        app.viewport_height = 2;

        handle_k_events(&mut app);
        assert_eq!(app.viewport_cursor, 0);

        handle_j_events(&mut app);
        handle_j_events(&mut app);
        assert_eq!(app.viewport_cursor, 2);
        assert_eq!(app.viewport_offset, 1, "viewport follows the cursor down");

        handle_j_events(&mut app);
        handle_j_events(&mut app);
        assert_eq!(app.viewport_cursor, 3, "cursor stops at the last preset");

        handle_l_events(&mut app).expect("selecting never fails");
        assert_eq!(app.preset.key, "Cross");

        handle_k_events(&mut app);
        handle_k_events(&mut app);
        handle_k_events(&mut app);
        assert_eq!(app.viewport_cursor, 0);
        assert_eq!(app.viewport_offset, 0, "viewport follows the cursor up");

        handle_h_events(&mut app);
        assert_eq!(app.screen, Screen::OptionsMenu(OptionsMenuItem::Catalog));
    }

    #[test]
    fn test_generate_and_return() {
        let mut app = app_on(Screen::MainMenu(MainMenuItem::Generate));
        app.settings.size = 5;
        app.settings.seed = Some(3);
        app.settings.animate = false;

        handle_l_events(&mut app).expect("generation starts");
        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.animation_manager.seed, Some(3));
        assert!(app.animation_manager.outcome.is_some());

        handle_h_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Generate));
        assert!(app.animation_manager.outcome.is_none());
    }

    #[test]
    fn test_regenerate_only_in_game() {
        let mut app = app_on(Screen::MainMenu(MainMenuItem::Generate));
        app.settings.animate = false;

        handle_r_events(&mut app).expect("ignored outside the game");
        assert!(app.animation_manager.seed.is_none());

        app.screen = Screen::InGame;
        handle_r_events(&mut app).expect("generation starts");
        assert!(app.animation_manager.seed.is_some());
    }
}
