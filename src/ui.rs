//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::Line,
    widgets::{
        canvas::{Canvas, Context, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    animation::{self, CELL_SCALE},
    elements::MapElement,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item),
        Screen::InGame => in_game(app, frame)?,
        Screen::CatalogMenu => catalog_menu(app, frame),
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both main and options menus.
/// The generic part includes the centered positioning and border styling, while the specific menu
/// content is handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: &MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders one line per menu entry, highlighting the active one.
fn render_entries<'label, I>(frame: &mut Frame, areas: &[Rect], entries: I)
where
    I: IntoIterator<Item = (&'label str, bool)>,
{
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for ((label, active), area) in entries.into_iter().zip(areas) {
        let style = if active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(label).centered().style(style), *area);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Generate", "Options", and "Quit". It
/// highlights the currently selected option.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::MainMenu(3));
    render_entries(
        frame,
        &inner_layout,
        MainMenuItem::ALL
            .into_iter()
            .map(|entry| (entry.label(), entry == item)),
    );
}

/// Renders the options menu screen with configuration choices.
///
/// This function displays the options menu with choices for "Catalog" selection and "Return" to
/// the main menu. It provides the same navigation highlighting as the main menu.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::OptionsMenu(2));
    render_entries(
        frame,
        &inner_layout,
        OptionsMenuItem::ALL
            .into_iter()
            .map(|entry| (entry.label(), entry == item)),
    );
}

/// Renders the catalog selection menu with a scrollable list of available catalogs.
///
/// This function displays a viewport containing the built-in presets and the catalog files found
/// in the current directory. The entry under the cursor is highlighted and the catalog in use is
/// marked with a dot.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn catalog_menu(app: &mut App, frame: &mut Frame) {
    clear(frame);

    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Fill(1),
        Constraint::Percentage(30),
    ])
    .split(frame.area())[1];
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Fill(1),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let block = Block::bordered()
        .title_top("Catalog list")
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(space);

    frame.render_widget(block, space);

    app.viewport_height = inner_space.height.into();

    let inner_layout = Layout::horizontal([Constraint::Percentage(5), Constraint::Percentage(100)])
        .split(inner_space);
    let inner_selector = Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()])
        .split(inner_layout[0]);
    let inner_list = Layout::vertical(vec![Constraint::Max(1); inner_space.height.into()])
        .split(inner_layout[1]);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let viewport = app
        .presets
        .iter()
        .enumerate()
        .skip(app.viewport_offset)
        .zip(inner_selector.iter().zip(inner_list.iter()));
    for ((index, preset), (selector_area, entry_area)) in viewport {
        let style = if index == app.viewport_cursor {
            active_content_style
        } else {
            content_style
        };
        let marker = if *preset == app.preset { DOT } else { " " };

        frame.render_widget(Line::styled(marker, style).centered(), *selector_area);
        frame.render_widget(Line::styled(preset.key.as_str(), style), *entry_area);
    }
}

/// Renders the in-game screen with the maze being generated.
///
/// This function draws every settled cell as a small square of wall points on a [`Canvas`], marks
/// tunnels, placed elements and the most recent placement, and shows the run's seed, strategy and
/// void count in a footer.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let manager = &app.animation_manager;
    let size = manager.view.size();
    let extent = size * CELL_SCALE;

    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());
    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let space = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(extent)?),
        Constraint::Min(1),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;
    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(extent)?),
        Constraint::Min(1),
    ])
    .split(space)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    let wall_screen_coords =
        animation::transform_maze_to_screen_coords(&animation::wall_coords(&manager.view), extent)?;

    let (tunnel_centers, element_marks) = manager.outcome.as_ref().map_or_else(
        || (Vec::new(), Vec::new()),
        |outcome| {
            let tunnels = outcome
                .maze
                .cells()
                .filter(|(position, _)| outcome.tunnels.is_tunnel(*position))
                .map(|(position, _)| animation::cell_center(position, size))
                .collect::<Vec<_>>();
            let elements = outcome
                .elements
                .iter()
                .map(|(position, element)| (animation::cell_center(*position, size), *element))
                .collect::<Vec<_>>();
            (tunnels, elements)
        },
    );
    let tunnel_screen_coords = animation::transform_maze_to_screen_coords(&tunnel_centers, extent)?;
    let (element_points, element_kinds): (Vec<_>, Vec<_>) = element_marks.into_iter().unzip();
    let element_screen_coords =
        animation::transform_maze_to_screen_coords(&element_points, extent)?;
    let last_screen_coords = animation::transform_maze_to_screen_coords(
        &manager
            .last_placed
            .map(|position| animation::cell_center(position, size))
            .into_iter()
            .collect::<Vec<_>>(),
        extent,
    )?;

    let maze = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_screen_coords,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &tunnel_screen_coords,
                color: Color::Yellow,
            });
            ctx.draw(&Points {
                coords: &last_screen_coords,
                color: Color::Red,
            });
            print_elements(ctx, &element_screen_coords, &element_kinds);
        });

    frame.render_widget(maze, space);

    let tooltip_block = Block::bordered()
        .title(status_line(app))
        .title_bottom("(r) regenerate / (h) return to menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

/// Prints the symbol of each placed element at its screen coordinates.
fn print_elements(ctx: &mut Context<'_>, coords: &[(f64, f64)], elements: &[MapElement]) {
    for ((x, y), element) in coords.iter().zip(elements) {
        ctx.print(
            *x,
            *y,
            Line::styled(element.symbol().to_string(), Style::default().fg(Color::Magenta)),
        );
    }
}

/// Summarizes the run on screen for the footer.
fn status_line(app: &App) -> String {
    let manager = &app.animation_manager;
    let seed = manager
        .seed
        .map_or_else(|| "-".to_owned(), |seed| seed.to_string());
    let strategy = format!("{:?}", app.settings.strategy).to_lowercase();

    if let Some(error) = &manager.error {
        return format!("seed {seed} / {strategy} / {error}");
    }
    let state = if manager.is_running() {
        "generating"
    } else {
        app.preset.key.as_str()
    };
    format!(
        "{state} / seed {seed} / {strategy} / {voids} void",
        voids = manager.void_count()
    )
}
