//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod component;
pub mod expectancy_input;
pub mod file_selector;
pub mod layout;
pub mod legend;
pub mod status_bar;
pub mod theme;
pub mod timeline_view;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDateTime};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::scan_catalog;
use crate::config::Config;
use crate::constants::MAX_LIFE_EXPECTANCY;
use crate::models::LifeConfig;
use crate::parser::load_life_config;
use crate::services::timeline::{map_lifetime, map_year, LifetimeGrid, YearGrid};

// Re-export TUI components
pub use component::{Component, ContextualComponent};
pub use expectancy_input::{ExpectancyInput, ExpectancyInputEvent};
pub use file_selector::{FileSelector, FileSelectorEvent};
pub use layout::ScreenLayout;
pub use legend::{Legend, LegendEntry};
pub use status_bar::StatusBar;
pub use theme::Theme;
pub use timeline_view::{LifetimeView, YearView};

/// Which grid is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One cell per ~30-day month of the whole life
    #[default]
    Lifetime,
    /// One cell per day of the selected year
    Yearly,
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Something went as expected
    Info,
    /// A load or scan failed
    Error,
}

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text
    pub text: String,
    /// Message severity
    pub kind: StatusKind,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Application state owned by the UI loop.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application settings
    pub config: Config,
    /// Directory the catalog is scanned from
    pub data_dir: PathBuf,
    /// Candidate life config files
    pub catalog: Vec<PathBuf>,
    /// File selector and its dropdown
    pub selector: FileSelector,
    /// Life expectancy text input
    pub expectancy_input: ExpectancyInput,
    /// Last successfully loaded life config
    pub life: Option<LifeConfig>,
    /// Life expectancy used for the grid (always >= 1)
    pub life_expectancy: u32,
    /// Active view
    pub view: ViewMode,
    /// Year shown by the yearly view
    pub selected_year: i32,
    /// Active theme
    pub theme: Theme,
    /// Last status message
    pub status: Option<StatusMessage>,
    /// Screen area of the last frame
    pub screen: Rect,
    /// Set when the user asked to quit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the state for a scanned catalog.
    #[must_use]
    pub fn new(config: Config, data_dir: PathBuf, catalog: Vec<PathBuf>, theme: Theme) -> Self {
        let life_expectancy = config
            .ui
            .default_life_expectancy
            .clamp(1, MAX_LIFE_EXPECTANCY);

        Self {
            config,
            data_dir,
            catalog,
            selector: FileSelector::new(),
            expectancy_input: ExpectancyInput::new(life_expectancy),
            life: None,
            life_expectancy,
            view: ViewMode::default(),
            selected_year: Local::now().year(),
            theme,
            status: None,
            screen: Rect::default(),
            should_quit: false,
        }
    }

    /// Layout of the current screen.
    #[must_use]
    pub fn layout(&self) -> ScreenLayout {
        self.layout_for(self.screen)
    }

    /// Layout for an arbitrary screen area.
    #[must_use]
    pub fn layout_for(&self, area: Rect) -> ScreenLayout {
        ScreenLayout::compute(area, self.catalog.len(), self.legend_entries().len())
    }

    /// Dispatches a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.screen = Rect::new(0, 0, width, height),
            _ => {}
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.selector.is_open()
            && matches!(
                key.code,
                KeyCode::Up | KeyCode::Down | KeyCode::Enter | KeyCode::Esc | KeyCode::Tab
            )
        {
            if let Some(event) = self.selector.handle_input(key, &self.catalog) {
                self.apply_selector_event(event);
            }
            return;
        }

        if self.expectancy_input.handle_input(key).is_some() {
            self.apply_expectancy_input();
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Char('f') => self.selector.toggle(),
            KeyCode::Char('v') => self.toggle_view(),
            KeyCode::Char('[') => self.change_year(-1),
            KeyCode::Char(']') => self.change_year(1),
            KeyCode::Char('r') => self.rescan(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    /// Handles a mouse event. Only left-button presses do anything.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let layout = self.layout();
        if layout.hits_selector(mouse.column, mouse.row) {
            self.selector.toggle();
        } else if self.selector.is_open() {
            if let Some(row) = layout.dropdown_item_at(mouse.column, mouse.row) {
                let offset = self
                    .selector
                    .scroll_offset(usize::from(layout.dropdown.height));
                self.apply_selector_event(FileSelectorEvent::Selected(offset + row));
            }
        }
    }

    fn apply_selector_event(&mut self, event: FileSelectorEvent) {
        match event {
            FileSelectorEvent::Selected(index) => self.select_file(index),
            FileSelectorEvent::Closed => {}
        }
    }

    /// Loads the catalog entry at `index` and closes the dropdown.
    ///
    /// On failure the previously loaded life config and selection stay as
    /// they were.
    pub fn select_file(&mut self, index: usize) {
        self.selector.close();

        let Some(path) = self.catalog.get(index).cloned() else {
            return;
        };

        match load_life_config(&path) {
            Ok(life) => self.install_life(Some(index), &path, life),
            Err(err) => {
                tracing::error!("{err:#}");
                self.status = Some(StatusMessage::error(format!("{err:#}")));
            }
        }
    }

    /// Loads `path` directly, e.g. a file named on the command line.
    ///
    /// The dropdown selection follows the file if it is in the catalog.
    ///
    /// # Errors
    ///
    /// Returns the load error; the state is left unchanged in that case.
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let life = load_life_config(path)?;
        let index = self.catalog.iter().position(|entry| entry == path);
        self.install_life(index, path, life);
        Ok(())
    }

    fn install_life(&mut self, index: Option<usize>, path: &Path, life: LifeConfig) {
        let years = life.life_expectancy.clamp(1, MAX_LIFE_EXPECTANCY);
        self.life_expectancy = years;
        self.expectancy_input.set_value(years);
        self.selected_year = initial_year(&life, Local::now().year());
        self.status = Some(StatusMessage::info(format!(
            "Loaded {} ({} periods)",
            path.display(),
            life.period_count()
        )));
        self.selector.set_selected(index);
        self.life = Some(life);
    }

    /// Applies the input buffer. Empty or non-positive values are ignored.
    pub fn apply_expectancy_input(&mut self) {
        if let Some(years) = self.expectancy_input.value() {
            self.life_expectancy = years;
        }
    }

    /// Re-scans the data directory.
    ///
    /// The loaded file stays selected if it is still in the catalog. On error
    /// the catalog is emptied.
    pub fn rescan(&mut self) {
        let selected_path = self
            .selector
            .selected()
            .and_then(|index| self.catalog.get(index))
            .cloned();
        self.selector.close();

        match scan_catalog(&self.data_dir) {
            Ok(files) => {
                self.catalog = files;
                let selected = selected_path
                    .and_then(|path| self.catalog.iter().position(|entry| *entry == path));
                self.selector.set_selected(selected);
                self.status = Some(StatusMessage::info(format!(
                    "Found {} file(s) in {}",
                    self.catalog.len(),
                    self.data_dir.display()
                )));
            }
            Err(err) => {
                tracing::error!("{err:#}");
                self.catalog.clear();
                self.selector.set_selected(None);
                self.status = Some(StatusMessage::error(format!("{err:#}")));
            }
        }
    }

    /// Switches between the lifetime and yearly views.
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ViewMode::Lifetime => ViewMode::Yearly,
            ViewMode::Yearly => ViewMode::Lifetime,
        };
    }

    /// Moves the yearly view by `delta` years.
    pub fn change_year(&mut self, delta: i32) {
        if self.view == ViewMode::Yearly {
            self.selected_year = self.selected_year.saturating_add(delta);
        }
    }

    /// Lifetime grid for the loaded config, with `now` closing the last period.
    #[must_use]
    pub fn lifetime_grid(&self, now: NaiveDateTime) -> Option<LifetimeGrid> {
        self.life.as_ref().map(|life| {
            map_lifetime(life.date_of_birth, self.life_expectancy, &life.periods, now)
        })
    }

    /// Yearly grid for the selected year.
    #[must_use]
    pub fn year_grid(&self) -> Option<YearGrid> {
        self.life
            .as_ref()
            .map(|life| map_year(self.selected_year, life.events_for_year(self.selected_year)))
    }

    /// Legend rows for the active view.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        let Some(life) = &self.life else {
            return Vec::new();
        };

        match self.view {
            ViewMode::Lifetime => life
                .periods
                .iter()
                .map(|period| LegendEntry::new(period.legend_label(), period.color))
                .collect(),
            ViewMode::Yearly => {
                let events = life.events_for_year(self.selected_year);
                events
                    .iter()
                    .enumerate()
                    .map(|(i, event)| {
                        let until = events.get(i + 1).map_or_else(
                            || "ongoing".to_string(),
                            |next| format!("to {}", next.start.format("%Y-%m-%d")),
                        );
                        LegendEntry::new(
                            format!(
                                "{} ({} {})",
                                event.display_location(),
                                event.start.format("%Y-%m-%d"),
                                until
                            ),
                            event.color,
                        )
                    })
                    .collect()
            }
        }
    }

    /// Window title text.
    #[must_use]
    pub fn title(&self) -> String {
        let name = self.life.as_ref().map_or("", |life| life.name.as_str());
        match (self.view, name.is_empty()) {
            (_, true) => "My Life".to_string(),
            (ViewMode::Lifetime, false) => format!("My Life - {name}"),
            (ViewMode::Yearly, false) => format!("My Life - {name} - Year {}", self.selected_year),
        }
    }
}

/// Year the yearly view opens on: this year if it has events, else the
/// first year with events, else this year.
fn initial_year(life: &LifeConfig, this_year: i32) -> i32 {
    if !life.events_for_year(this_year).is_empty() {
        return this_year;
    }
    life.event_years().next().unwrap_or(this_year)
}

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Time budget of one frame at `fps` frames per second.
#[must_use]
pub fn frame_duration(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

/// Main event loop: draw, then wait up to one frame for input.
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let frame_time = frame_duration(state.config.ui.effective_fps());

    while !state.should_quit {
        let mut screen = state.screen;
        terminal.draw(|f| {
            screen = f.area();
            render(f, state);
        })?;
        state.screen = screen;

        if event::poll(frame_time)? {
            state.handle_event(event::read()?);
        }
    }

    Ok(())
}

/// Renders one frame.
pub fn render(f: &mut Frame, state: &AppState) {
    let theme = &state.theme;
    let area = f.area();

    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, area);

    let layout = state.layout_for(area);

    state
        .selector
        .render_header(f, layout.selector, theme, &state.catalog);
    render_title(f, layout.title, state);
    render_grid(f, layout.grid, state, Local::now().naive_local());

    let entries = state.legend_entries();
    f.render_widget(Legend::new(&entries), layout.legend);

    state.expectancy_input.render(f, layout.input, theme);
    StatusBar::render(f, layout.status, state, theme);

    // Dropdown goes last so it overlays the grid
    state
        .selector
        .render(f, layout.dropdown, theme, &state.catalog);
}

fn render_title(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let title = Paragraph::new(state.title())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.primary)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(title, area);
}

fn render_grid(f: &mut Frame, area: Rect, state: &AppState, now: NaiveDateTime) {
    let theme = &state.theme;

    match state.view {
        ViewMode::Lifetime => {
            if let Some(grid) = state.lifetime_grid(now) {
                f.render_widget(LifetimeView::new(&grid, theme), area);
                return;
            }
        }
        ViewMode::Yearly => {
            if let (Some(grid), Some(life)) = (state.year_grid(), state.life.as_ref()) {
                let colors = life
                    .events_for_year(state.selected_year)
                    .iter()
                    .map(|event| event.color.to_ratatui_color())
                    .collect();
                f.render_widget(YearView::new(&grid, colors, theme), area);
                return;
            }
        }
    }

    let hint = Paragraph::new("Press Tab or click the file box to pick a life config")
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_muted).bg(theme.background));
    f.render_widget(hint, area);
}
