//! File selector: a header box naming the chosen file and a dropdown listing
//! the catalog.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::path::PathBuf;

use crate::catalog::display_name;
use crate::tui::component::ContextualComponent;
use crate::tui::Theme;

/// Events emitted by the file selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSelectorEvent {
    /// User picked the catalog entry at this index
    Selected(usize),
    /// Dropdown was closed without a choice
    Closed,
}

/// File selector state.
#[derive(Debug, Clone, Default)]
pub struct FileSelector {
    /// Catalog index of the loaded file
    selected: Option<usize>,
    /// Whether the dropdown is showing
    open: bool,
    /// Keyboard cursor inside the dropdown
    highlighted: usize,
}

impl FileSelector {
    /// Creates a closed selector with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog index of the loaded file.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Records which catalog entry is loaded.
    pub fn set_selected(&mut self, selected: Option<usize>) {
        self.selected = selected;
    }

    /// Whether the dropdown is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Keyboard cursor inside the dropdown.
    #[must_use]
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// First catalog index shown when `visible` rows fit, keeping the
    /// highlighted entry on screen.
    #[must_use]
    pub fn scroll_offset(&self, visible: usize) -> usize {
        (self.highlighted + 1).saturating_sub(visible.max(1))
    }

    /// Opens or closes the dropdown. Opening puts the cursor on the loaded file.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        if self.open {
            self.highlighted = self.selected.unwrap_or(0);
        }
    }

    /// Closes the dropdown.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Text for the header box.
    #[must_use]
    pub fn label(&self, catalog: &[PathBuf]) -> String {
        self.selected
            .and_then(|index| catalog.get(index))
            .map_or_else(|| "Select a file".to_string(), |path| display_name(path))
    }

    /// Renders the closed header box.
    pub fn render_header(&self, f: &mut Frame, area: Rect, theme: &Theme, catalog: &[PathBuf]) {
        let border_color = if self.open { theme.accent } else { theme.primary };
        let marker = if self.open { "▲" } else { "▼" };

        let header = Paragraph::new(format!("{} {}", marker, self.label(catalog)))
            .style(Style::default().fg(theme.text).bg(theme.surface))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" File ")
                    .style(Style::default().fg(border_color).bg(theme.surface)),
            );
        f.render_widget(header, area);
    }
}

impl ContextualComponent for FileSelector {
    type Context = [PathBuf];
    type Event = FileSelectorEvent;

    fn handle_input(&mut self, key: KeyEvent, catalog: &[PathBuf]) -> Option<Self::Event> {
        if !self.open {
            return None;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlighted = self.highlighted.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.highlighted + 1 < catalog.len() {
                    self.highlighted += 1;
                }
                None
            }
            KeyCode::Enter => {
                if self.highlighted < catalog.len() {
                    self.open = false;
                    Some(FileSelectorEvent::Selected(self.highlighted))
                } else {
                    None
                }
            }
            KeyCode::Esc | KeyCode::Tab => {
                self.open = false;
                Some(FileSelectorEvent::Closed)
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, catalog: &[PathBuf]) {
        if !self.open || area.height == 0 {
            return;
        }

        f.render_widget(Clear, area);

        if catalog.is_empty() {
            let empty = Paragraph::new(" (no YAML files found)")
                .style(Style::default().fg(theme.text_muted).bg(theme.surface));
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = catalog
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let marker = if Some(i) == self.selected { "•" } else { " " };
                ListItem::new(format!("{marker}{}", display_name(path)))
            })
            .collect();

        let list = List::new(items)
            .style(Style::default().fg(theme.text).bg(theme.surface))
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            );

        // Same offset as mouse hit-testing uses
        let mut list_state = ListState::default()
            .with_offset(self.scroll_offset(usize::from(area.height)))
            .with_selected(Some(self.highlighted.min(catalog.len() - 1)));

        f.render_stateful_widget(list, area, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn catalog() -> Vec<PathBuf> {
        vec![
            PathBuf::from("data/a.yaml"),
            PathBuf::from("data/b.yml"),
            PathBuf::from("data/c.yaml"),
        ]
    }

    #[test]
    fn test_label() {
        let mut selector = FileSelector::new();
        assert_eq!(selector.label(&catalog()), "Select a file");

        selector.set_selected(Some(1));
        assert_eq!(selector.label(&catalog()), "data/b.yml");

        // Stale index after a re-scan shrank the catalog
        selector.set_selected(Some(9));
        assert_eq!(selector.label(&catalog()), "Select a file");
    }

    #[test]
    fn test_toggle_puts_cursor_on_selection() {
        let mut selector = FileSelector::new();
        selector.set_selected(Some(2));

        selector.toggle();
        assert!(selector.is_open());
        assert_eq!(selector.highlighted(), 2);

        selector.toggle();
        assert!(!selector.is_open());
    }

    #[test]
    fn test_navigation_and_select() {
        let catalog = catalog();
        let mut selector = FileSelector::new();
        selector.toggle();

        assert_eq!(selector.handle_input(key(KeyCode::Up), &catalog), None);
        assert_eq!(selector.highlighted(), 0);

        selector.handle_input(key(KeyCode::Down), &catalog);
        selector.handle_input(key(KeyCode::Down), &catalog);
        selector.handle_input(key(KeyCode::Down), &catalog);
        assert_eq!(selector.highlighted(), 2);

        assert_eq!(
            selector.handle_input(key(KeyCode::Enter), &catalog),
            Some(FileSelectorEvent::Selected(2))
        );
        assert!(!selector.is_open());
    }

    #[test]
    fn test_enter_on_empty_catalog_does_nothing() {
        let mut selector = FileSelector::new();
        selector.toggle();
        assert_eq!(selector.handle_input(key(KeyCode::Enter), &[]), None);
        assert!(selector.is_open());
    }

    #[test]
    fn test_escape_closes() {
        let mut selector = FileSelector::new();
        selector.toggle();
        assert_eq!(
            selector.handle_input(key(KeyCode::Esc), &catalog()),
            Some(FileSelectorEvent::Closed)
        );
        assert!(!selector.is_open());
    }

    #[test]
    fn test_closed_selector_ignores_keys() {
        let mut selector = FileSelector::new();
        assert_eq!(selector.handle_input(key(KeyCode::Enter), &catalog()), None);
    }

    #[test]
    fn test_scroll_offset_keeps_cursor_visible() {
        let catalog: Vec<PathBuf> = (0..10)
            .map(|i| PathBuf::from(format!("data/{i}.yaml")))
            .collect();
        let mut selector = FileSelector::new();
        selector.toggle();
        assert_eq!(selector.scroll_offset(4), 0);

        for _ in 0..6 {
            selector.handle_input(key(KeyCode::Down), &catalog);
        }
        assert_eq!(selector.highlighted(), 6);
        assert_eq!(selector.scroll_offset(4), 3);
        assert_eq!(selector.scroll_offset(10), 0);
        assert_eq!(selector.scroll_offset(0), 6);
    }

    fn draw(selector: &FileSelector, catalog: &[PathBuf], height: u16) -> Vec<String> {
        use ratatui::{backend::TestBackend, Terminal};

        let mut terminal = Terminal::new(TestBackend::new(20, height)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|f| {
                let area = f.area();
                selector.render(f, area, &theme, catalog);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..20)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_long_catalog_scrolls_to_cursor() {
        let catalog: Vec<PathBuf> = (0..10)
            .map(|i| PathBuf::from(format!("data/{i}.yaml")))
            .collect();
        let mut selector = FileSelector::new();
        selector.toggle();
        for _ in 0..6 {
            selector.handle_input(key(KeyCode::Down), &catalog);
        }

        let rows = draw(&selector, &catalog, 4);
        assert!(rows[0].contains("data/3.yaml"), "{rows:?}");
        assert!(rows[3].contains("data/6.yaml"), "{rows:?}");
    }

    #[test]
    fn test_empty_catalog_shows_message() {
        let mut selector = FileSelector::new();
        selector.toggle();

        let rows = draw(&selector, &[], 1);
        assert!(rows[0].contains("(no YAML files found)"), "{rows:?}");
    }
}
