//! Numeric input for the life expectancy in years.
//!
//! Accepts digits only, at most three of them. The buffer may be empty or
//! zero while typing; [`ExpectancyInput::value`] only yields positive values.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::constants::MAX_EXPECTANCY_DIGITS;
use crate::tui::component::Component;
use crate::tui::Theme;

/// Events emitted by the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectancyInputEvent {
    /// The buffer text changed
    Changed,
}

/// Life expectancy input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectancyInput {
    buffer: String,
}

impl ExpectancyInput {
    /// Creates an input showing `initial`, or an empty one if it has too many digits.
    #[must_use]
    pub fn new(initial: u32) -> Self {
        let mut input = Self {
            buffer: String::new(),
        };
        input.set_value(initial);
        input
    }

    /// Current buffer text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Parsed value if it is a positive number.
    #[must_use]
    pub fn value(&self) -> Option<u32> {
        self.buffer.parse::<u32>().ok().filter(|years| *years > 0)
    }

    /// Replaces the buffer with `value` if it fits. Returns false otherwise.
    pub fn set_value(&mut self, value: u32) -> bool {
        let text = value.to_string();
        if text.len() > MAX_EXPECTANCY_DIGITS {
            return false;
        }
        self.buffer = text;
        true
    }

    /// Appends a digit. Returns false for non-digits or a full buffer.
    pub fn push_digit(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() || self.buffer.len() >= MAX_EXPECTANCY_DIGITS {
            return false;
        }
        self.buffer.push(c);
        true
    }

    /// Deletes the last digit. Returns false if the buffer was empty.
    pub fn backspace(&mut self) -> bool {
        self.buffer.pop().is_some()
    }
}

impl Component for ExpectancyInput {
    type Event = ExpectancyInputEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        let changed = match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.push_digit(c)
            }
            KeyCode::Backspace => self.backspace(),
            _ => false,
        };

        changed.then_some(ExpectancyInputEvent::Changed)
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let line = Line::from(vec![
            Span::styled(
                format!("{:>3}", self.buffer),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("█", Style::default().fg(theme.accent)),
            Span::styled(" years", Style::default().fg(theme.text_muted)),
        ]);

        let input = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Life Expectancy ")
                .style(Style::default().fg(theme.primary).bg(theme.surface)),
        );
        f.render_widget(input, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_shows_initial_value() {
        let input = ExpectancyInput::new(80);
        assert_eq!(input.text(), "80");
        assert_eq!(input.value(), Some(80));
    }

    #[test]
    fn test_new_with_too_many_digits_is_empty() {
        let input = ExpectancyInput::new(1000);
        assert_eq!(input.text(), "");
        assert_eq!(input.value(), None);
    }

    #[test]
    fn test_buffer_never_exceeds_three_digits() {
        let mut input = ExpectancyInput::new(80);
        assert!(input.push_digit('5'));
        assert!(!input.push_digit('1'));
        assert_eq!(input.text(), "805");

        assert_eq!(input.handle_input(key(KeyCode::Char('9'))), None);
        assert_eq!(input.text(), "805");
    }

    #[test]
    fn test_only_digits_accepted() {
        let mut input = ExpectancyInput::new(7);
        assert_eq!(input.handle_input(key(KeyCode::Char('a'))), None);
        assert_eq!(input.handle_input(key(KeyCode::Char('-'))), None);
        assert_eq!(
            input.handle_input(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(input.text(), "7");
    }

    #[test]
    fn test_backspace() {
        let mut input = ExpectancyInput::new(42);
        assert_eq!(
            input.handle_input(key(KeyCode::Backspace)),
            Some(ExpectancyInputEvent::Changed)
        );
        assert_eq!(input.text(), "4");
        input.backspace();
        assert_eq!(input.text(), "");

        // Backspace on an empty buffer is a no-op
        assert_eq!(input.handle_input(key(KeyCode::Backspace)), None);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_value_rejects_non_positive() {
        let mut input = ExpectancyInput::new(1);
        input.backspace();
        assert_eq!(input.value(), None);

        input.push_digit('0');
        input.push_digit('0');
        assert_eq!(input.text(), "00");
        assert_eq!(input.value(), None);

        input.push_digit('9');
        assert_eq!(input.value(), Some(9));
    }
}
