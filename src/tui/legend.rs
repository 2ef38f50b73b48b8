//! Legend: one full-width colored row per life period or yearly event.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};

use crate::models::RgbColor;

/// One legend row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// Row text
    pub label: String,
    /// Row background; the text color is picked for contrast
    pub color: RgbColor,
}

impl LegendEntry {
    /// Creates a legend entry.
    #[must_use]
    pub fn new(label: impl Into<String>, color: RgbColor) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// Legend widget. Entries past the available height are not drawn.
#[derive(Debug)]
pub struct Legend<'a> {
    entries: &'a [LegendEntry],
}

impl<'a> Legend<'a> {
    /// Creates the widget.
    #[must_use]
    pub fn new(entries: &'a [LegendEntry]) -> Self {
        Self { entries }
    }
}

impl Widget for Legend<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (entry, y) in self.entries.iter().zip(area.top()..area.bottom()) {
            let style = Style::default()
                .bg(entry.color.to_ratatui_color())
                .fg(entry.color.contrasting_text().to_ratatui_color());

            let row = Rect::new(area.x, y, area.width, 1);
            buf.set_style(row, style);
            if area.width > 1 {
                buf.set_stringn(
                    area.x + 1,
                    y,
                    &entry.label,
                    usize::from(area.width - 1),
                    style,
                );
            }
        }
    }
}
