//! Status bar widget for the last load outcome and key help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, StatusKind, Theme, ViewMode};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status line with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let message = match &state.status {
            Some(status) => {
                let color = match status.kind {
                    StatusKind::Info => theme.success,
                    StatusKind::Error => theme.error,
                };
                Span::styled(status.text.clone(), Style::default().fg(color))
            }
            None => Span::styled(
                format!("{} file(s) in {}", state.catalog.len(), state.data_dir.display()),
                Style::default().fg(theme.text_muted),
            ),
        };

        let key = |k: &'static str| {
            Span::styled(
                k,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let mut help = vec![
            key("Tab"),
            Span::raw(" files  "),
            key("0-9"),
            Span::raw(" years  "),
            key("v"),
            Span::raw(" view  "),
        ];
        if state.view == ViewMode::Yearly {
            help.extend([key("[ ]"), Span::raw(" year  ")]);
        }
        help.extend([key("r"), Span::raw(" rescan  "), key("q"), Span::raw(" quit")]);

        let paragraph = Paragraph::new(vec![Line::from(message), Line::from(help)])
            .style(Style::default().fg(theme.text).bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .style(Style::default().fg(theme.primary).bg(theme.background)),
            );

        f.render_widget(paragraph, area);
    }
}
