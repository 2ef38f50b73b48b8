//! Grid widgets for the lifetime and yearly views.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::services::timeline::{LifetimeGrid, YearCell, YearGrid};
use crate::tui::Theme;

/// Widest a single grid cell is drawn, in terminal columns.
const MAX_CELL_WIDTH: u16 = 3;

/// Separator glyph drawn on the right edge of each cell.
const CELL_EDGE: &str = "▕";

/// Width of one cell so that `columns` cells fit in `available` columns.
#[must_use]
pub fn cell_width(available: u16, columns: usize) -> u16 {
    let columns = u16::try_from(columns).unwrap_or(u16::MAX).max(1);
    (available / columns).clamp(1, MAX_CELL_WIDTH)
}

/// Paints one row of colored cells starting at (`x`, `y`).
fn paint_row(
    buf: &mut Buffer,
    area: Rect,
    y: u16,
    colors: impl Iterator<Item = Color>,
    width: u16,
    edge: Color,
) {
    for (col, color) in colors.enumerate() {
        let Ok(col) = u16::try_from(col) else {
            break;
        };
        let x0 = area.x + col * width;
        for dx in 0..width {
            let x = x0 + dx;
            if x >= area.right() {
                return;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                if width > 1 && dx == width - 1 {
                    cell.set_symbol(CELL_EDGE).set_fg(edge).set_bg(color);
                } else {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }
}

/// Area actually used by a grid, centered horizontally inside `area`.
fn grid_area(area: Rect, columns: usize, rows: usize) -> (Rect, u16) {
    let width = cell_width(area.width, columns);
    let used_width = (width * columns as u16).min(area.width);
    let used_height = u16::try_from(rows).unwrap_or(u16::MAX).min(area.height);
    let x = area.x + (area.width - used_width) / 2;
    (Rect::new(x, area.y, used_width, used_height), width)
}

/// Lifetime grid widget: one terminal row per grid row.
///
/// Rows that do not fit are cut off at the bottom.
#[derive(Debug)]
pub struct LifetimeView<'a> {
    grid: &'a LifetimeGrid,
    theme: &'a Theme,
}

impl<'a> LifetimeView<'a> {
    /// Creates the widget.
    #[must_use]
    pub fn new(grid: &'a LifetimeGrid, theme: &'a Theme) -> Self {
        Self { grid, theme }
    }
}

impl Widget for LifetimeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (used, width) = grid_area(area, self.grid.columns(), self.grid.rows());

        for (offset, row) in self.grid.iter_rows().take(used.height as usize).enumerate() {
            let colors = row.iter().map(|cell| {
                cell.color
                    .map_or(self.theme.cell_background, |color| color.to_ratatui_color())
            });
            paint_row(buf, used, used.y + offset as u16, colors, width, self.theme.grid_line);
        }
    }
}

/// Yearly grid widget: 13 rows of 28 days.
#[derive(Debug)]
pub struct YearView<'a> {
    grid: &'a YearGrid,
    event_colors: Vec<Color>,
    theme: &'a Theme,
}

impl<'a> YearView<'a> {
    /// Creates the widget; `event_colors[i]` fills days of event `i`.
    #[must_use]
    pub fn new(grid: &'a YearGrid, event_colors: Vec<Color>, theme: &'a Theme) -> Self {
        Self {
            grid,
            event_colors,
            theme,
        }
    }

    fn color_of(&self, cell: &YearCell) -> Color {
        match cell {
            YearCell::OutOfYear => self.theme.out_of_range,
            YearCell::Empty(_) => self.theme.cell_background,
            YearCell::Event(_, index) => self
                .event_colors
                .get(*index)
                .copied()
                .unwrap_or(self.theme.cell_background),
        }
    }
}

impl Widget for YearView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (used, width) = grid_area(area, self.grid.columns(), self.grid.rows());

        for (offset, row) in self.grid.iter_rows().take(used.height as usize).enumerate() {
            let colors = row.iter().map(|cell| self.color_of(cell));
            paint_row(buf, used, used.y + offset as u16, colors, width, self.theme.grid_line);
        }
    }
}
