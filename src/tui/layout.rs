//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! Both sides compute the layout from the same inputs, so a click is tested
//! against exactly the rectangles that were drawn.

use ratatui::layout::{Position, Rect};

/// Height of the header row (file selector and title).
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the footer row (life expectancy input and status).
pub const FOOTER_HEIGHT: u16 = 3;

/// Preferred width of the file selector box.
pub const SELECTOR_WIDTH: u16 = 40;

/// Width of the life expectancy input box in the footer.
pub const INPUT_WIDTH: u16 = 22;

/// Rectangles of every screen region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// File selector box (click target that toggles the dropdown)
    pub selector: Rect,
    /// Title next to the selector
    pub title: Rect,
    /// Grid area
    pub grid: Rect,
    /// Legend rows, stacked directly above the footer
    pub legend: Rect,
    /// Life expectancy input box
    pub input: Rect,
    /// Status line next to the input
    pub status: Rect,
    /// Dropdown list under the selector, one row per catalog entry (at least one)
    pub dropdown: Rect,
}

impl ScreenLayout {
    /// Computes the layout for a screen `area`.
    ///
    /// `dropdown_len` is the number of catalog entries and `legend_len` the
    /// number of legend rows wanted; both are cut to what fits.
    #[must_use]
    pub fn compute(area: Rect, dropdown_len: usize, legend_len: usize) -> Self {
        let header_height = HEADER_HEIGHT.min(area.height);
        let footer_height = FOOTER_HEIGHT.min(area.height - header_height);
        let middle_height = area.height - header_height - footer_height;

        // The legend may take at most half of the middle band
        let legend_height = clamp_len(legend_len).min(middle_height / 2);
        let grid_height = middle_height - legend_height;

        let selector_width = SELECTOR_WIDTH.min(area.width);
        let selector = Rect::new(area.x, area.y, selector_width, header_height);
        let title = Rect::new(
            area.x + selector_width,
            area.y,
            area.width - selector_width,
            header_height,
        );

        let grid = Rect::new(area.x, area.y + header_height, area.width, grid_height);
        let legend = Rect::new(area.x, grid.bottom(), area.width, legend_height);

        let footer_y = area.bottom() - footer_height;
        let input_width = INPUT_WIDTH.min(area.width);
        let input = Rect::new(area.x, footer_y, input_width, footer_height);
        let status = Rect::new(
            area.x + input_width,
            footer_y,
            area.width - input_width,
            footer_height,
        );

        let dropdown_y = selector.bottom();
        // An empty catalog still gets a row for its placeholder message
        let dropdown_height = clamp_len(dropdown_len.max(1)).min(area.bottom() - dropdown_y);
        let dropdown = Rect::new(selector.x, dropdown_y, selector.width, dropdown_height);

        Self {
            selector,
            title,
            grid,
            legend,
            input,
            status,
            dropdown,
        }
    }

    /// Returns true if the point lies on the file selector box.
    #[must_use]
    pub fn hits_selector(&self, column: u16, row: u16) -> bool {
        self.selector.contains(Position::new(column, row))
    }

    /// Index of the dropdown entry under the point, if any.
    #[must_use]
    pub fn dropdown_item_at(&self, column: u16, row: u16) -> Option<usize> {
        self.dropdown
            .contains(Position::new(column, row))
            .then(|| usize::from(row - self.dropdown.y))
    }
}

fn clamp_len(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_stack_vertically() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 100, 40), 3, 2);

        assert_eq!(layout.selector, Rect::new(0, 0, 40, 3));
        assert_eq!(layout.title, Rect::new(40, 0, 60, 3));
        assert_eq!(layout.grid, Rect::new(0, 3, 100, 32));
        assert_eq!(layout.legend, Rect::new(0, 35, 100, 2));
        assert_eq!(layout.input, Rect::new(0, 37, 22, 3));
        assert_eq!(layout.status, Rect::new(22, 37, 78, 3));
        assert_eq!(layout.dropdown, Rect::new(0, 3, 40, 3));
    }

    #[test]
    fn test_legend_limited_to_half_of_middle() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 16), 0, 50);
        // 16 - 3 - 3 = 10 rows in the middle band
        assert_eq!(layout.legend.height, 5);
        assert_eq!(layout.grid.height, 5);
        assert_eq!(layout.legend.bottom(), layout.input.y);
    }

    #[test]
    fn test_dropdown_cut_at_screen_bottom() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 10), 50, 0);
        assert_eq!(layout.dropdown.y, 3);
        assert_eq!(layout.dropdown.height, 7);
    }

    #[test]
    fn test_empty_catalog_gets_one_dropdown_row() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 100, 40), 0, 0);
        assert_eq!(layout.dropdown, Rect::new(0, 3, 40, 1));
    }

    #[test]
    fn test_hit_testing() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 100, 40), 3, 0);

        assert!(layout.hits_selector(0, 0));
        assert!(layout.hits_selector(39, 2));
        assert!(!layout.hits_selector(40, 0));
        assert!(!layout.hits_selector(0, 3));

        assert_eq!(layout.dropdown_item_at(5, 3), Some(0));
        assert_eq!(layout.dropdown_item_at(5, 5), Some(2));
        assert_eq!(layout.dropdown_item_at(5, 6), None);
        assert_eq!(layout.dropdown_item_at(45, 4), None);
    }

    #[test]
    fn test_tiny_screen_does_not_underflow() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 10, 2), 4, 4);
        assert_eq!(layout.selector.height, 2);
        assert_eq!(layout.input.height, 0);
        assert_eq!(layout.grid.height, 0);
        assert_eq!(layout.dropdown.height, 0);
    }
}
