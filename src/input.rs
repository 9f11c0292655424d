//! Input normalisation and click hit-testing for the terminal frontend.
//!
//! Keyboard and mouse/touch events both end up as an [`InputEvent`]. Mouse
//! positions arrive in DOM pixels and are mapped to terminal cells, then
//! matched against the targets the renderer registered on the last frame.

use ratzilla::ratatui::layout::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A tap on a registered target, carrying its action id.
    Click(u16),
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Targets registered by the renderer, shared with the mouse handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Make one row of `area` clickable. Rows outside `area` are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Split a tab row into targets. `tab_widths` holds `(label width,
    /// action id)`; each target extends halfway into its neighbouring
    /// separators, and the outer tabs reach the edges of the row.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if tab_widths.is_empty() || total_width == 0 {
            return;
        }
        let mut spans = Vec::with_capacity(tab_widths.len());
        let mut cursor = 0u16;
        for (i, &(width, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            spans.push((cursor, cursor + width));
            cursor += width;
        }

        let last = spans.len() - 1;
        for (i, &(start, end)) in spans.iter().enumerate() {
            let left = if i == 0 { 0 } else { start - separator_width / 2 - separator_width % 2 };
            let right = if i == last { total_width } else { end + separator_width / 2 };
            let width = right.min(total_width).saturating_sub(left);
            if width > 0 {
                self.add_click_target(Rect::new(x + left, y, width, height), tab_widths[i].1);
            }
        }
    }

    /// Action id under a cell. Later targets sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Pixel offset from the grid's top edge to a terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Pixel offset from the grid's left edge to a terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 || !offset.is_finite() {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_targets_win_on_overlap() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 3, 40, 1), 1);
        cs.add_click_target(Rect::new(10, 3, 5, 1), 2);
        assert_eq!(cs.hit_test(12, 3), Some(2));
        assert_eq!(cs.hit_test(2, 3), Some(1));
        assert_eq!(cs.hit_test(2, 4), None);
    }

    #[test]
    fn row_target_outside_area_is_dropped() {
        let mut cs = ClickState::new();
        let area = Rect::new(0, 5, 20, 4);
        cs.add_row_target(area, 4, 1);
        cs.add_row_target(area, 9, 2);
        cs.add_row_target(area, 6, 3);
        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(0, 6), Some(3));
    }

    #[test]
    fn tab_targets_cover_the_whole_row() {
        let mut cs = ClickState::new();
        // " Heroes " (8) " | " (3) " Missions " (10)
        cs.register_tab_targets(&[(8, 10), (10, 11)], 3, 1, 0, 40, 1);
        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(1, 0), Some(10));
        assert_eq!(cs.hit_test(9, 0), Some(10));
        assert_eq!(cs.hit_test(11, 0), Some(11));
        assert_eq!(cs.hit_test(40, 0), Some(11));
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn clear_drops_everything() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 1, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn pixels_map_to_cells() {
        assert_eq!(pixel_y_to_row(0.0, 300.0, 20), Some(0));
        assert_eq!(pixel_y_to_row(29.9, 300.0, 20), Some(1));
        assert_eq!(pixel_y_to_row(299.0, 300.0, 20), Some(19));
        assert_eq!(pixel_y_to_row(300.0, 300.0, 20), None);
        assert_eq!(pixel_x_to_col(-1.0, 800.0, 80), None);
        assert_eq!(pixel_x_to_col(15.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(5.0, 0.0, 80), None);
        assert_eq!(pixel_x_to_col(5.0, 800.0, 0), None);
    }

    #[test]
    fn narrow_below_sixty_columns() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }
}
