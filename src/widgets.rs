//! Clickable UI building blocks. Each one draws itself and registers the
//! click targets for what it drew, so rows and actions cannot drift apart.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// One row of tabs with targets matching their rendered widths.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let separator_width = Line::from(self.separator).width() as u16;
        let mut spans = Vec::new();
        let mut widths = Vec::new();
        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            let padded = format!(" {} ", label);
            widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        // Full outer height so taps on the border still land.
        cs.register_tab_targets(&widths, separator_width, inner.x, area.y, inner.width, area.height.max(1));
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with the action each clickable line triggers.
#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register one row target per clickable line. `top_offset` and
    /// `bottom_offset` are the border rows of the enclosing block; lines
    /// that fall past the bottom are clipped.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, top_offset: u16, bottom_offset: u16) {
        let first = area.y + top_offset;
        let end = area.y + area.height.saturating_sub(bottom_offset);
        for &(idx, action_id) in &self.actions {
            let Ok(offset) = u16::try_from(idx) else {
                break;
            };
            let row = first.saturating_add(offset);
            if row >= end {
                break;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_rows_follow_their_lines() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Heroes"));
        cl.push_clickable(Line::from("[1] Rookie"), 100);
        cl.push(Line::from(""));
        cl.push_clickable(Line::from("[2] Scout"), 101);

        let area = Rect::new(0, 4, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.hit_test(3, 6), Some(100));
        assert_eq!(cs.hit_test(3, 8), Some(101));
        assert_eq!(cs.hit_test(3, 5), None);
        assert_eq!(cs.hit_test(3, 7), None);
        assert_eq!(cl.len(), 4);
    }

    #[test]
    fn rows_past_the_border_are_clipped() {
        let mut cl = ClickableList::new();
        for i in 0..10u16 {
            cl.push_clickable(Line::from(format!("row {}", i)), i);
        }
        let area = Rect::new(0, 0, 20, 4);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);
        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(0, 3), None);
    }

    #[test]
    fn into_lines_keeps_everything() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("a"));
        cl.push_clickable(Line::from("b"), 1);
        assert_eq!(cl.into_lines().len(), 2);
    }
}
