//! Keypad widget for the terminal calculator
//!
//! Renders the shared [`Keypad`] layout as a bordered grid. The last pressed
//! button is highlighted, and [`hit_test`] maps mouse clicks back to buttons.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::keypad::{Keypad, KeypadAction};

/// Converts a click position inside the widget area to a button index
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<usize> {
    if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
        return None;
    }

    let rel_x = x - area.x;
    let rel_y = y - area.y;

    // Border takes one cell on each side
    if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
        return None;
    }

    let (rows, cols) = keypad.dimensions();
    let btn_width = (area.width - 2) / cols as u16;
    let btn_height = (area.height - 2) / rows as u16;
    if btn_width == 0 || btn_height == 0 {
        return None;
    }

    let col = ((rel_x - 1) / btn_width) as usize;
    let row = ((rel_y - 1) / btn_height) as usize;
    (row < rows && col < cols).then_some(row * cols + col)
}

fn button_style(action: KeypadAction) -> Style {
    match action {
        KeypadAction::Digit(_) | KeypadAction::Decimal => Style::default().fg(Color::White),
        KeypadAction::Operator(_) => Style::default().fg(Color::Yellow),
        KeypadAction::Equals => Style::default().fg(Color::Green),
        KeypadAction::AllClear | KeypadAction::ClearEntry => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Cyan),
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    highlighted: Option<usize>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self {
            keypad,
            highlighted: None,
        }
    }

    /// Highlights the button at `index`
    #[must_use]
    pub fn highlighted(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for (index, btn) in self.keypad.buttons().iter().enumerate() {
            let x = inner.x + (btn.col as u16 * btn_width);
            let y = inner.y + (btn.row as u16 * btn_height);

            let style = if self.highlighted == Some(index) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                button_style(btn.action)
            };

            let label = format!("[{}]", btn.action.label());
            let label_width = label.chars().count() as u16;
            if btn_width >= label_width {
                let label_x = x + (btn_width - label_width) / 2;
                let label_y = y + btn_height / 2;
                if label_y < inner.y + inner.height {
                    buf.set_span(label_x, label_y, &Span::styled(label, style), btn_width);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;

    fn rendered(widget: KeypadWidget<'_>, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf
    }

    fn content(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_widget_render_labels() {
        let keypad = Keypad::new();
        let buf = rendered(KeypadWidget::new(&keypad), Rect::new(0, 0, 26, 12));
        let text = content(&buf);
        assert!(text.contains("Keypad"));
        assert!(text.contains("[7]"));
        assert!(text.contains("[AC]"));
        assert!(text.contains("[CE]"));
        assert!(text.contains("[÷]"));
        assert!(text.contains("[=]"));
    }

    #[test]
    fn test_widget_render_too_small() {
        let keypad = Keypad::new();
        let buf = rendered(KeypadWidget::new(&keypad), Rect::new(0, 0, 5, 5));
        assert!(!content(&buf).contains("[7]"));
    }

    #[test]
    fn test_widget_highlight_style() {
        let keypad = Keypad::new();
        let seven = keypad
            .position_of(KeypadAction::from_key("7").unwrap())
            .unwrap();
        let area = Rect::new(0, 0, 26, 12);
        let buf = rendered(KeypadWidget::new(&keypad).highlighted(Some(seven)), area);

        // Row 1, col 0: inner starts at (1, 1), buttons are 6x2
        let cell = buf
            .content()
            .iter()
            .enumerate()
            .find(|(i, c)| c.symbol() == "7" && (*i as u16) / area.width == 4)
            .map(|(_, c)| c.clone())
            .unwrap();
        assert_eq!(cell.bg, Color::Yellow);
    }

    #[test]
    fn test_hit_test_maps_grid() {
        let keypad = Keypad::new();
        let area = Rect::new(0, 0, 26, 12);
        // Top-left button is AC
        let idx = hit_test(&keypad, area, 2, 1).unwrap();
        assert_eq!(keypad.buttons()[idx].action, KeypadAction::AllClear);
        // Top-right button is divide
        let idx = hit_test(&keypad, area, 23, 2).unwrap();
        assert_eq!(
            keypad.buttons()[idx].action,
            KeypadAction::Operator(Operation::Divide)
        );
        // Bottom-right button is equals
        let idx = hit_test(&keypad, area, 23, 10).unwrap();
        assert_eq!(keypad.buttons()[idx].action, KeypadAction::Equals);
    }

    #[test]
    fn test_hit_test_outside_and_border() {
        let keypad = Keypad::new();
        let area = Rect::new(5, 5, 26, 12);
        assert_eq!(hit_test(&keypad, area, 0, 0), None);
        assert_eq!(hit_test(&keypad, area, 100, 100), None);
        assert_eq!(hit_test(&keypad, area, 5, 5), None);
        assert_eq!(hit_test(&keypad, area, 30, 10), None);
    }

    #[test]
    fn test_hit_test_degenerate_area() {
        let keypad = Keypad::new();
        assert_eq!(hit_test(&keypad, Rect::new(0, 0, 4, 4), 1, 1), None);
    }
}
