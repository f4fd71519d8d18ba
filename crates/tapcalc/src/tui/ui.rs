//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::keypad::KEY_BINDINGS;

/// Title of the outer frame
pub const APP_TITLE: &str = " tapcalc ";

/// Width of the keypad column
const KEYPAD_WIDTH: u16 = 26;
/// Width of the help column
const HELP_WIDTH: u16 = 26;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Area the keypad occupies when the UI is drawn into `area`.
///
/// Mouse clicks are mapped against this rectangle.
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    columns(area)[1]
}

fn columns(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(KEYPAD_WIDTH),
            Constraint::Length(HELP_WIDTH),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_formula(&self, area: Rect, buf: &mut Buffer) {
        let engine = self.app.engine();
        let style = if engine.is_errored() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };

        Paragraph::new(Span::styled(engine.formula_text(), style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Formula ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let engine = self.app.engine();
        let style = if engine.is_errored() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Span::styled(engine.display_text(), style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let status = self.app.status();
        let style = if status.starts_with('✓') {
            Style::default().fg(Color::Green)
        } else if status.starts_with('✗') {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };

        Paragraph::new(Span::styled(status, style))
            .block(
                Block::default()
                    .title(" Status ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .render(area, buf);
    }

    fn render_help(area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = KEY_BINDINGS
            .iter()
            .chain(std::iter::once(&("q Ctrl+C", "Quit")))
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>11}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(APP_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let [main_area, keypad_area, help_area] = columns(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(main_area);

        self.render_formula(rows[0], buf);
        self.render_display(rows[1], buf);
        self.render_status(rows[2], buf);

        KeypadWidget::new(self.app.keypad())
            .highlighted(self.app.highlighted())
            .render(keypad_area, buf);

        Self::render_help(help_area, buf);
    }
}
