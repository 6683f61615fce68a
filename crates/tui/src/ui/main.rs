use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::components::pin_code::render_pin_code;

/// Draw the demo screen: title, the pin widget, an activity log and hints.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let props = app.pin.props();
    let label_rows = u16::from(props.label.is_some());
    let pin_height = props.cell_height() + label_rows;
    let pin_width = props.container_width();

    let [title_area, _, pin_row, _, activity_area, hints_area] = Layout::vertical([
        Constraint::Length(1),          // Title
        Constraint::Length(1),          // Spacer
        Constraint::Length(pin_height), // Pin cells
        Constraint::Length(1),          // Spacer
        Constraint::Min(1),             // Activity
        Constraint::Length(1),          // Hints
    ])
    .areas(frame.area());

    frame.render_widget(title_line(app), title_area);

    let pin_area = centered(pin_row, pin_width);
    render_pin_code(frame, pin_area, &mut app.pin);

    let activity: Vec<Line> = app.activity().map(|entry| Line::from(Span::styled(entry.to_string(), muted()))).collect();
    frame.render_widget(Paragraph::new(activity).centered(), activity_area);

    frame.render_widget(Paragraph::new(hint_line(app)).centered(), hints_area);
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn title_line(app: &App) -> Line<'static> {
    let entered = app.code().chars().count();
    let total = app.pin.props().code_length;
    Line::from(vec![
        Span::styled("Enter code", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {entered}/{total}"), muted()),
    ])
    .centered()
}

fn hint_line(app: &App) -> Line<'static> {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut hints = vec![("Tab", " focus  "), ("Esc", " quit  ")];
    if app.fulfilled().is_some() {
        hints.push(("Enter", " submit  "));
    }
    let keyboard = app.pin.capture().props().keyboard_type.label();

    let mut spans: Vec<Span<'static>> = hints
        .into_iter()
        .flat_map(|(key, description)| [Span::styled(key, key_style), Span::styled(description, muted())])
        .collect();
    spans.push(Span::styled(format!("keyboard: {keyboard}"), muted()));
    Line::from(spans)
}
