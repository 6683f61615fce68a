use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

use super::cell::{CellContent, CellView};
use super::content::Content;
use super::state::{PinCodeProps, PinCodeState};

/// Stateful widget drawing a row of pin cells with an optional label above.
///
/// The capture surface itself is invisible; it only records the area it
/// covers so mouse clicks and the focus ring can find it.
#[derive(Debug, Default, Clone, Copy)]
pub struct PinCode;

impl StatefulWidget for PinCode {
    type State = PinCodeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut PinCodeState) {
        let cells_area = {
            let props = state.props();
            let (label_area, cells_area) = split_area(props, area);

            if let (Some(label), Some(label_area)) = (props.label.as_ref(), label_area) {
                render_label(label, props.styles.label, label_area, buf);
            }
            buf.set_style(cells_area, props.styles.container);

            for view in state.cells() {
                if let Some(rect) = cell_rect(props, cells_area, view.index) {
                    render_cell(&view, rect, buf);
                }
            }
            cells_area
        };
        state.area = cells_area;
    }
}

/// Render the widget and place the terminal cursor when the caret is visible.
pub fn render_pin_code(frame: &mut Frame, area: Rect, state: &mut PinCodeState) {
    frame.render_stateful_widget(PinCode, area, state);
    if let Some(position) = state.cursor_position() {
        frame.set_cursor_position(position);
    }
}

fn split_area(props: &PinCodeProps, area: Rect) -> (Option<Rect>, Rect) {
    let label_rows = u16::from(props.label.is_some());
    let label_area = (label_rows > 0).then(|| Rect::new(area.x, area.y, area.width, 1).intersection(area));
    let cells_area = Rect {
        x: area.x,
        y: area.y.saturating_add(label_rows),
        width: props.container_width(),
        height: props.cell_height(),
    }
    .intersection(area);
    (label_area.filter(|rect| !rect.is_empty()), cells_area)
}

fn cell_rect(props: &PinCodeProps, cells_area: Rect, index: usize) -> Option<Rect> {
    let slot = if props.right_to_left {
        props.code_length.checked_sub(index + 1)?
    } else {
        index
    };
    let stride = u64::from(props.cell_size) + u64::from(props.cell_spacing);
    let x = u16::try_from(u64::from(cells_area.x) + stride * slot as u64).ok()?;
    let rect = Rect {
        x,
        y: cells_area.y,
        width: props.cell_size,
        height: props.cell_height(),
    }
    .intersection(cells_area);
    (!rect.is_empty()).then_some(rect)
}

fn render_label(label: &Content, style: Style, area: Rect, buf: &mut Buffer) {
    match label {
        Content::Text(text) => {
            buf.set_stringn(area.x, area.y, text, usize::from(area.width), style);
        }
        Content::Node(line) => line.clone().patch_style(style).render(area, buf),
    }
}

fn render_cell(view: &CellView, rect: Rect, buf: &mut Buffer) {
    let block = view.cell_style.block();
    let inner = block.inner(rect);
    block.render(rect, buf);
    if inner.is_empty() {
        return;
    }

    let row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
    match &view.content {
        CellContent::Empty => {}
        CellContent::Text(text) => {
            let text_width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            let x = row.x + row.width.saturating_sub(text_width) / 2;
            let room = usize::from(row.right() - x);
            buf.set_stringn(x, row.y, text, room, view.text_style);
        }
        CellContent::Node(line) => line.clone().alignment(Alignment::Center).render(row, buf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::pin_code::content::Content;
    use crate::ui::components::pin_code::style::CellStyle;
    use ratatui::style::Color;
    use ratatui::text::{Line, Span};
    use ratatui::widgets::Borders;
    use std::time::Duration;

    fn render(state: &mut PinCodeState, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        PinCode.render(area, &mut buf, state);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn draws_one_bordered_box_per_cell() {
        let mut state = PinCodeState::new(PinCodeProps::default());
        state.set_value("12");
        let buf = render(&mut state, 23, 3);

        assert_eq!(row(&buf, 0), "┌───┐ ┌───┐ ┌───┐ ┌───┐");
        assert_eq!(row(&buf, 1), "│ 1 │ │ 2 │ │   │ │   │");
        assert_eq!(row(&buf, 2), "└───┘ └───┘ └───┘ └───┘");
        assert_eq!(state.area(), Rect::new(0, 0, 23, 3));
    }

    #[test]
    fn focused_cell_uses_focused_border() {
        let mut state = PinCodeState::new(PinCodeProps::default());
        state.request_focus();
        state.set_value("1");
        let buf = render(&mut state, 23, 3);

        assert_eq!(row(&buf, 0), "┌───┐ ┏━━━┓ ┌───┐ ┌───┐");
        assert_eq!(buf[(7, 0)].fg, Color::White);
        assert_eq!(buf[(1, 0)].fg, Color::Gray);
    }

    #[test]
    fn password_mode_draws_mask_glyph() {
        let props = PinCodeProps {
            password: true,
            mask_delay: Duration::ZERO,
            ..PinCodeProps::default()
        };
        let mut state = PinCodeState::new(props);
        state.set_value("42");
        let buf = render(&mut state, 23, 3);
        assert_eq!(row(&buf, 1), "│ * │ │ * │ │   │ │   │");
    }

    #[test]
    fn label_sits_above_cells() {
        let props = PinCodeProps {
            label: Some(Content::text("PIN")),
            ..PinCodeProps::default()
        };
        let mut state = PinCodeState::new(props);
        let buf = render(&mut state, 23, 4);
        assert!(row(&buf, 0).starts_with("PIN"));
        assert_eq!(state.area(), Rect::new(0, 1, 23, 3));
    }

    #[test]
    fn right_to_left_reverses_cell_order() {
        let props = PinCodeProps {
            right_to_left: true,
            ..PinCodeProps::default()
        };
        let mut state = PinCodeState::new(props);
        state.set_value("12");
        let buf = render(&mut state, 23, 3);
        assert_eq!(row(&buf, 1), "│   │ │   │ │ 2 │ │ 1 │");
    }

    #[test]
    fn node_placeholder_is_embedded() {
        let props = PinCodeProps {
            placeholder: Some(Content::node(Line::from(Span::styled("-", Style::default().fg(Color::Red))))),
            styles: crate::ui::components::pin_code::style::PinStyles {
                cell: CellStyle::default().borders(Borders::NONE),
                cell_focused: CellStyle::default(),
                ..Default::default()
            },
            cell_spacing: 0,
            cell_size: 1,
            ..PinCodeProps::default()
        };
        let mut state = PinCodeState::new(props);
        state.set_value("7");
        let buf = render(&mut state, 4, 1);
        assert_eq!(row(&buf, 0), "7---");
        assert_eq!(buf[(1, 0)].fg, Color::Red);
    }

    #[test]
    fn small_area_clips_without_panicking() {
        let mut state = PinCodeState::new(PinCodeProps::default());
        state.set_value("1234");
        let buf = render(&mut state, 8, 2);
        assert_eq!(row(&buf, 0), "┌───┐ ┌┐");
        assert_eq!(state.area(), Rect::new(0, 0, 8, 2));

        let mut empty = PinCodeState::new(PinCodeProps {
            code_length: 0,
            ..PinCodeProps::default()
        });
        render(&mut empty, 10, 3);
        assert!(empty.area().is_empty());
    }
}
