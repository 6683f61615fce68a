//! Per-cell render decisions.
//!
//! Everything a cell shows is a pure function of its index, the controlled
//! value, the focus flag, the reveal state and the widget props. No per-cell
//! state is stored anywhere.

use ratatui::style::Style;
use ratatui::text::Line;

use super::content::Content;
use super::state::PinCodeProps;
use super::style::CellStyle;

/// What a single cell draws inside its border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Empty,
    Text(String),
    Node(Line<'static>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub index: usize,
    pub filled: bool,
    /// Next cell to be typed while the widget has focus
    pub focused: bool,
    /// Holds the most recently typed character
    pub last_filled: bool,
    pub show_mask: bool,
    pub content: CellContent,
    pub cell_style: CellStyle,
    pub text_style: Style,
}

/// Derive every cell for the current frame.
pub fn derive_cells(props: &PinCodeProps, value: &str, focused: bool, revealing: bool) -> Vec<CellView> {
    let chars: Vec<char> = value.chars().collect();
    (0..props.code_length)
        .map(|index| derive_cell(props, &chars, index, focused, revealing))
        .collect()
}

fn derive_cell(props: &PinCodeProps, chars: &[char], index: usize, has_focus: bool, revealing: bool) -> CellView {
    let len = chars.len();
    let filled = index < len;
    let focused = has_focus && index == len;
    let last_filled = index + 1 == len;
    let reveal_window = !props.mask_delay.is_zero() && last_filled && revealing;
    let show_mask = filled && props.password && !reveal_window;

    let content = resolve_content(props, chars.get(index).copied(), filled, show_mask);

    CellView {
        index,
        filled,
        focused,
        last_filled,
        show_mask,
        content,
        cell_style: props.styles.resolve_cell(focused, filled),
        text_style: props.styles.resolve_text(focused),
    }
}

fn resolve_content(props: &PinCodeProps, character: Option<char>, filled: bool, show_mask: bool) -> CellContent {
    let placeholder = props.placeholder.as_ref();

    let text = if filled || placeholder.is_some() {
        match (&props.mask, placeholder) {
            (Content::Text(mask), _) if show_mask => Some(mask.clone()),
            (_, Some(Content::Text(placeholder))) if !filled => Some(placeholder.clone()),
            _ => character.map(String::from),
        }
    } else {
        None
    };
    let mask_node = props.mask.as_node().filter(|_| show_mask);

    match (text, mask_node) {
        (Some(_), Some(node)) => CellContent::Node(node.clone()),
        (Some(text), None) => CellContent::Text(text),
        (None, None) => placeholder
            .and_then(Content::as_node)
            .map_or(CellContent::Empty, |node| CellContent::Node(node.clone())),
        // A masked cell is always filled, so it always has text.
        (None, Some(_)) => CellContent::Empty,
    }
}
