//! Cell and text styling for the pin code widget.
//!
//! Styles are resolved by folding an ordered list of partial patches over an
//! empty base: the plain cell style first, then the focused override when the
//! cell is the next to be typed, then the filled override when it already
//! holds a character. Later patches win on conflicting keys.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

/// Partial style for a single cell.
///
/// `None` fields and unset `Style` attributes leave whatever an earlier patch
/// set untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub borders: Option<Borders>,
    pub border_type: Option<BorderType>,
    pub border_style: Style,
    /// Background and foreground applied to the whole cell
    pub fill: Style,
}

impl CellStyle {
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_style = self.border_style.fg(color);
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = Some(border_type);
        self
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = Some(borders);
        self
    }

    pub fn fill(mut self, fill: Style) -> Self {
        self.fill = fill;
        self
    }

    /// Shallow-merge `other` on top of `self`.
    pub fn patch(self, other: CellStyle) -> CellStyle {
        CellStyle {
            borders: other.borders.or(self.borders),
            border_type: other.border_type.or(self.border_type),
            border_style: self.border_style.patch(other.border_style),
            fill: self.fill.patch(other.fill),
        }
    }

    /// Build the block used to draw a cell.
    pub fn block(&self) -> Block<'static> {
        Block::default()
            .borders(self.borders.unwrap_or(Borders::ALL))
            .border_type(self.border_type.unwrap_or_default())
            .border_style(self.border_style)
            .style(self.fill)
    }
}

/// Style overrides for every part of the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinStyles {
    pub container: Style,
    pub cell: CellStyle,
    pub cell_focused: CellStyle,
    pub cell_filled: CellStyle,
    pub text: Style,
    pub text_focused: Style,
    pub label: Style,
}

impl Default for PinStyles {
    fn default() -> Self {
        Self {
            container: Style::default(),
            cell: CellStyle::default().border_color(Color::Gray).border_type(BorderType::Plain),
            cell_focused: CellStyle::default().border_color(Color::White).border_type(BorderType::Thick),
            cell_filled: CellStyle::default(),
            text: Style::default().fg(Color::Gray),
            text_focused: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            label: Style::default(),
        }
    }
}

impl PinStyles {
    /// Resolve the cell style for the given flags.
    pub fn resolve_cell(&self, focused: bool, filled: bool) -> CellStyle {
        [Some(self.cell), focused.then_some(self.cell_focused), filled.then_some(self.cell_filled)]
            .into_iter()
            .flatten()
            .fold(CellStyle::default(), CellStyle::patch)
    }

    /// Resolve the literal text style for a cell.
    pub fn resolve_text(&self, focused: bool) -> Style {
        [Some(self.text), focused.then_some(self.text_focused)]
            .into_iter()
            .flatten()
            .fold(Style::default(), |resolved, patch| resolved.patch(patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles() -> PinStyles {
        PinStyles {
            cell: CellStyle::default().border_color(Color::Gray).fill(Style::default().bg(Color::Black)),
            cell_focused: CellStyle::default().border_color(Color::Yellow).border_type(BorderType::Double),
            cell_filled: CellStyle::default().border_color(Color::Green),
            ..PinStyles::default()
        }
    }

    #[test]
    fn base_style_applies_when_no_flags_set() {
        let resolved = styles().resolve_cell(false, false);
        assert_eq!(resolved.border_style.fg, Some(Color::Gray));
        assert_eq!(resolved.border_type, None);
        assert_eq!(resolved.fill.bg, Some(Color::Black));
    }

    #[test]
    fn focused_override_keeps_unrelated_base_keys() {
        let resolved = styles().resolve_cell(true, false);
        assert_eq!(resolved.border_style.fg, Some(Color::Yellow));
        assert_eq!(resolved.border_type, Some(BorderType::Double));
        assert_eq!(resolved.fill.bg, Some(Color::Black));
    }

    #[test]
    fn filled_override_wins_over_focused() {
        let resolved = styles().resolve_cell(true, true);
        assert_eq!(resolved.border_style.fg, Some(Color::Green));
        // Filled does not set a border type, so the focused one survives.
        assert_eq!(resolved.border_type, Some(BorderType::Double));
    }

    #[test]
    fn focused_text_patches_base_text() {
        let styles = PinStyles {
            text: Style::default().fg(Color::Gray).bg(Color::Blue),
            text_focused: Style::default().fg(Color::White),
            ..PinStyles::default()
        };
        let resolved = styles.resolve_text(true);
        assert_eq!(resolved.fg, Some(Color::White));
        assert_eq!(resolved.bg, Some(Color::Blue));
        assert_eq!(styles.resolve_text(false).fg, Some(Color::Gray));
    }
}
