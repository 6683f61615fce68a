//! Invisible capture surface behind the pin cells.
//!
//! The surface mirrors the controlled value and turns raw terminal input into
//! proposed edits. It never commits an edit itself; the owner forwards the
//! proposal to the caller and waits for the value to be echoed back. The
//! cursor is always pinned to the end of the mirrored value.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pincode_types::KeyboardType;
use ratatui::layout::Alignment;

/// Caller overrides for the capture surface, applied after the widget's own
/// defaults. `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureOptions {
    pub max_length: Option<usize>,
    pub editable: Option<bool>,
    pub auto_focus: Option<bool>,
    pub keyboard_type: Option<KeyboardType>,
    pub single_line: Option<bool>,
    pub spell_check: Option<bool>,
    pub caret_hidden: Option<bool>,
    pub text_align: Option<Alignment>,
    pub disable_fullscreen_ui: Option<bool>,
    pub test_id: Option<String>,
}

/// Effective capture surface configuration.
///
/// `spell_check`, `text_align` and `disable_fullscreen_ui` have no terminal
/// counterpart; they are merged and carried for hosts that forward them to a
/// platform input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureProps {
    pub max_length: usize,
    pub editable: bool,
    pub auto_focus: bool,
    pub keyboard_type: KeyboardType,
    pub single_line: bool,
    pub spell_check: bool,
    pub caret_hidden: bool,
    pub text_align: Alignment,
    pub disable_fullscreen_ui: bool,
    pub test_id: Option<String>,
}

impl Default for CaptureProps {
    fn default() -> Self {
        Self {
            max_length: usize::MAX,
            editable: true,
            auto_focus: false,
            keyboard_type: KeyboardType::default(),
            single_line: true,
            spell_check: false,
            caret_hidden: true,
            text_align: Alignment::Center,
            disable_fullscreen_ui: true,
            test_id: None,
        }
    }
}

impl CaptureProps {
    /// Apply caller overrides on top of these props.
    pub fn merged(self, options: &CaptureOptions) -> CaptureProps {
        CaptureProps {
            max_length: options.max_length.unwrap_or(self.max_length),
            editable: options.editable.unwrap_or(self.editable),
            auto_focus: options.auto_focus.unwrap_or(self.auto_focus),
            keyboard_type: options.keyboard_type.unwrap_or(self.keyboard_type),
            single_line: options.single_line.unwrap_or(self.single_line),
            spell_check: options.spell_check.unwrap_or(self.spell_check),
            caret_hidden: options.caret_hidden.unwrap_or(self.caret_hidden),
            text_align: options.text_align.unwrap_or(self.text_align),
            disable_fullscreen_ui: options.disable_fullscreen_ui.unwrap_or(self.disable_fullscreen_ui),
            test_id: options.test_id.clone().or(self.test_id),
        }
    }
}

/// Raw signal produced by the surface for a single input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSignal {
    /// The backspace key went down; fires whether or not text changes
    Backspace,
    /// Proposed replacement for the whole value
    Edit(String),
}

#[derive(Debug, Clone, Default)]
pub struct CaptureSurface {
    /// Mirror of the controlled value
    text: String,
    props: CaptureProps,
}

impl CaptureSurface {
    pub fn new(props: CaptureProps) -> Self {
        Self { text: String::new(), props }
    }

    pub fn props(&self) -> &CaptureProps {
        &self.props
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mirror the controlled value.
    pub fn sync(&mut self, value: &str) {
        if self.text != value {
            self.text.clear();
            self.text.push_str(value);
        }
    }

    /// Cursor position in characters; selection is collapsed at the end.
    pub fn cursor(&self) -> usize {
        self.text.chars().count()
    }

    /// Translate a key event into signals, in the order the platform would
    /// deliver them: the key press first, then the text change.
    pub fn handle_key(&self, key: KeyEvent) -> Vec<CaptureSignal> {
        if !self.props.editable || key.kind == KeyEventKind::Release {
            return Vec::new();
        }

        match key.code {
            KeyCode::Backspace => {
                let mut signals = vec![CaptureSignal::Backspace];
                if let Some(shortened) = self.without_last_char() {
                    signals.push(CaptureSignal::Edit(shortened));
                }
                signals
            }
            KeyCode::Enter if !self.props.single_line => self.append("\n").map(CaptureSignal::Edit).into_iter().collect(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.append(c.encode_utf8(&mut [0; 4])).map(CaptureSignal::Edit).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Translate pasted text into a proposed edit.
    pub fn handle_paste(&self, pasted: &str) -> Option<CaptureSignal> {
        if !self.props.editable {
            return None;
        }
        if self.props.single_line {
            let flattened: String = pasted.chars().filter(|c| *c != '\n' && *c != '\r').collect();
            self.append(&flattened).map(CaptureSignal::Edit)
        } else {
            self.append(pasted).map(CaptureSignal::Edit)
        }
    }

    /// Append at the cursor, truncating to the maximum length. `None` when
    /// nothing would change.
    fn append(&self, addition: &str) -> Option<String> {
        let room = self.props.max_length.saturating_sub(self.cursor());
        if room == 0 || addition.is_empty() {
            return None;
        }
        let mut candidate = self.text.clone();
        candidate.extend(addition.chars().take(room));
        Some(candidate)
    }

    fn without_last_char(&self) -> Option<String> {
        let (start, _) = self.text.char_indices().last()?;
        Some(self.text[..start].to_string())
    }
}
