use serde::{Deserialize, Serialize};

/// Notifications emitted by the pin code controller.
///
/// Each variant corresponds to one of the optional callbacks a host may
/// attach. Events are returned in the order the callbacks should fire for a
/// single input event, so a `Changed` always precedes the `Fulfilled` it
/// triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinEvent {
    /// Every accepted edit, after numeric filtering
    Changed(String),
    /// The edit filled every cell
    Fulfilled(String),
    /// Backspace was pressed on the focused capture surface
    Backspace,
    /// The capture surface gained focus
    Focused,
    /// The capture surface lost focus
    Blurred,
}

/// Keyboard hint forwarded to the capture surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardType {
    Default,
    #[default]
    Numeric,
    NumberPad,
    DecimalPad,
    Phone,
    Email,
    Ascii,
}

impl KeyboardType {
    pub fn label(&self) -> &'static str {
        match self {
            KeyboardType::Default => "default",
            KeyboardType::Numeric => "numeric",
            KeyboardType::NumberPad => "number-pad",
            KeyboardType::DecimalPad => "decimal-pad",
            KeyboardType::Phone => "phone",
            KeyboardType::Email => "email",
            KeyboardType::Ascii => "ascii",
        }
    }
}

/// Serializable subset of the widget configuration.
///
/// Rich content, style overrides and callbacks cannot be persisted; they are
/// layered on top of these settings programmatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinSettings {
    /// Number of cells and maximum input length
    pub code_length: usize,
    /// Cell width in terminal columns
    pub cell_size: u16,
    /// Gap between adjacent cells in columns
    pub cell_spacing: u16,
    /// Text shown in empty cells
    pub placeholder: String,
    /// Enables masking of filled cells
    pub password: bool,
    /// Glyph shown over filled cells in password mode
    pub mask: String,
    /// Reveal-before-mask duration in milliseconds; 0 disables reveal
    pub mask_delay_ms: u64,
    pub keyboard_type: KeyboardType,
    pub auto_focus: bool,
    /// Strip non-digit characters from every edit
    pub restrict_to_numbers: bool,
    pub editable: bool,
    pub disable_fullscreen_ui: bool,
    /// Caption rendered above the cells
    pub label: Option<String>,
    pub test_id: Option<String>,
    /// Lay cells out right to left
    pub right_to_left: bool,
}

impl Default for PinSettings {
    fn default() -> Self {
        Self {
            code_length: 4,
            cell_size: 5,
            cell_spacing: 1,
            placeholder: String::new(),
            password: false,
            mask: "*".to_string(),
            mask_delay_ms: 200,
            keyboard_type: KeyboardType::Numeric,
            auto_focus: false,
            restrict_to_numbers: false,
            editable: true,
            disable_fullscreen_ui: true,
            label: None,
            test_id: None,
            right_to_left: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let json = r#"{ "code_length": 6, "password": true }"#;
        let settings: PinSettings = serde_json::from_str(json).expect("parse settings");
        assert_eq!(settings.code_length, 6);
        assert!(settings.password);
        assert_eq!(settings.mask, "*");
        assert_eq!(settings.mask_delay_ms, 200);
        assert_eq!(settings.keyboard_type, KeyboardType::Numeric);
        assert!(settings.editable);
    }

    #[test]
    fn keyboard_type_uses_kebab_case() {
        let parsed: KeyboardType = serde_json::from_str("\"number-pad\"").expect("parse keyboard type");
        assert_eq!(parsed, KeyboardType::NumberPad);
        assert_eq!(parsed.label(), "number-pad");
    }
}
