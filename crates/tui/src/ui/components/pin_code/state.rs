use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use pincode_types::{KeyboardType, PinEvent, PinSettings};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::{Position, Rect};
use tracing::debug;

use super::capture::{CaptureOptions, CaptureProps, CaptureSignal, CaptureSurface};
use super::cell::{CellView, derive_cells};
use super::content::Content;
use super::reveal::RevealTimer;
use super::style::PinStyles;

/// Widget configuration, supplied once per mount.
#[derive(Debug, Clone, PartialEq)]
pub struct PinCodeProps {
    pub code_length: usize,
    /// Cell width in columns; height is half of it, rounded up
    pub cell_size: u16,
    pub cell_spacing: u16,
    /// Shown in empty cells; `None` leaves them blank
    pub placeholder: Option<Content>,
    pub password: bool,
    pub mask: Content,
    /// Reveal-before-mask window; zero masks immediately
    pub mask_delay: Duration,
    pub keyboard_type: KeyboardType,
    pub auto_focus: bool,
    pub restrict_to_numbers: bool,
    pub editable: bool,
    pub disable_fullscreen_ui: bool,
    pub label: Option<Content>,
    pub test_id: Option<String>,
    pub right_to_left: bool,
    pub styles: PinStyles,
    /// Overrides applied last to the capture surface
    pub input_options: CaptureOptions,
}

impl Default for PinCodeProps {
    fn default() -> Self {
        Self::from_settings(&PinSettings::default())
    }
}

impl PinCodeProps {
    pub fn from_settings(settings: &PinSettings) -> Self {
        Self {
            code_length: settings.code_length,
            cell_size: settings.cell_size,
            cell_spacing: settings.cell_spacing,
            placeholder: (!settings.placeholder.is_empty()).then(|| Content::text(&settings.placeholder)),
            password: settings.password,
            mask: Content::text(&settings.mask),
            mask_delay: Duration::from_millis(settings.mask_delay_ms),
            keyboard_type: settings.keyboard_type,
            auto_focus: settings.auto_focus,
            restrict_to_numbers: settings.restrict_to_numbers,
            editable: settings.editable,
            disable_fullscreen_ui: settings.disable_fullscreen_ui,
            label: settings.label.as_deref().map(Content::text),
            test_id: settings.test_id.clone(),
            right_to_left: settings.right_to_left,
            styles: PinStyles::default(),
            input_options: CaptureOptions::default(),
        }
    }

    /// Capture surface props: the widget's defaults with caller options on top.
    pub fn capture_props(&self) -> CaptureProps {
        CaptureProps {
            max_length: self.code_length,
            editable: self.editable,
            auto_focus: self.auto_focus,
            keyboard_type: self.keyboard_type,
            disable_fullscreen_ui: self.disable_fullscreen_ui,
            test_id: self.test_id.clone(),
            ..CaptureProps::default()
        }
        .merged(&self.input_options)
    }

    /// Total width of the cell row.
    pub fn container_width(&self) -> u16 {
        let cells = self.code_length as u64;
        let width = u64::from(self.cell_size) * cells + u64::from(self.cell_spacing) * cells.saturating_sub(1);
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    /// Cell height in rows.
    pub fn cell_height(&self) -> u16 {
        self.cell_size.div_ceil(2)
    }
}

/// Keep only ASCII decimal digits, in order.
pub fn filter_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

const DEFAULT_FOCUS_NAME: &str = "pin_code";

/// Controller for a pin code widget.
///
/// The value is owned by the caller: input handlers only *propose* a new
/// value through [`PinEvent::Changed`], and the caller echoes it back with
/// [`PinCodeState::set_value`]. Focus lives in a rat-focus [`FocusFlag`] so
/// the widget can take part in an application-wide focus ring.
#[derive(Debug)]
pub struct PinCodeState {
    props: PinCodeProps,
    value: String,
    capture: CaptureSurface,
    focus: FocusFlag,
    /// Focus as last reported through events
    reported_focus: bool,
    reveal: RevealTimer,
    /// Area covered by the cells on the last render
    pub(crate) area: Rect,
}

impl PinCodeState {
    pub fn new(props: PinCodeProps) -> Self {
        let capture = CaptureSurface::new(props.capture_props());
        // The test id addresses the widget inside a focus ring.
        let focus = FocusFlag::new().with_name(capture.props().test_id.as_deref().unwrap_or(DEFAULT_FOCUS_NAME));
        focus.set(capture.props().auto_focus);
        Self {
            props,
            value: String::new(),
            capture,
            focus,
            reported_focus: false,
            reveal: RevealTimer::default(),
            area: Rect::default(),
        }
    }

    pub fn props(&self) -> &PinCodeProps {
        &self.props
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn capture(&self) -> &CaptureSurface {
        &self.capture
    }

    pub fn is_focused(&self) -> bool {
        self.focus.get()
    }

    /// Whether the most recently typed character is currently shown unmasked.
    pub fn is_revealing(&self) -> bool {
        self.props.password && self.reveal.is_pending()
    }

    /// Next instant at which [`PinCodeState::on_tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.reveal.deadline()
    }

    /// Area covered by the cells on the last render.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Report initial focus when the widget auto-focuses.
    pub fn mount(&mut self) -> Vec<PinEvent> {
        self.sync_focus()
    }

    /// Cancel pending timers before the widget goes away.
    pub fn unmount(&mut self) {
        if self.reveal.cancel() {
            debug!("pin code unmounted with pending reveal; timer cancelled");
        }
    }

    /// Echo the caller-owned value back into the widget.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.capture.sync(&self.value);
    }

    pub fn request_focus(&mut self) -> Vec<PinEvent> {
        self.focus.set(true);
        self.sync_focus()
    }

    pub fn release_focus(&mut self) -> Vec<PinEvent> {
        self.focus.set(false);
        self.sync_focus()
    }

    /// Emit `Focused`/`Blurred` for any change of the focus flag since the
    /// last report, including changes made by an external focus ring.
    pub fn sync_focus(&mut self) -> Vec<PinEvent> {
        let focused = self.focus.get();
        if focused == self.reported_focus {
            return Vec::new();
        }
        self.reported_focus = focused;
        debug!(focused, "pin code focus changed");
        if focused { vec![PinEvent::Focused] } else { vec![PinEvent::Blurred] }
    }

    /// Route a key press through the capture surface. Ignored without focus.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Vec<PinEvent> {
        if !self.is_focused() {
            return Vec::new();
        }
        let mut events = Vec::new();
        for signal in self.capture.handle_key(key) {
            match signal {
                CaptureSignal::Backspace => {
                    debug!(len = self.capture.cursor(), "pin code backspace");
                    events.push(PinEvent::Backspace);
                }
                CaptureSignal::Edit(raw) => events.extend(self.apply_edit(raw, now)),
            }
        }
        events
    }

    /// Route pasted text through the capture surface. Ignored without focus.
    pub fn handle_paste(&mut self, pasted: &str, now: Instant) -> Vec<PinEvent> {
        if !self.is_focused() {
            return Vec::new();
        }
        match self.capture.handle_paste(pasted) {
            Some(CaptureSignal::Edit(raw)) => self.apply_edit(raw, now),
            _ => Vec::new(),
        }
    }

    /// Left click inside the widget focuses it; a click elsewhere blurs it.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Vec<PinEvent> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        if self.area.contains(Position::new(mouse.column, mouse.row)) {
            self.request_focus()
        } else if self.is_focused() {
            self.release_focus()
        } else {
            Vec::new()
        }
    }

    /// Expire the reveal window once its deadline passes. Returns `true` when
    /// the visible state changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let fired = self.reveal.fire_if_due(now);
        if fired {
            debug!("pin code reveal window elapsed");
        }
        fired
    }

    /// Derive the cells for the current value and focus.
    pub fn cells(&self) -> Vec<CellView> {
        derive_cells(&self.props, &self.value, self.is_focused(), self.is_revealing())
    }

    /// Terminal cursor position for the focused cell when the caller made the
    /// caret visible.
    pub fn cursor_position(&self) -> Option<Position> {
        let capture = self.capture.props();
        if capture.caret_hidden || !self.is_focused() || self.area.is_empty() {
            return None;
        }
        let index = self.capture.cursor().min(self.props.code_length.saturating_sub(1));
        let slot = if self.props.right_to_left {
            self.props.code_length.saturating_sub(1).saturating_sub(index)
        } else {
            index
        };
        let stride = u64::from(self.props.cell_size) + u64::from(self.props.cell_spacing);
        let offset = stride * slot as u64 + u64::from(self.props.cell_size / 2);
        let x = u16::try_from(u64::from(self.area.x) + offset).ok()?;
        let y = self.area.y.checked_add(self.props.cell_height() / 2)?;
        self.area.contains(Position::new(x, y)).then_some(Position::new(x, y))
    }

    fn apply_edit(&mut self, raw: String, now: Instant) -> Vec<PinEvent> {
        let candidate = if self.props.restrict_to_numbers { filter_digits(&raw) } else { raw };
        let candidate_len = candidate.chars().count();
        let appended = candidate_len > self.value.chars().count();

        let mut events = vec![PinEvent::Changed(candidate.clone())];
        if candidate_len == self.props.code_length {
            debug!(len = candidate_len, "pin code fulfilled");
            events.push(PinEvent::Fulfilled(candidate));
        }

        if self.props.password && appended && !self.props.mask_delay.is_zero() {
            let replaced = self.reveal.arm(now, self.props.mask_delay);
            debug!(replaced, delay_ms = self.props.mask_delay.as_millis() as u64, "pin code reveal armed");
        } else if self.reveal.cancel() {
            debug!("pin code reveal cleared by edit");
        }

        events
    }
}

impl HasFocus for PinCodeState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    fn area(&self) -> Rect {
        self.area
    }
}

impl Drop for PinCodeState {
    fn drop(&mut self) {
        self.unmount();
    }
}
