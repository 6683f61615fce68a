//! Demo application hosting a single pin code widget.
//!
//! The app plays the caller's role: it owns the code, echoes every proposed
//! change back into the widget and keeps a short activity log of the events
//! the widget emitted.

use std::collections::VecDeque;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use pincode_types::PinEvent;

use crate::ui::components::pin_code::{PinCodeProps, PinCodeState};

const ACTIVITY_CAPACITY: usize = 6;

pub struct App {
    pub pin: PinCodeState,
    /// Caller-owned code
    code: String,
    fulfilled: Option<String>,
    activity: VecDeque<String>,
    exit: bool,
}

impl App {
    pub fn new(props: PinCodeProps) -> Self {
        let mut app = Self {
            pin: PinCodeState::new(props),
            code: String::new(),
            fulfilled: None,
            activity: VecDeque::with_capacity(ACTIVITY_CAPACITY),
            exit: false,
        };
        let events = app.pin.mount();
        app.apply(events);
        app
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn fulfilled(&self) -> Option<&str> {
        self.fulfilled.as_deref()
    }

    pub fn take_fulfilled(&mut self) -> Option<String> {
        self.fulfilled.take()
    }

    pub fn activity(&self) -> impl Iterator<Item = &str> {
        self.activity.iter().map(String::as_str)
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// Route a terminal event. Returns `true` when a redraw is needed.
    pub fn handle_event(&mut self, event: Event, now: Instant) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Paste(text) => {
                let events = self.pin.handle_paste(&text, now);
                self.apply(events);
                true
            }
            Event::Mouse(mouse) => {
                let events = self.pin.handle_mouse_event(mouse);
                let changed = !events.is_empty();
                self.apply(events);
                changed
            }
            Event::Resize(..) => true,
            Event::FocusGained | Event::FocusLost => false,
        }
    }

    /// Expire timed widget state. Returns `true` when a redraw is needed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.pin.on_tick(now)
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Esc => {
                self.fulfilled = None;
                self.exit = true;
            }
            KeyCode::Enter if self.fulfilled.is_some() => self.exit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                let events = if self.pin.is_focused() {
                    self.pin.release_focus()
                } else {
                    self.pin.request_focus()
                };
                self.apply(events);
            }
            _ => {
                let events = self.pin.handle_key_event(key, now);
                self.apply(events);
            }
        }
        true
    }

    fn apply(&mut self, events: Vec<PinEvent>) {
        for event in events {
            let entry = match &event {
                PinEvent::Changed(code) => format!("change: {} of {}", code.chars().count(), self.pin.props().code_length),
                PinEvent::Fulfilled(_) => "fulfill: press Enter to submit".to_string(),
                PinEvent::Backspace => "backspace".to_string(),
                PinEvent::Focused => "focus".to_string(),
                PinEvent::Blurred => "blur".to_string(),
            };
            self.log(entry);

            match event {
                PinEvent::Changed(code) => {
                    if code.chars().count() != self.pin.props().code_length {
                        self.fulfilled = None;
                    }
                    self.pin.set_value(code.as_str());
                    self.code = code;
                }
                PinEvent::Fulfilled(code) => self.fulfilled = Some(code),
                PinEvent::Backspace | PinEvent::Focused | PinEvent::Blurred => {}
            }
        }
    }

    fn log(&mut self, entry: String) {
        if self.activity.len() == ACTIVITY_CAPACITY {
            self.activity.pop_front();
        }
        self.activity.push_back(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn focused_app() -> App {
        App::new(PinCodeProps {
            auto_focus: true,
            ..PinCodeProps::default()
        })
    }

    #[test]
    fn echoes_changes_back_into_widget() {
        let mut app = focused_app();
        let now = Instant::now();
        for c in ['1', '2'] {
            app.handle_event(press(KeyCode::Char(c)), now);
        }
        assert_eq!(app.code(), "12");
        assert_eq!(app.pin.value(), "12");
        assert_eq!(app.fulfilled(), None);
    }

    #[test]
    fn enter_submits_only_after_fulfillment() {
        let mut app = focused_app();
        let now = Instant::now();
        app.handle_event(press(KeyCode::Enter), now);
        assert!(!app.should_exit());

        app.handle_event(Event::Paste("1234".into()), now);
        assert_eq!(app.fulfilled(), Some("1234"));
        app.handle_event(press(KeyCode::Enter), now);
        assert!(app.should_exit());
        assert_eq!(app.take_fulfilled().as_deref(), Some("1234"));
    }

    #[test]
    fn deleting_after_fulfillment_withdraws_code() {
        let mut app = focused_app();
        let now = Instant::now();
        app.handle_event(Event::Paste("1234".into()), now);
        app.handle_event(press(KeyCode::Backspace), now);
        assert_eq!(app.code(), "123");
        assert_eq!(app.fulfilled(), None);
    }

    #[test]
    fn tab_toggles_focus_and_logs_it() {
        let mut app = focused_app();
        app.handle_event(press(KeyCode::Tab), Instant::now());
        assert!(!app.pin.is_focused());
        let activity: Vec<&str> = app.activity().collect();
        assert_eq!(activity, vec!["focus", "blur"]);
    }

    #[test]
    fn activity_log_is_bounded() {
        let mut app = focused_app();
        let now = Instant::now();
        for _ in 0..10 {
            app.handle_event(press(KeyCode::Backspace), now);
        }
        assert_eq!(app.activity().count(), ACTIVITY_CAPACITY);
    }
}
