use pincode_types::PinEvent;

type CodeHandler = Box<dyn FnMut(&str)>;
type SignalHandler = Box<dyn FnMut()>;

/// Optional callbacks for hosts that prefer closures over matching on
/// [`PinEvent`]s. Missing handlers are no-ops.
#[derive(Default)]
pub struct PinHandlers {
    on_change_text: Option<CodeHandler>,
    on_fulfill: Option<CodeHandler>,
    on_backspace: Option<SignalHandler>,
    on_focus: Option<SignalHandler>,
    on_blur: Option<SignalHandler>,
}

impl PinHandlers {
    pub fn on_change_text(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_change_text = Some(Box::new(handler));
        self
    }

    pub fn on_fulfill(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_fulfill = Some(Box::new(handler));
        self
    }

    pub fn on_backspace(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_backspace = Some(Box::new(handler));
        self
    }

    pub fn on_focus(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_focus = Some(Box::new(handler));
        self
    }

    pub fn on_blur(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_blur = Some(Box::new(handler));
        self
    }

    /// Invoke handlers for `events`, in order.
    pub fn dispatch(&mut self, events: &[PinEvent]) {
        for event in events {
            match event {
                PinEvent::Changed(code) => {
                    if let Some(handler) = self.on_change_text.as_mut() {
                        handler(code);
                    }
                }
                PinEvent::Fulfilled(code) => {
                    if let Some(handler) = self.on_fulfill.as_mut() {
                        handler(code);
                    }
                }
                PinEvent::Backspace => {
                    if let Some(handler) = self.on_backspace.as_mut() {
                        handler();
                    }
                }
                PinEvent::Focused => {
                    if let Some(handler) = self.on_focus.as_mut() {
                        handler();
                    }
                }
                PinEvent::Blurred => {
                    if let Some(handler) = self.on_blur.as_mut() {
                        handler();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn handlers_fire_in_event_order() {
        let log = Rc::new(RefCell::new(Vec::<String>::new()));
        let (change_log, fulfill_log, backspace_log) = (log.clone(), log.clone(), log.clone());
        let mut handlers = PinHandlers::default()
            .on_change_text(move |code| change_log.borrow_mut().push(format!("change:{code}")))
            .on_fulfill(move |code| fulfill_log.borrow_mut().push(format!("fulfill:{code}")))
            .on_backspace(move || backspace_log.borrow_mut().push("backspace".to_string()));

        handlers.dispatch(&[
            PinEvent::Backspace,
            PinEvent::Changed("1234".into()),
            PinEvent::Fulfilled("1234".into()),
        ]);

        assert_eq!(*log.borrow(), vec!["backspace", "change:1234", "fulfill:1234"]);
    }

    #[test]
    fn missing_handlers_are_no_ops() {
        let mut handlers = PinHandlers::default();
        handlers.dispatch(&[PinEvent::Focused, PinEvent::Blurred, PinEvent::Changed("1".into())]);
    }
}
