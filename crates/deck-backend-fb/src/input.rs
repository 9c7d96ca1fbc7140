//! Queue-fed input backend.
//!
//! The host (a window loop, an FFI bridge, or a test script) pushes
//! platform-agnostic events in; the shell polls them out. Convenience
//! constructors cover scripted sequences for headless runs.

use std::collections::VecDeque;

use deck_types::backend::InputBackend;
use deck_types::input::{Button, InputEvent};

/// An `InputBackend` backed by a plain event queue.
#[derive(Debug, Default)]
pub struct QueueInput {
    queue: VecDeque<InputEvent>,
}

impl QueueInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from a scripted event sequence.
    pub fn scripted(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    /// Push one event onto the queue.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Push a button press.
    pub fn press(&mut self, button: Button) {
        self.queue.push_back(InputEvent::ButtonPress(button));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputBackend for QueueInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_drains_in_order() {
        let mut input = QueueInput::new();
        input.press(Button::Down);
        input.press(Button::Confirm);
        let events = input.poll_events();
        assert_eq!(
            events,
            vec![
                InputEvent::ButtonPress(Button::Down),
                InputEvent::ButtonPress(Button::Confirm),
            ]
        );
        assert!(input.poll_events().is_empty());
        assert!(input.is_empty());
    }

    #[test]
    fn scripted_sequence() {
        let mut input = QueueInput::scripted([
            InputEvent::ButtonPress(Button::Down),
            InputEvent::Quit,
        ]);
        assert_eq!(input.poll_events().len(), 2);
    }

    #[test]
    fn pointer_events_pass_through() {
        let mut input = QueueInput::new();
        input.push(InputEvent::PointerDown { x: 3, y: 4 });
        input.push(InputEvent::PointerRelease { x: 3, y: 4 });
        let events = input.poll_events();
        assert_eq!(events[0], InputEvent::PointerDown { x: 3, y: 4 });
    }
}
