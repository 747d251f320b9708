#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// A pad going down or up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_number: usize,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(key_number: usize) -> Self {
        Self {
            key_number,
            pressed: true,
        }
    }

    pub fn release(key_number: usize) -> Self {
        Self {
            key_number,
            pressed: false,
        }
    }
}

/// Non-blocking queue of key events.
pub trait KeyEventSource {
    fn pop(&mut self) -> Option<KeyEvent>;
}

impl KeyEventSource for std::collections::VecDeque<KeyEvent> {
    fn pop(&mut self) -> Option<KeyEvent> {
        self.pop_front()
    }
}

#[cfg(feature = "rtrb")]
impl KeyEventSource for Consumer<KeyEvent> {
    fn pop(&mut self) -> Option<KeyEvent> {
        Consumer::pop(self).ok()
    }
}
