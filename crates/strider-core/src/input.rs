//! Button gestures.
//!
//! [`ClickRecognizer`] turns raw press/release events into the four logical
//! gestures the engine understands. UP and DOWN fire on press. SELECT is
//! decided by how long it is held: released before [`LONG_PRESS_MS`] it is a
//! short click, otherwise it becomes a long press as soon as the threshold
//! passes (see [`ClickRecognizer::poll`]) or at release, whichever comes
//! first.

use log::debug;

use crate::constants::LONG_PRESS_MS;

/// Physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Select,
}

/// Logical gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Next hero metric
    Up,
    /// Previous hero metric
    Down,
    /// Toggle units
    Select,
    /// Toggle focus
    SelectLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hold {
    since_ms: u64,
    fired: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClickRecognizer {
    select: Option<Hold>,
}

impl ClickRecognizer {
    pub const fn new() -> Self {
        Self { select: None }
    }

    pub fn press(&mut self, button: Button, now_ms: u64) -> Option<Gesture> {
        match button {
            Button::Up => Some(Gesture::Up),
            Button::Down => Some(Gesture::Down),
            Button::Select => {
                self.select = Some(Hold {
                    since_ms: now_ms,
                    fired: false,
                });
                None
            }
        }
    }

    pub fn release(&mut self, button: Button, now_ms: u64) -> Option<Gesture> {
        if button != Button::Select {
            return None;
        }

        let hold = self.select.take()?;
        if hold.fired {
            return None;
        }

        let held = now_ms.saturating_sub(hold.since_ms);
        debug!("SELECT held for {} ms", held);
        if held >= LONG_PRESS_MS {
            Some(Gesture::SelectLong)
        } else {
            Some(Gesture::Select)
        }
    }

    /// Fire the long press while SELECT is still held.
    pub fn poll(&mut self, now_ms: u64) -> Option<Gesture> {
        let hold = self.select.as_mut()?;
        if hold.fired || now_ms.saturating_sub(hold.since_ms) < LONG_PRESS_MS {
            return None;
        }
        hold.fired = true;
        Some(Gesture::SelectLong)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_down_fire_on_press() {
        let mut clicks = ClickRecognizer::new();
        assert_eq!(clicks.press(Button::Up, 0), Some(Gesture::Up));
        assert_eq!(clicks.release(Button::Up, 10), None);
        assert_eq!(clicks.press(Button::Down, 20), Some(Gesture::Down));
    }

    #[test]
    fn test_short_select() {
        let mut clicks = ClickRecognizer::new();
        assert_eq!(clicks.press(Button::Select, 1000), None);
        assert_eq!(clicks.poll(1499), None);
        assert_eq!(clicks.release(Button::Select, 1499), Some(Gesture::Select));
    }

    #[test]
    fn test_long_select_on_release() {
        let mut clicks = ClickRecognizer::new();
        clicks.press(Button::Select, 1000);
        assert_eq!(clicks.release(Button::Select, 1500), Some(Gesture::SelectLong));
    }

    #[test]
    fn test_long_select_fires_once_while_held() {
        let mut clicks = ClickRecognizer::new();
        clicks.press(Button::Select, 0);
        assert_eq!(clicks.poll(600), Some(Gesture::SelectLong));
        assert_eq!(clicks.poll(700), None);
        assert_eq!(clicks.release(Button::Select, 800), None);
    }

    #[test]
    fn test_release_without_press() {
        let mut clicks = ClickRecognizer::new();
        assert_eq!(clicks.release(Button::Select, 5), None);
        assert_eq!(clicks.poll(5000), None);
    }
}
