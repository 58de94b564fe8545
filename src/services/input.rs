//! Polled key-state service
//!
//! Replaces the original keyboard interrupt handler: the platform layer
//! feeds press/release events each frame and the game loop queries held
//! keys by scancode.

/// Number of scancode slots tracked
pub const MAX_SCANCODES: usize = 123;

/// Common scancodes (PC set 1)
pub mod scancode {
    pub const ESC: u8 = 0x01;
    pub const UP: u8 = 0x48;
    pub const LEFT: u8 = 0x4B;
    pub const RIGHT: u8 = 0x4D;
    pub const DOWN: u8 = 0x50;
}

/// Held-key tracking, fed by the platform layer
pub struct KeyboardState {
    keys: [bool; MAX_SCANCODES],
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            keys: [false; MAX_SCANCODES],
        }
    }

    /// Mark a key as held; out-of-range scancodes are ignored
    pub fn press(&mut self, code: u8) {
        if (code as usize) < MAX_SCANCODES {
            self.keys[code as usize] = true;
        }
    }

    /// Mark a key as released; out-of-range scancodes are ignored
    pub fn release(&mut self, code: u8) {
        if (code as usize) < MAX_SCANCODES {
            self.keys[code as usize] = false;
        }
    }

    /// Is this key currently held?
    pub fn is_key_pressed(&self, code: u8) -> bool {
        (code as usize) < MAX_SCANCODES && self.keys[code as usize]
    }

    /// Release everything (used when the window loses focus)
    pub fn clear(&mut self) {
        self.keys = [false; MAX_SCANCODES];
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut kb = KeyboardState::new();
        assert!(!kb.is_key_pressed(scancode::ESC));

        kb.press(scancode::ESC);
        assert!(kb.is_key_pressed(scancode::ESC));

        kb.release(scancode::ESC);
        assert!(!kb.is_key_pressed(scancode::ESC));
    }

    #[test]
    fn test_out_of_range_scancode() {
        let mut kb = KeyboardState::new();
        kb.press(200);
        assert!(!kb.is_key_pressed(200));
    }

    #[test]
    fn test_clear() {
        let mut kb = KeyboardState::new();
        kb.press(scancode::LEFT);
        kb.press(scancode::RIGHT);
        kb.clear();
        assert!(!kb.is_key_pressed(scancode::LEFT));
        assert!(!kb.is_key_pressed(scancode::RIGHT));
    }
}
