//! Button input with per-frame edge detection
//!
//! The handheld has a d-pad and two face buttons. The board code reports
//! the raw held mask through [`ButtonSource`]; [`InputState`] keeps the
//! previous frame's mask so states can ask for "just pressed" and "just
//! released" edges.
//!
//! # Example
//!
//! ```
//! use mech::input::{Button, Buttons, InputState};
//!
//! let mut input = InputState::new();
//! input.update(Buttons::NONE | Button::A);
//! assert!(input.just_pressed(Button::A));
//!
//! input.update(Buttons::NONE | Button::A);
//! assert!(input.held(Button::A));
//! assert!(!input.just_pressed(Button::A));
//! ```

/// Button flags
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Button {
    /// D-pad Left
    Left = 0x20,
    /// D-pad Right
    Right = 0x40,
    /// D-pad Up
    Up = 0x80,
    /// D-pad Down
    Down = 0x10,
    /// A button (primary)
    A = 0x08,
    /// B button (secondary)
    B = 0x04,
}

/// Bitfield of buttons
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Buttons(pub u8);

impl Buttons {
    /// No buttons pressed
    pub const NONE: Buttons = Buttons(0);

    /// Check if a specific button is set
    #[inline]
    pub const fn contains(self, button: Button) -> bool {
        (self.0 & button as u8) != 0
    }

    /// Check if all of the specified buttons are set
    #[inline]
    pub const fn contains_all(self, buttons: Buttons) -> bool {
        (self.0 & buttons.0) == buttons.0
    }

    /// Get raw button flags
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl core::ops::BitOr for Button {
    type Output = Buttons;
    fn bitor(self, other: Button) -> Buttons {
        Buttons(self as u8 | other as u8)
    }
}

impl core::ops::BitOr<Button> for Buttons {
    type Output = Buttons;
    fn bitor(self, other: Button) -> Buttons {
        Buttons(self.0 | other as u8)
    }
}

impl From<Button> for Buttons {
    fn from(button: Button) -> Self {
        Buttons(button as u8)
    }
}

/// Raw button hardware
pub trait ButtonSource {
    /// Read the currently held buttons
    fn poll(&mut self) -> Buttons;
}

/// Current and previous frame button masks
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct InputState {
    current: Buttons,
    previous: Buttons,
}

impl InputState {
    pub const fn new() -> Self {
        Self {
            current: Buttons::NONE,
            previous: Buttons::NONE,
        }
    }

    /// Shift in this frame's held mask (call once per frame)
    pub fn update(&mut self, held: Buttons) {
        self.previous = self.current;
        self.current = held;
    }

    /// Buttons currently held
    #[inline]
    pub const fn buttons(&self) -> Buttons {
        self.current
    }

    #[inline]
    pub const fn held(&self, button: Button) -> bool {
        self.current.contains(button)
    }

    /// Buttons that went down this frame
    #[inline]
    pub const fn pressed(&self) -> Buttons {
        Buttons(self.current.0 & !self.previous.0)
    }

    /// Buttons that went up this frame
    #[inline]
    pub const fn released(&self) -> Buttons {
        Buttons(!self.current.0 & self.previous.0)
    }

    #[inline]
    pub const fn just_pressed(&self, button: Button) -> bool {
        self.pressed().contains(button)
    }

    #[inline]
    pub const fn just_released(&self, button: Button) -> bool {
        self.released().contains(button)
    }
}
