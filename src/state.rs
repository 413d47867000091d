//! Per-slot rotor state, replaced by value on every change.

use crate::wiring::{char_to_position, position_to_char, WIRING_LEN};

/// Snapshot of one rotor slot: rotation odometer, ring setting, and
/// current position.
///
/// A `RotorState` is never mutated in place; every operation returns a
/// fresh value and the machine swaps it into the slot. The rotation
/// count measures motion since the display or position was last set
/// explicitly, not absolute history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotorState {
    rotations: u32,
    ring_setting: u8,
    position: u8,
}

impl RotorState {
    /// State with position 0, ring setting 0 and a zero odometer;
    /// the window shows 'A'.
    pub fn new() -> Self {
        RotorState::default()
    }

    /// Number of steps taken since the display or position was last set.
    pub fn rotations(&self) -> u32 {
        self.rotations
    }

    /// Ring setting, 0-based.
    pub fn ring_setting(&self) -> u8 {
        self.ring_setting
    }

    /// Internal rotation index, 0-based.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// The letter visible in the machine window. Derived from position
    /// and ring setting, never stored.
    pub fn display_val(&self) -> char {
        position_to_char(self.position, self.ring_setting)
    }

    /// Moves the rotor so the given letter shows in the window and
    /// resets the odometer.
    #[must_use]
    pub fn with_display(self, display: char) -> Self {
        RotorState {
            rotations: 0,
            ring_setting: self.ring_setting,
            position: char_to_position(display, self.ring_setting),
        }
    }

    /// Moves the rotor to the given position (taken mod 26) and resets
    /// the odometer.
    #[must_use]
    pub fn with_position(self, position: u32) -> Self {
        RotorState {
            rotations: 0,
            ring_setting: self.ring_setting,
            position: (position % WIRING_LEN as u32) as u8,
        }
    }

    /// Replaces the ring setting (taken mod 26), keeping position and
    /// odometer untouched.
    #[must_use]
    pub fn with_ring_setting(self, ring_setting: u32) -> Self {
        RotorState {
            rotations: self.rotations,
            ring_setting: (ring_setting % WIRING_LEN as u32) as u8,
            position: self.position,
        }
    }

    /// Advances the rotor one step.
    #[must_use]
    pub(crate) fn rotated(self) -> Self {
        RotorState {
            rotations: self.rotations + 1,
            ring_setting: self.ring_setting,
            position: (self.position + 1) % WIRING_LEN as u8,
        }
    }
}
