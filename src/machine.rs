//! The machine itself: rotor slots, stepping, and the signal path.

use crate::error::EnigmaError;
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::Rotor;
use crate::state::RotorState;
use crate::wiring::{char_to_position, position_to_char};

/// Substitute used by [`EnigmaMachine::process_text`] for characters
/// outside A-Z.
pub const DEFAULT_REPLACEMENT: char = 'X';

/// An Enigma machine: three stepping rotors, an optional fourth
/// non-stepping rotor, a reflector and a plugboard.
///
/// Slot 1 is the slow (leftmost) rotor, slot 3 the fast (rightmost) one.
/// The fourth rotor, when fitted, sits between the plugboard and the
/// fast rotor and never takes part in stepping — its presence and its
/// exclusion from the stepping mechanism are independent facts, and the
/// stepping function below is defined over slots 1-3 only.
///
/// Component references are fixed at construction. Per-slot
/// [`RotorState`] values are replaced wholesale on every key press and
/// by the explicit setters, never mutated in place.
#[derive(Debug, Clone)]
pub struct EnigmaMachine {
    rotor1: Rotor,
    rotor2: Rotor,
    rotor3: Rotor,
    rotor4: Option<Rotor>,
    reflector: Reflector,
    plugboard: Plugboard,
    state1: RotorState,
    state2: RotorState,
    state3: RotorState,
    state4: Option<RotorState>,
}

impl EnigmaMachine {
    /// Builds a three-rotor machine. Rotors are given slow to fast.
    pub fn new(rotors: [Rotor; 3], reflector: Reflector, plugboard: Plugboard) -> EnigmaMachine {
        let [rotor1, rotor2, rotor3] = rotors;
        EnigmaMachine {
            rotor1,
            rotor2,
            rotor3,
            rotor4: None,
            reflector,
            plugboard,
            state1: RotorState::new(),
            state2: RotorState::new(),
            state3: RotorState::new(),
            state4: None,
        }
    }

    /// Builds a four-rotor machine. The fourth rotor is positioned and
    /// ring-set like any other slot but is never stepped by the machine.
    pub fn with_fourth(
        rotors: [Rotor; 3],
        fourth: Rotor,
        reflector: Reflector,
        plugboard: Plugboard,
    ) -> EnigmaMachine {
        let mut machine = EnigmaMachine::new(rotors, reflector, plugboard);
        machine.rotor4 = Some(fourth);
        machine.state4 = Some(RotorState::new());
        machine
    }

    /// Number of fitted rotor slots, 3 or 4.
    pub fn rotor_count(&self) -> usize {
        if self.rotor4.is_some() {
            4
        } else {
            3
        }
    }

    /// Current window letters, slot 1 first.
    pub fn display(&self) -> String {
        let mut display = String::with_capacity(self.rotor_count());
        display.push(self.state1.display_val());
        display.push(self.state2.display_val());
        display.push(self.state3.display_val());
        if let Some(state4) = self.state4 {
            display.push(state4.display_val());
        }
        display
    }

    /// Turns each rotor so the given letters show in the windows, slot 1
    /// first, and resets every slot's rotation odometer.
    ///
    /// Fails unless the string holds exactly one character per fitted
    /// rotor.
    pub fn set_display(&mut self, display: &str) -> Result<(), EnigmaError> {
        let letters: Vec<char> = display.chars().collect();
        if letters.len() != self.rotor_count() {
            return Err(EnigmaError::DisplayLength {
                got: letters.len(),
                expected: self.rotor_count(),
            });
        }
        self.state1 = self.state1.with_display(letters[0]);
        self.state2 = self.state2.with_display(letters[1]);
        self.state3 = self.state3.with_display(letters[2]);
        if let Some(state4) = self.state4 {
            self.state4 = Some(state4.with_display(letters[3]));
        }
        Ok(())
    }

    /// Returns every window to 'A'.
    pub fn reset_display(&mut self) {
        self.state1 = self.state1.with_display('A');
        self.state2 = self.state2.with_display('A');
        self.state3 = self.state3.with_display('A');
        if let Some(state4) = self.state4 {
            self.state4 = Some(state4.with_display('A'));
        }
    }

    /// Moves each rotor to a raw position (taken mod 26), slot 1 first,
    /// resetting the odometers. One entry per fitted rotor.
    pub fn set_positions(&mut self, positions: &[u32]) -> Result<(), EnigmaError> {
        if positions.len() != self.rotor_count() {
            return Err(EnigmaError::DisplayLength {
                got: positions.len(),
                expected: self.rotor_count(),
            });
        }
        self.state1 = self.state1.with_position(positions[0]);
        self.state2 = self.state2.with_position(positions[1]);
        self.state3 = self.state3.with_position(positions[2]);
        if let Some(state4) = self.state4 {
            self.state4 = Some(state4.with_position(positions[3]));
        }
        Ok(())
    }

    /// Applies operator ring settings, slot 1 first, then returns the
    /// display to all-'A'. Inputs are 1-based per operator convention
    /// (1..=26) and stored 0-based. One entry per fitted rotor.
    pub fn set_ring_settings(&mut self, rings: &[u32]) -> Result<(), EnigmaError> {
        if rings.len() != self.rotor_count() {
            return Err(EnigmaError::DisplayLength {
                got: rings.len(),
                expected: self.rotor_count(),
            });
        }
        self.state1 = self.state1.with_ring_setting(rings[0].wrapping_sub(1));
        self.state2 = self.state2.with_ring_setting(rings[1].wrapping_sub(1));
        self.state3 = self.state3.with_ring_setting(rings[2].wrapping_sub(1));
        if let Some(state4) = self.state4 {
            self.state4 = Some(state4.with_ring_setting(rings[3].wrapping_sub(1)));
        }
        self.reset_display();
        Ok(())
    }

    /// Rotation odometers for slots 1-4; the fourth entry is 0 on a
    /// three-rotor machine.
    pub fn rotation_counts(&self) -> [u32; 4] {
        [
            self.state1.rotations(),
            self.state2.rotations(),
            self.state3.rotations(),
            self.state4.map_or(0, |state| state.rotations()),
        ]
    }

    /// Presses one key: steps the rotors, then runs the electric signal
    /// and returns the lamp that lights. Stepping and encryption are
    /// atomic per call.
    ///
    /// Fails on any key outside A-Z.
    pub fn key_press(&mut self, key: char) -> Result<char, EnigmaError> {
        if !key.is_ascii_uppercase() {
            return Err(EnigmaError::IllegalKey(key));
        }
        self.step_rotors();
        let signal = char_to_position(key, 0);
        let lamp = self.electric_signal(signal);
        Ok(position_to_char(lamp, 0))
    }

    /// Encrypts (or, identically, decrypts) a whole text.
    ///
    /// Characters are upper-cased first; anything still outside A-Z is
    /// substituted with [`DEFAULT_REPLACEMENT`] before encryption, so
    /// output length always equals input length and every substituted
    /// character still advances the rotors.
    pub fn process_text(&mut self, text: &str) -> Result<String, EnigmaError> {
        self.process_text_replacing(text, DEFAULT_REPLACEMENT)
    }

    /// [`process_text`](Self::process_text) with an explicit substitute
    /// character.
    pub fn process_text_replacing(
        &mut self,
        text: &str,
        replacement: char,
    ) -> Result<String, EnigmaError> {
        let mut output = String::with_capacity(text.len());
        for key in text.chars() {
            let key = key.to_ascii_uppercase();
            let key = if key.is_ascii_uppercase() { key } else { replacement };
            output.push(self.key_press(key)?);
        }
        Ok(output)
    }

    /// Runs one signal from keyboard to lamp: plugboard, rightmost to
    /// leftmost rotor, reflector, leftmost to rightmost rotor, plugboard.
    fn electric_signal(&self, signal: u8) -> u8 {
        let mut position = self.plugboard.signal(signal);

        if let (Some(rotor4), Some(state4)) = (&self.rotor4, self.state4) {
            position = rotor4.signal_in(state4, position);
        }
        position = self.rotor3.signal_in(self.state3, position);
        position = self.rotor2.signal_in(self.state2, position);
        position = self.rotor1.signal_in(self.state1, position);

        position = self.reflector.signal_in(position);

        position = self.rotor1.signal_out(self.state1, position);
        position = self.rotor2.signal_out(self.state2, position);
        position = self.rotor3.signal_out(self.state3, position);
        if let (Some(rotor4), Some(state4)) = (&self.rotor4, self.state4) {
            position = rotor4.signal_out(state4, position);
        }

        self.plugboard.signal(position)
    }

    fn step_rotors(&mut self) {
        let (state1, state2, state3) = step(
            (&self.rotor1, self.state1),
            (&self.rotor2, self.state2),
            (&self.rotor3, self.state3),
        );
        self.state1 = state1;
        self.state2 = state2;
        self.state3 = state3;
    }
}

/// One stepping evaluation over the three stepping rotors, slow to
/// fast, returning their new states.
///
/// The middle notch is read before anything rotates; that pre-rotation
/// read is what produces the historical double step, where the middle
/// rotor advances both on the press the fast rotor's notch engages it
/// and again on the next press via its own notch.
fn step(
    slow: (&Rotor, RotorState),
    middle: (&Rotor, RotorState),
    fast: (&Rotor, RotorState),
) -> (RotorState, RotorState, RotorState) {
    let middle_notch_active = middle.0.is_notch_over_pawl(middle.1);
    let rotate_middle = fast.0.is_notch_over_pawl(fast.1) || middle_notch_active;

    let fast_state = fast.0.rotate(fast.1);
    let middle_state = if rotate_middle {
        middle.0.rotate(middle.1)
    } else {
        middle.1
    };
    let slow_state = if middle_notch_active {
        slow.0.rotate(slow.1)
    } else {
        slow.1
    };

    (slow_state, middle_state, fast_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(names: [&str; 3]) -> EnigmaMachine {
        EnigmaMachine::new(
            [
                Rotor::by_name(names[0]).unwrap().clone(),
                Rotor::by_name(names[1]).unwrap().clone(),
                Rotor::by_name(names[2]).unwrap().clone(),
            ],
            Reflector::by_name("B").unwrap().clone(),
            Plugboard::identity(),
        )
    }

    #[test]
    fn fresh_machine_shows_all_a() {
        let m = machine(["I", "II", "III"]);
        assert_eq!(m.display(), "AAA");
        assert_eq!(m.rotor_count(), 3);
    }

    #[test]
    fn double_step_sequence() {
        let mut m = machine(["I", "II", "III"]);
        m.set_display("ADU").unwrap();

        let mut displays = Vec::new();
        for _ in 0..3 {
            m.key_press('A').unwrap();
            displays.push(m.display());
        }
        // Fast notch at V steps the middle rotor; the middle notch at E
        // then steps itself and the slow rotor on the very next press.
        assert_eq!(displays, ["ADV", "AEW", "BFX"]);
    }

    #[test]
    fn fast_rotor_steps_on_every_press() {
        let mut m = machine(["I", "II", "III"]);
        for _ in 0..26 {
            m.key_press('A').unwrap();
        }
        assert_eq!(m.rotation_counts(), [0, 1, 26, 0]);
        assert_eq!(m.display(), "ABA");
    }

    #[test]
    fn stepping_happens_before_encoding() {
        // Two machines one press apart must agree once aligned.
        let mut ahead = machine(["I", "II", "III"]);
        ahead.key_press('A').unwrap();
        let first_after_b = ahead.key_press('A').unwrap();

        let mut aligned = machine(["I", "II", "III"]);
        aligned.set_display("AAB").unwrap();
        assert_eq!(aligned.key_press('A').unwrap(), first_after_b);
    }

    #[test]
    fn illegal_keys_are_rejected() {
        let mut m = machine(["I", "II", "III"]);
        assert_eq!(m.key_press('a'), Err(EnigmaError::IllegalKey('a')));
        assert_eq!(m.key_press('1'), Err(EnigmaError::IllegalKey('1')));
        // A failed press must not have stepped anything.
        assert_eq!(m.display(), "AAA");
        assert_eq!(m.rotation_counts(), [0, 0, 0, 0]);
    }

    #[test]
    fn display_length_is_enforced() {
        let mut m = machine(["I", "II", "III"]);
        assert_eq!(
            m.set_display("AAAA"),
            Err(EnigmaError::DisplayLength { got: 4, expected: 3 })
        );
        assert_eq!(
            m.set_positions(&[0, 0]),
            Err(EnigmaError::DisplayLength { got: 2, expected: 3 })
        );
        assert_eq!(
            m.set_ring_settings(&[1, 1, 1, 1]),
            Err(EnigmaError::DisplayLength { got: 4, expected: 3 })
        );
    }

    #[test]
    fn ring_settings_reset_the_display() {
        let mut m = machine(["I", "II", "III"]);
        m.set_display("QEV").unwrap();
        m.set_ring_settings(&[2, 3, 4]).unwrap();
        assert_eq!(m.display(), "AAA");
    }

    #[test]
    fn set_positions_matches_the_ring_adjusted_display() {
        let mut m = machine(["I", "II", "III"]);
        m.set_ring_settings(&[1, 1, 2]).unwrap();
        m.set_positions(&[0, 1, 25]).unwrap();
        assert_eq!(m.display(), "ABA");
    }

    #[test]
    fn fourth_rotor_never_steps() {
        let mut m = EnigmaMachine::with_fourth(
            [
                Rotor::by_name("I").unwrap().clone(),
                Rotor::by_name("II").unwrap().clone(),
                Rotor::by_name("III").unwrap().clone(),
            ],
            Rotor::by_name("Beta").unwrap().clone(),
            Reflector::by_name("B-Thin").unwrap().clone(),
            Plugboard::identity(),
        );
        assert_eq!(m.rotor_count(), 4);
        m.set_display("AAAK").unwrap();
        for _ in 0..60 {
            m.key_press('A').unwrap();
        }
        let counts = m.rotation_counts();
        assert_eq!(counts[2], 60);
        assert_eq!(counts[3], 0);
        assert_eq!(m.display().chars().nth(3), Some('K'));
    }
}
