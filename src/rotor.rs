//! Rotors: wired wheels with turnover notches, and the registry of
//! historical wheels.

use lazy_static::lazy_static;

use crate::error::EnigmaError;
use crate::state::RotorState;
use crate::wiring::{Wiring, WIRING_LEN};

/// A rotor: an immutable wiring plus the notch letters at which its
/// pawl engages the next wheel.
///
/// Rotors are stateless. Position, ring setting and the rotation
/// odometer live in a [`RotorState`] owned by the machine slot, and
/// every signal function takes that state as an argument. Historical
/// wheels are singletons resolved through [`Rotor::by_name`]; a
/// user-supplied wheel from [`Rotor::custom`] is validated identically
/// and behaves the same everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    wiring: Wiring,
    notches: Vec<char>,
}

lazy_static! {
    static ref ROTORS: [Rotor; 10] = [
        Rotor::fixed("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", &['Q']),
        Rotor::fixed("II", "AJDKSIRUXBLHWTMCQGZNPYFVOE", &['E']),
        Rotor::fixed("III", "BDFHJLCPRTXVZNYEIWGAKMUSQO", &['V']),
        Rotor::fixed("IV", "ESOVPZJAYQUIRHXLNFTGKDCMWB", &['J']),
        Rotor::fixed("V", "VZBRGITYUPSDNHLXAWMJQOFECK", &['Z']),
        Rotor::fixed("VI", "JPGVOUMFYQBENHZRDKASXLICTW", &['Z', 'M']),
        Rotor::fixed("VII", "NZJHGRCXMYSWBOUFAIVLPEKQDT", &['Z', 'M']),
        Rotor::fixed("VIII", "FKQHTLXOCBJSPDZRAMEWNIUYGV", &['Z', 'M']),
        Rotor::fixed("Beta", "LEYJVCNIXWPBQMDRTAKZGFUHOS", &[]),
        Rotor::fixed("Gamma", "FSOKANUERHMBTIYCWLQPZXVGJD", &[]),
    ];
}

impl Rotor {
    fn fixed(name: &str, wiring: &str, notches: &[char]) -> Rotor {
        Rotor {
            name: name.to_owned(),
            wiring: Wiring::new(wiring).expect("built-in wiring table"),
            notches: notches.to_vec(),
        }
    }

    /// Looks up a historical rotor (I-VIII, Beta, Gamma) by name.
    pub fn by_name(name: &str) -> Result<&'static Rotor, EnigmaError> {
        ROTORS
            .iter()
            .find(|rotor| rotor.name == name)
            .ok_or_else(|| EnigmaError::UnknownRotor(name.to_owned()))
    }

    /// All registered historical rotors.
    pub fn registry() -> &'static [Rotor] {
        &ROTORS[..]
    }

    /// Builds a user-supplied rotor under the same wiring validation as
    /// the built-in wheels. Notch letters are upper-cased.
    pub fn custom(wiring: &str, notches: &[char]) -> Result<Rotor, EnigmaError> {
        Ok(Rotor {
            name: "Custom".to_owned(),
            wiring: Wiring::new(wiring)?,
            notches: notches.iter().map(|c| c.to_ascii_uppercase()).collect(),
        })
    }

    /// Registry name of this rotor.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Carries a signal through the wheel towards the reflector.
    ///
    /// The rotation offset is applied going in and removed coming out,
    /// which models the physically rotated wiring without materialising
    /// a rotated permutation per step.
    pub fn signal_in(&self, state: RotorState, signal: u8) -> u8 {
        let pin = (signal + state.position()) % WIRING_LEN as u8;
        let contact = self.wiring.entry(pin);
        (contact + WIRING_LEN as u8 - state.position()) % WIRING_LEN as u8
    }

    /// Carries a signal back through the wheel away from the reflector.
    pub fn signal_out(&self, state: RotorState, signal: u8) -> u8 {
        let contact = (signal + state.position()) % WIRING_LEN as u8;
        let pin = self.wiring.exit(contact);
        (pin + WIRING_LEN as u8 - state.position()) % WIRING_LEN as u8
    }

    /// True when a notch sits over the stepping pawl, i.e. the window
    /// letter equals one of this wheel's notch letters.
    pub fn is_notch_over_pawl(&self, state: RotorState) -> bool {
        self.notches.contains(&state.display_val())
    }

    /// Advances the wheel one step, returning the new slot state.
    #[must_use]
    pub fn rotate(&self, state: RotorState) -> RotorState {
        state.rotated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_finds_every_historical_wheel() {
        for name in ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "Beta", "Gamma"] {
            assert_eq!(Rotor::by_name(name).unwrap().name(), name);
        }
    }

    #[test]
    fn by_name_rejects_unknown_wheels() {
        assert_eq!(
            Rotor::by_name("IX"),
            Err(EnigmaError::UnknownRotor("IX".into()))
        );
    }

    #[test]
    fn built_in_wirings_are_valid_permutations() {
        let state = RotorState::new();
        for rotor in Rotor::registry() {
            for signal in 0..WIRING_LEN as u8 {
                let through = rotor.signal_in(state, signal);
                assert_eq!(rotor.signal_out(state, through), signal, "{}", rotor.name());
            }
        }
    }

    #[test]
    fn signal_transform_applies_the_position_offset() {
        let rotor = Rotor::by_name("I").unwrap();
        let at_a = RotorState::new();
        // Rotor I maps A to E at position 0.
        assert_eq!(rotor.signal_in(at_a, 0), 4);
        // One step on: pin B ('A' + offset 1) wires to K, minus the offset.
        let at_b = rotor.rotate(at_a);
        assert_eq!(rotor.signal_in(at_b, 0), 9);
        // The inverse transform undoes it at any offset.
        for step in 0..WIRING_LEN {
            let state = RotorState::new().with_position(step as u32);
            for signal in 0..WIRING_LEN as u8 {
                assert_eq!(rotor.signal_out(state, rotor.signal_in(state, signal)), signal);
            }
        }
    }

    #[test]
    fn notch_detection_follows_the_window_letter() {
        let rotor_i = Rotor::by_name("I").unwrap();
        assert!(rotor_i.is_notch_over_pawl(RotorState::new().with_display('Q')));
        assert!(!rotor_i.is_notch_over_pawl(RotorState::new().with_display('A')));

        // Multi-notch wheels engage at both letters.
        let rotor_vi = Rotor::by_name("VI").unwrap();
        assert!(rotor_vi.is_notch_over_pawl(RotorState::new().with_display('Z')));
        assert!(rotor_vi.is_notch_over_pawl(RotorState::new().with_display('M')));
        assert!(!rotor_vi.is_notch_over_pawl(RotorState::new().with_display('Q')));

        // The notch follows the display, which moves with the ring.
        let offset = RotorState::new().with_ring_setting(1).with_display('Q');
        assert!(rotor_i.is_notch_over_pawl(offset));
    }

    #[test]
    fn beta_and_gamma_never_engage_the_pawl() {
        for name in ["Beta", "Gamma"] {
            let rotor = Rotor::by_name(name).unwrap();
            for c in 'A'..='Z' {
                assert!(!rotor.is_notch_over_pawl(RotorState::new().with_display(c)));
            }
        }
    }

    #[test]
    fn custom_rotor_is_validated_like_the_built_ins() {
        let rotor = Rotor::custom("ekmflgdqvzntowyhxuspaibrcj", &['q']).unwrap();
        assert_eq!(rotor.name(), "Custom");
        assert!(rotor.is_notch_over_pawl(RotorState::new().with_display('Q')));

        assert_eq!(
            Rotor::custom("EKMFLGDQVZNTOWYHXUSPAIBRC", &[]),
            Err(EnigmaError::WiringLength(25))
        );
        assert_eq!(
            Rotor::custom("EKMFLGDQVZNTOWYHXUSPAIBRCC", &[]),
            Err(EnigmaError::WiringDuplicate('C'))
        );
    }
}
