//! Reflectors: fixed wheels that fold the signal back through the
//! rotor stack.

use lazy_static::lazy_static;

use crate::error::EnigmaError;
use crate::wiring::Wiring;

/// A reflector: a wiring with no position, no ring and no notches.
///
/// It composes a [`Wiring`] instead of reusing [`Rotor`], so the
/// stepping and position operations that are meaningless for it do not
/// exist on it. Its signal functions index the contact maps directly,
/// with no offset, and it is traversed exactly once per key press.
///
/// [`Rotor`]: crate::rotor::Rotor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflector {
    name: String,
    wiring: Wiring,
}

lazy_static! {
    static ref REFLECTORS: [Reflector; 4] = [
        Reflector::fixed("B", "YRUHQSLDPXNGOKMIEBFZCWVJAT"),
        Reflector::fixed("C", "FVPJIAOYEDRZXWGCTKUQSBNMHL"),
        Reflector::fixed("B-Thin", "ENKQAUYWJICOPBLMDXZVFTHRGS"),
        Reflector::fixed("C-Thin", "RDOBJNTKVEHMLFCWZAXGYIPSUQ"),
    ];
}

impl Reflector {
    fn fixed(name: &str, wiring: &str) -> Reflector {
        Reflector {
            name: name.to_owned(),
            wiring: Wiring::new(wiring).expect("built-in wiring table"),
        }
    }

    /// Looks up a historical reflector (B, C, B-Thin, C-Thin) by name.
    pub fn by_name(name: &str) -> Result<&'static Reflector, EnigmaError> {
        REFLECTORS
            .iter()
            .find(|reflector| reflector.name == name)
            .ok_or_else(|| EnigmaError::UnknownReflector(name.to_owned()))
    }

    /// All registered historical reflectors.
    pub fn registry() -> &'static [Reflector] {
        &REFLECTORS[..]
    }

    /// Builds a user-supplied reflector under the same wiring
    /// validation as the built-in ones.
    pub fn custom(wiring: &str) -> Result<Reflector, EnigmaError> {
        Ok(Reflector {
            name: "Custom".to_owned(),
            wiring: Wiring::new(wiring)?,
        })
    }

    /// Registry name of this reflector.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Folds an incoming signal onto its return contact.
    pub fn signal_in(&self, signal: u8) -> u8 {
        self.wiring.entry(signal)
    }

    /// Inverse of [`signal_in`](Self::signal_in).
    pub fn signal_out(&self, signal: u8) -> u8 {
        self.wiring.exit(signal)
    }
}
