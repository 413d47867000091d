//! Error types for the bombe library.

use thiserror::Error;

/// Errors produced by machine construction and operation.
///
/// All of these are deterministic input-validation failures raised at
/// construction or call time; none are recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Wiring does not contain exactly 26 letters.
    #[error("invalid wiring length {0}, expected 26")]
    WiringLength(usize),
    /// A letter occurs more than once in the wiring.
    #[error("letter {0} appears more than once in wiring")]
    WiringDuplicate(char),
    /// Wiring contains a character outside A-Z.
    #[error("invalid wiring character {0:?}")]
    WiringCharacter(char),
    /// No built-in rotor is registered under the given name.
    #[error("unknown rotor type: {0}")]
    UnknownRotor(String),
    /// No built-in reflector is registered under the given name.
    #[error("unknown reflector type: {0}")]
    UnknownReflector(String),
    /// A plugboard key-sheet token is not a usable letter pair.
    #[error("invalid plugboard pair: {0:?}")]
    PlugboardPair(String),
    /// A display, position, or ring-setting argument does not provide
    /// exactly one entry per active rotor.
    #[error("incorrect length {got}, machine has {expected} rotors")]
    DisplayLength { got: usize, expected: usize },
    /// A key press outside A-Z.
    #[error("illegal key press {0:?}")]
    IllegalKey(char),
}
