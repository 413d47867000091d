//! Enigma rotor machine simulation and crib-based key recovery.
//!
//! The machine model reproduces the electro-mechanical signal path of
//! the historical device exactly — plugboard, rightmost-to-leftmost
//! rotors, reflector, and back — including the double-stepping anomaly
//! of the middle rotor. On top of it, [`search`] runs an exhaustive
//! known-plaintext attack, one worker thread per rotor order.
//!
//! # Examples
//!
//! Key in a message on rotors I, II, III with reflector B:
//!
//! ```
//! use bombe::{EnigmaMachine, Plugboard, Reflector, Rotor};
//!
//! let mut machine = EnigmaMachine::new(
//!     [
//!         Rotor::by_name("I").unwrap().clone(),
//!         Rotor::by_name("II").unwrap().clone(),
//!         Rotor::by_name("III").unwrap().clone(),
//!     ],
//!     Reflector::by_name("B").unwrap().clone(),
//!     Plugboard::identity(),
//! );
//! assert_eq!(machine.process_text("AAAAA").unwrap(), "BDZGO");
//!
//! // The machine is its own inverse under identical settings.
//! machine.reset_display();
//! assert_eq!(machine.process_text("BDZGO").unwrap(), "AAAAA");
//! ```

pub mod error;
pub mod machine;
pub mod plugboard;
pub mod reflector;
pub mod rotor;
pub mod search;
pub mod state;
pub mod wiring;

pub use error::EnigmaError;
pub use machine::EnigmaMachine;
pub use plugboard::Plugboard;
pub use reflector::Reflector;
pub use rotor::Rotor;
pub use state::RotorState;
