//! Parallel known-plaintext key recovery.
//!
//! The search enumerates rotor orders drawn from a pool, spawns one
//! worker thread per order, and has each worker drive a private
//! [`EnigmaMachine`] through ring settings × start displays × cipher
//! texts, scoring every trial decrypt against the crib. Matches stream
//! back over a channel as they are found; the driver joins all workers
//! before returning.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Sender};
use serde::Deserialize;

use crate::error::EnigmaError;
use crate::machine::EnigmaMachine;
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::Rotor;

/// Description of one search job.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Known or guessed plaintext fragment to score trial decrypts
    /// against.
    pub crib: String,
    /// Intercepted cipher texts, each scored independently.
    pub cipher_texts: Vec<String>,
    /// Names of the rotors to draw ordered triples from.
    pub rotor_pool: Vec<String>,
    /// Reflector name.
    pub reflector: String,
    /// Plugboard key sheet; empty for an uncabled board.
    #[serde(default)]
    pub plugboard: String,
    /// Minimum position-wise matches for a trial to count as a hit.
    #[serde(default = "default_min_fit")]
    pub min_fit: usize,
    /// Three letters known to be absent from the message key, one per
    /// stepping slot (slow to fast); those displays are skipped.
    #[serde(default)]
    pub excluded_key: Option<String>,
    /// Upper bound of the middle and fast ring scan (1..=limit). The
    /// slow ring stays at 1: that rotor barely moves, so its ring only
    /// re-labels start positions the display scan already covers.
    #[serde(default = "default_ring_limit")]
    pub ring_limit: u32,
}

fn default_min_fit() -> usize {
    7
}

fn default_ring_limit() -> u32 {
    26
}

/// One trial decrypt that scored at or above the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CribMatch {
    /// Rotor names, slow to fast.
    pub rotors: [String; 3],
    /// 1-based ring settings, slow to fast.
    pub rings: [u32; 3],
    /// Start display of the matching trial.
    pub display: String,
    /// The cipher text that produced the match.
    pub cipher_text: String,
    /// Its trial decrypt.
    pub plain_text: String,
    /// Position-wise matches against the crib.
    pub fit: usize,
}

/// A rotor-order task that failed to construct its machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskError {
    /// The rotor order the failed task owned.
    pub rotors: [String; 3],
    pub error: EnigmaError,
}

/// Outcome of a whole search run.
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    /// All matches, in no particular cross-task order.
    pub matches: Vec<CribMatch>,
    /// One entry per task that aborted on a construction failure.
    pub errors: Vec<TaskError>,
    /// Number of rotor orders enumerated from the pool.
    pub orders_searched: usize,
}

/// Counts position-wise equal characters between a trial decrypt and
/// the expected crib.
pub fn fit(actual: &str, expected: &str) -> usize {
    actual
        .chars()
        .zip(expected.chars())
        .filter(|(a, b)| a == b)
        .count()
}

/// Runs the search to completion, spawning one worker per rotor order.
///
/// `on_match` is invoked on the calling thread for every match as it
/// arrives, before the workers have necessarily finished. A task that
/// fails to build its machine (unknown rotor name, malformed plugboard)
/// is reported in the returned [`SearchReport::errors`] and aborts only
/// itself.
pub fn run<F>(config: SearchConfig, mut on_match: F) -> SearchReport
where
    F: FnMut(&CribMatch),
{
    let orders = rotor_orders(&config.rotor_pool);
    let orders_searched = orders.len();
    let config = Arc::new(config);
    let (tx, rx) = unbounded();

    let mut workers = Vec::with_capacity(orders.len());
    for order in orders {
        let config = Arc::clone(&config);
        let tx: Sender<CribMatch> = tx.clone();
        let task_order = order.clone();
        let handle = thread::spawn(move || search_order(&config, &task_order, &tx));
        workers.push((order, handle));
    }
    // Workers hold the remaining senders; the drain below ends when the
    // last of them finishes.
    drop(tx);

    let mut matches = Vec::new();
    for found in rx {
        on_match(&found);
        matches.push(found);
    }

    let mut errors = Vec::new();
    for (order, handle) in workers {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                tracing::warn!(rotors = ?order, %error, "search task aborted");
                errors.push(TaskError { rotors: order, error });
            }
            Err(_) => tracing::error!(rotors = ?order, "search task panicked"),
        }
    }

    tracing::info!(
        orders = orders_searched,
        matches = matches.len(),
        failed_tasks = errors.len(),
        "search finished"
    );

    SearchReport {
        matches,
        errors,
        orders_searched,
    }
}

/// Exhausts one rotor order: every ring setting in the scan, every
/// candidate display, every cipher text.
fn search_order(
    config: &SearchConfig,
    order: &[String; 3],
    tx: &Sender<CribMatch>,
) -> Result<(), EnigmaError> {
    let mut machine = EnigmaMachine::new(
        [
            Rotor::by_name(&order[0])?.clone(),
            Rotor::by_name(&order[1])?.clone(),
            Rotor::by_name(&order[2])?.clone(),
        ],
        Reflector::by_name(&config.reflector)?.clone(),
        Plugboard::from_key_sheet(&config.plugboard)?,
    );

    let excluded = excluded_letters(config.excluded_key.as_deref())?;
    let displays1 = candidate_displays(excluded[0]);
    let displays2 = candidate_displays(excluded[1]);
    let displays3 = candidate_displays(excluded[2]);

    let mut display = String::with_capacity(3);
    for ring_fast in 1..=config.ring_limit {
        for ring_middle in 1..=config.ring_limit {
            machine.set_ring_settings(&[1, ring_middle, ring_fast])?;
            for &d1 in &displays1 {
                for &d2 in &displays2 {
                    for &d3 in &displays3 {
                        for cipher_text in &config.cipher_texts {
                            display.clear();
                            display.push(d1);
                            display.push(d2);
                            display.push(d3);
                            machine.set_display(&display)?;

                            let plain_text = machine.process_text(cipher_text)?;
                            let score = fit(&plain_text, &config.crib);
                            if score >= config.min_fit {
                                // The receiver only disappears once the
                                // driver has returned; a send failure
                                // then is of no consequence.
                                let _ = tx.send(CribMatch {
                                    rotors: order.clone(),
                                    rings: [1, ring_middle, ring_fast],
                                    display: display.clone(),
                                    cipher_text: cipher_text.clone(),
                                    plain_text,
                                    fit: score,
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    tracing::debug!(rotors = ?order, "rotor order exhausted");
    Ok(())
}

/// All ordered triples of distinct pool entries.
fn rotor_orders(pool: &[String]) -> Vec<[String; 3]> {
    let mut orders = Vec::new();
    for a in 0..pool.len() {
        for b in 0..pool.len() {
            if b == a {
                continue;
            }
            for c in 0..pool.len() {
                if c == a || c == b {
                    continue;
                }
                orders.push([pool[a].clone(), pool[b].clone(), pool[c].clone()]);
            }
        }
    }
    orders
}

fn excluded_letters(excluded_key: Option<&str>) -> Result<[Option<char>; 3], EnigmaError> {
    match excluded_key {
        None => Ok([None; 3]),
        Some(key) => {
            let letters: Vec<char> = key.chars().collect();
            if letters.len() != 3 {
                return Err(EnigmaError::DisplayLength {
                    got: letters.len(),
                    expected: 3,
                });
            }
            Ok([Some(letters[0]), Some(letters[1]), Some(letters[2])])
        }
    }
}

/// The 26 window letters, minus the excluded one if any.
fn candidate_displays(excluded: Option<char>) -> Vec<char> {
    ('A'..='Z').filter(|&c| Some(c) != excluded).collect()
}
