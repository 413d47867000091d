//! Batch crib-search runner.
//!
//! Loads a search job from `./input.json` when present, otherwise runs
//! the built-in historical job, and prints match lines as the workers
//! find them.

use std::fs::File;
use std::io::BufReader;
use std::process::exit;

use bombe::search::{self, CribMatch, SearchConfig};

const INPUT_PATH: &str = "./input.json";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = load_config();
    let report = search::run(config, print_match);

    for failed in &report.errors {
        eprintln!(
            "task {} aborted: {}",
            failed.rotors.join(", "),
            failed.error
        );
    }
    println!(
        "searched {} rotor orders: {} matches, {} failed tasks",
        report.orders_searched,
        report.matches.len(),
        report.errors.len()
    );
    if !report.errors.is_empty() {
        exit(1);
    }
}

fn print_match(found: &CribMatch) {
    println!(
        "{} | rings [{}, {}, {}] display {} | {} matches {} with {}/{} letters",
        found.rotors.join(", "),
        found.rings[0],
        found.rings[1],
        found.rings[2],
        found.display,
        found.cipher_text,
        found.plain_text,
        found.fit,
        found.cipher_text.chars().count()
    );
}

fn load_config() -> SearchConfig {
    match File::open(INPUT_PATH) {
        Ok(file) => match serde_json::from_reader(BufReader::new(file)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("malformed {}: {}", INPUT_PATH, err);
                exit(1);
            }
        },
        Err(_) => builtin_job(),
    }
}

/// The original batch job: recover the key that encrypted one of the
/// candidate names to the intercepted crib.
fn builtin_job() -> SearchConfig {
    SearchConfig {
        crib: "IDDSQRFXKJ".to_owned(),
        cipher_texts: [
            "ALFREDXAHO",
            "DAVIDXBLEI",
            "TRACYXCAMP",
            "PETERXCHEN",
            "TRACYXCHOU",
            "KITXCOSPER",
            "VINODXDHAM",
            "KENXFORBUS",
            "BILLXGATES",
            "KURTXGODEL",
            "ASHOKXGOEL",
            "GENEXGOLUB",
            "BILLXGROPP",
            "WENDYXHALL",
            "JIAWEIXHAN",
            "LESXHATTON",
            "DAVIDXKORN",
            "YANNXLECUN",
            "JOHNXLIONS",
            "JOELXMOSES",
            "MAXXNEWMAN",
            "LARRYXPAGE",
            "JUANXPAVON",
            "KATHYXPHAM",
            "JONXPOSTEL",
            "RONXRIVEST",
            "DANAXSCOTT",
            "RAVIXSETHI",
            "CLIFFXSHAW",
            "EVAXTARDOS",
            "JOHNXTUKEY",
            "EIITIXWADA",
            "STEVEXWARD",
            "ARIFXZAMAN",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        rotor_pool: ["I", "II", "III", "IV", "V"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        reflector: "B".to_owned(),
        plugboard: String::new(),
        min_fit: 7,
        excluded_key: Some("OQB".to_owned()),
        ring_limit: 26,
    }
}
