//! Column name normalization.
//!
//! Data files written by hand (or by older versions of the shop's tools)
//! carry stray whitespace and a handful of recurring Swahili misspellings.
//! Normalization trims, replaces spaces with underscores and corrects those
//! misspellings in a single left-to-right pass.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Known misspellings and their corrections.
const TYPO_CORRECTIONS: &[(&str, &str)] = &[
    ("Bet_", "Bei_"),
    ("Hitadhi", "Hifadhi"),
    ("Falda", "Faida"),
    ("Bidha", "Bidhaa"),
];

struct Corrector {
    pattern: Regex,
    replacements: HashMap<&'static str, &'static str>,
}

static CORRECTOR: OnceLock<Corrector> = OnceLock::new();

/// Longest-match-first table. Every correct spelling is also listed as an
/// identity entry so "Bidhaa" is matched whole and never becomes "Bidhaaa".
fn corrector() -> &'static Corrector {
    CORRECTOR.get_or_init(|| {
        let mut replacements: HashMap<&'static str, &'static str> = HashMap::new();
        for &(_, correct) in TYPO_CORRECTIONS {
            replacements.insert(correct, correct);
        }
        for &(typo, correct) in TYPO_CORRECTIONS {
            replacements.insert(typo, correct);
        }

        let mut needles: Vec<&str> = replacements.keys().copied().collect();
        // Regex alternation is leftmost-first, so longer needles must come first
        needles.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let alternation = needles
            .iter()
            .map(|needle| regex::escape(needle))
            .collect::<Vec<_>>()
            .join("|");

        Corrector {
            pattern: Regex::new(&alternation).expect("typo table should form a valid regex"),
            replacements,
        }
    })
}

/// Normalize one column name.
pub fn normalize_column(name: &str) -> String {
    let spaced = name.trim().replace(' ', "_");
    let corrector = corrector();
    corrector
        .pattern
        .replace_all(&spaced, |caps: &regex::Captures<'_>| {
            let found = &caps[0];
            corrector
                .replacements
                .get(found)
                .copied()
                .unwrap_or(found)
                .to_string()
        })
        .into_owned()
}

/// Normalize a full header, preserving order.
pub fn normalize_columns(columns: &[String]) -> Vec<String> {
    columns.iter().map(|c| normalize_column(c)).collect()
}
