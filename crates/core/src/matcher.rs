//! Guess normalisation and single-edit fuzzy matching.

use crate::models::Station;

const SINGLE_QUOTES: [char; 3] = ['\'', '\u{2018}', '\u{2019}'];
const DOUBLE_QUOTES: [char; 3] = ['"', '\u{201C}', '\u{201D}'];
const SEPARATORS: [char; 5] = [' ', '.', ',', '-', '_'];

/// Fold a station name or guess into its comparison form.
///
/// Lower-cases the input, drops quotes and separators, and spells out `&`
/// as `and`. The result doubles as the station identifier.
pub fn normalize(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for ch in input.to_lowercase().chars() {
        if SINGLE_QUOTES.contains(&ch) || DOUBLE_QUOTES.contains(&ch) || SEPARATORS.contains(&ch)
        {
            continue;
        }
        if ch == '&' {
            result.push_str("and");
        } else {
            result.push(ch);
        }
    }
    result
}

/// Whether `guess` names `station`, allowing one typo.
pub fn is_guess_correct(guess: &str, station: &Station) -> bool {
    let normalized = normalize(guess);
    if normalized == station.id() {
        return true;
    }
    is_one_character_different(&normalized, station.id())
}

/// True when `guess` and `target` are exactly one insertion, deletion or
/// substitution apart.
pub fn is_one_character_different(guess: &str, target: &str) -> bool {
    let guess: Vec<char> = guess.chars().collect();
    let target: Vec<char> = target.chars().collect();

    if guess.len().abs_diff(target.len()) > 1 {
        return false;
    }

    if guess.len() == target.len() {
        let mismatches = guess
            .iter()
            .zip(target.iter())
            .filter(|(a, b)| a != b)
            .take(2)
            .count();
        return mismatches == 1;
    }

    let (shorter, longer) = if guess.len() < target.len() {
        (&guess, &target)
    } else {
        (&target, &guess)
    };

    let mut short_idx = 0;
    let mut long_idx = 0;
    let mut skipped = false;
    while short_idx < shorter.len() && long_idx < longer.len() {
        if shorter[short_idx] == longer[long_idx] {
            short_idx += 1;
            long_idx += 1;
        } else {
            if skipped {
                return false;
            }
            skipped = true;
            long_idx += 1;
        }
    }
    true
}
