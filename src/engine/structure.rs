//! Structure-preserving substitutions.
//!
//! Both functions keep the character count of the input and leave every
//! character outside their target class at its original position.

use rand::Rng;
use rand::seq::index;

use super::seed::seeded_rng;

const UPPERCASE: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Replace every ASCII digit with a seeded random digit.
pub fn preserve_digits(original: &str, seed: u64) -> String {
    if !original.bytes().any(|b| b.is_ascii_digit()) {
        return original.to_string();
    }

    let mut rng = seeded_rng(seed);
    original
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                char::from(b'0' + rng.random_range(0..10u8))
            } else {
                c
            }
        })
        .collect()
}

/// Number of letters replaced out of `letters` at `ratio`.
#[inline]
pub fn letters_to_replace(letters: usize, ratio: f64) -> usize {
    if letters == 0 {
        return 0;
    }
    ((letters as f64 * ratio).round() as usize).clamp(1, letters)
}

/// Replace a seeded selection of alphabetic characters, keeping case.
///
/// `ratio` is the share of letters to replace; at least one letter is
/// always replaced when the value has any.
pub fn preserve_letters(original: &str, seed: u64, ratio: f64) -> String {
    let mut chars: Vec<char> = original.chars().collect();
    let positions: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| i)
        .collect();

    let amount = letters_to_replace(positions.len(), ratio);
    if amount == 0 {
        return original.to_string();
    }

    let mut rng = seeded_rng(seed);
    let chosen = index::sample(&mut rng, positions.len(), amount);
    for pick in chosen.iter() {
        let pos = positions[pick];
        let alphabet = if chars[pos].is_uppercase() {
            UPPERCASE
        } else {
            LOWERCASE
        };
        chars[pos] = char::from(alphabet[rng.random_range(0..alphabet.len())]);
    }

    chars.into_iter().collect()
}
