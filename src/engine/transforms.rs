//! Per-type transforms.

use rand::Rng;

use super::ratios::SubstitutionRatios;
use super::seed::seeded_rng;
use super::structure::{preserve_digits, preserve_letters};
use crate::classify::patterns::{DATE_DOTTED_PATTERN, DATE_ISO_PATTERN, DATE_SLASHED_PATTERN};
use crate::error::TransformError;
use crate::semantic_type::SemanticType;

/// Letters drawn for region codes. `Q` starts no Brazilian state code.
const REGION_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPRSTUVWXYZ";

/// Length of every recognised date prefix.
const DATE_PREFIX_LEN: usize = 10;

/// Date layouts recognised by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `DD.MM.YYYY`
    Dotted,
    /// `DD/MM/YYYY`
    Slashed,
    /// `YYYY-MM-DD`
    Iso,
}

impl DateLayout {
    /// Detect the layout from the start of `value`.
    pub fn detect(value: &str) -> Option<Self> {
        if DATE_DOTTED_PATTERN.is_match(value) {
            Some(DateLayout::Dotted)
        } else if DATE_SLASHED_PATTERN.is_match(value) {
            Some(DateLayout::Slashed)
        } else if DATE_ISO_PATTERN.is_match(value) {
            Some(DateLayout::Iso)
        } else {
            None
        }
    }

    fn render(self, day: u32, month: u32, year: u32) -> String {
        match self {
            DateLayout::Dotted => format!("{day:02}.{month:02}.{year}"),
            DateLayout::Slashed => format!("{day:02}/{month:02}/{year}"),
            DateLayout::Iso => format!("{year}-{month:02}-{day:02}"),
        }
    }
}

/// Apply the transform of `semantic_type` to a non-blank `value`.
///
/// Everything but region codes must keep the input's character count;
/// a violation is reported as [`TransformError::ShapeMismatch`].
pub fn apply(
    value: &str,
    semantic_type: SemanticType,
    seed: u32,
    ratios: &SubstitutionRatios,
) -> Result<String, TransformError> {
    let seed = u64::from(seed);
    let masked = match semantic_type {
        SemanticType::Email => mask_email(value, seed, ratios.email),
        SemanticType::Cpf | SemanticType::Cnpj | SemanticType::Number | SemanticType::Amount => {
            preserve_digits(value, seed)
        }
        SemanticType::Date => mask_date(value, seed),
        SemanticType::RegionCode => return Ok(mask_region_code(seed)),
        SemanticType::Organization => preserve_letters(value, seed, ratios.organization),
        SemanticType::Person => preserve_letters(value, seed, ratios.person),
        SemanticType::GenericText => mask_generic(value, seed, ratios.generic),
    };
    check_shape(value, masked)
}

/// Reject output whose character count differs from the input's.
pub fn check_shape(original: &str, masked: String) -> Result<String, TransformError> {
    let expected = original.chars().count();
    let actual = masked.chars().count();
    if expected == actual {
        Ok(masked)
    } else {
        Err(TransformError::ShapeMismatch { expected, actual })
    }
}

/// `local@name.suffix`: local part and domain name are masked with
/// consecutive seeds, the suffix after the last dot is kept.
fn mask_email(value: &str, seed: u64, ratio: f64) -> String {
    let Some((local, domain)) = value.split_once('@') else {
        return preserve_letters(value, seed, ratio);
    };

    let local = preserve_letters(local, seed, ratio);
    let domain = match domain.rsplit_once('.') {
        Some((name, suffix)) => format!("{}.{suffix}", preserve_letters(name, seed + 1, ratio)),
        None => preserve_letters(domain, seed + 1, ratio),
    };
    format!("{local}@{domain}")
}

/// Random day 1-28, month and year 2020-2025 in the detected layout.
/// Anything after the date prefix keeps its shape through digit masking.
fn mask_date(value: &str, seed: u64) -> String {
    let Some(layout) = DateLayout::detect(value) else {
        return preserve_digits(value, seed);
    };

    let mut rng = seeded_rng(seed);
    let day = rng.random_range(1..=28);
    let month = rng.random_range(1..=12);
    let year = rng.random_range(2020..=2025);

    let mut masked = layout.render(day, month, year);
    masked.push_str(&preserve_digits(&value[DATE_PREFIX_LEN..], seed));
    masked
}

fn mask_region_code(seed: u64) -> String {
    let mut rng = seeded_rng(seed);
    (0..2)
        .map(|_| char::from(REGION_LETTERS[rng.random_range(0..REGION_LETTERS.len())]))
        .collect()
}

fn mask_generic(value: &str, seed: u64, ratio: f64) -> String {
    if value.chars().any(char::is_alphabetic) {
        preserve_letters(value, seed, ratio)
    } else if value.bytes().any(|b| b.is_ascii_digit()) {
        preserve_digits(value, seed)
    } else {
        value.to_string()
    }
}
