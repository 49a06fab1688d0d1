//! Compiled regex patterns for field shape detection.
//!
//! Document patterns follow the canonical Brazilian groupings; separators
//! inside them are optional so bare digit strings match too. Digit classes
//! are ASCII-only, so a matched date prefix is always 10 bytes long.

use regex::Regex;

/// Pattern for e-mail addresses: one `@`, non-empty parts, dotted domain.
pub static EMAIL_PATTERN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("Invalid email pattern"));

/// Pattern for CNPJ numbers (`00.000.000/0000-00` or 14 bare digits).
pub static CNPJ_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}\.?[0-9]{3}\.?[0-9]{3}/?[0-9]{4}-?[0-9]{2}$").expect("Invalid CNPJ pattern")
});

/// Pattern for CPF numbers (`000.000.000-00` or 11 bare digits).
pub static CPF_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}$").expect("Invalid CPF pattern")
});

/// Prefix pattern for dotted dates (DD.MM.YYYY).
pub static DATE_DOTTED_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}").expect("Invalid dotted date pattern")
});

/// Prefix pattern for slashed dates (DD/MM/YYYY).
pub static DATE_SLASHED_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}").expect("Invalid slashed date pattern")
});

/// Prefix pattern for ISO 8601 dates (YYYY-MM-DD).
pub static DATE_ISO_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("Invalid ISO date pattern")
});

/// Pattern for amounts with a two-digit fractional part (`1234.56`, `99,90`).
pub static AMOUNT_PATTERN: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[0-9]+[.,][0-9]{2}$").expect("Invalid amount pattern"));

/// Legal-entity markers searched in the upper-cased field.
pub const ORGANIZATION_MARKERS: [&str; 6] = ["LTDA", "S.A", " SA", "EIRELI", "MEI", "INC"];

/// Returns true if the value starts with any of the recognised date layouts.
#[inline]
pub fn is_date_prefix(value: &str) -> bool {
    DATE_DOTTED_PATTERN.is_match(value)
        || DATE_SLASHED_PATTERN.is_match(value)
        || DATE_ISO_PATTERN.is_match(value)
}
