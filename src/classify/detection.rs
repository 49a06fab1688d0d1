//! Shape predicates for single fields, evaluated as an ordered chain.

use super::patterns::{
    AMOUNT_PATTERN, CNPJ_PATTERN, CPF_PATTERN, EMAIL_PATTERN, ORGANIZATION_MARKERS,
    is_date_prefix,
};
use crate::semantic_type::SemanticType;

/// A shape predicate paired with the type it votes for.
pub struct Detector {
    pub matches: fn(&str) -> bool,
    pub semantic_type: SemanticType,
}

/// Detection chain. Order matters: a CNPJ also satisfies the digit check, a
/// CPF-shaped string is tested only after CNPJ, and so on. First match wins.
pub static DETECTORS: [Detector; 9] = [
    Detector {
        matches: is_email,
        semantic_type: SemanticType::Email,
    },
    Detector {
        matches: is_cnpj,
        semantic_type: SemanticType::Cnpj,
    },
    Detector {
        matches: is_cpf,
        semantic_type: SemanticType::Cpf,
    },
    Detector {
        matches: is_date_prefix,
        semantic_type: SemanticType::Date,
    },
    Detector {
        matches: is_amount,
        semantic_type: SemanticType::Amount,
    },
    Detector {
        matches: is_number,
        semantic_type: SemanticType::Number,
    },
    Detector {
        matches: is_region_code,
        semantic_type: SemanticType::RegionCode,
    },
    Detector {
        matches: is_organization,
        semantic_type: SemanticType::Organization,
    },
    Detector {
        matches: is_person,
        semantic_type: SemanticType::Person,
    },
];

fn is_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

fn is_cnpj(s: &str) -> bool {
    CNPJ_PATTERN.is_match(s)
}

fn is_cpf(s: &str) -> bool {
    CPF_PATTERN.is_match(s)
}

/// Separator presence is implied by the pattern.
fn is_amount(s: &str) -> bool {
    AMOUNT_PATTERN.is_match(s)
}

#[inline]
fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[inline]
fn is_region_code(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_organization(s: &str) -> bool {
    let upper = s.to_uppercase();
    ORGANIZATION_MARKERS.iter().any(|m| upper.contains(m))
}

fn is_person(s: &str) -> bool {
    s.contains(' ') && s.chars().filter(|c| c.is_alphabetic()).count() > 3
}

/// Detect the semantic type of a single field.
///
/// Returns `None` for empty (post-trim) fields, which cast no vote.
pub fn detect_field_type(value: &str) -> Option<SemanticType> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let detected = DETECTORS
        .iter()
        .find(|d| (d.matches)(trimmed))
        .map_or(SemanticType::GenericText, |d| d.semantic_type);
    Some(detected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_field_type() {
        assert_eq!(detect_field_type("ana@mail.com.br"), Some(SemanticType::Email));
        assert_eq!(detect_field_type("12.345.678/0001-90"), Some(SemanticType::Cnpj));
        assert_eq!(detect_field_type("123.456.789-00"), Some(SemanticType::Cpf));
        assert_eq!(detect_field_type("2023-06-01"), Some(SemanticType::Date));
        assert_eq!(detect_field_type("1500,00"), Some(SemanticType::Amount));
        assert_eq!(detect_field_type("42"), Some(SemanticType::Number));
        assert_eq!(detect_field_type("sp"), Some(SemanticType::RegionCode));
        assert_eq!(detect_field_type("Padaria Pão Quente Ltda"), Some(SemanticType::Organization));
        assert_eq!(detect_field_type("Maria Souza"), Some(SemanticType::Person));
        assert_eq!(detect_field_type("ativo"), Some(SemanticType::GenericText));
        assert_eq!(detect_field_type("  "), None);
        assert_eq!(detect_field_type(""), None);
    }

    #[test]
    fn test_priority_order() {
        // 14 digits: CNPJ before number
        assert_eq!(detect_field_type("12345678000190"), Some(SemanticType::Cnpj));
        // 11 digits: CPF before number
        assert_eq!(detect_field_type("12345678900"), Some(SemanticType::Cpf));
        // 10 digits fall through to number
        assert_eq!(detect_field_type("1234567890"), Some(SemanticType::Number));
        // " SA" marker beats the person rule
        assert_eq!(detect_field_type("Acme SA"), Some(SemanticType::Organization));
    }

    #[test]
    fn test_field_is_trimmed() {
        assert_eq!(detect_field_type("  RJ "), Some(SemanticType::RegionCode));
        assert_eq!(detect_field_type(" 007 "), Some(SemanticType::Number));
    }

    #[test]
    fn test_person_needs_space_and_letters() {
        assert_eq!(detect_field_type("Bob Li"), Some(SemanticType::Person));
        assert_eq!(detect_field_type("A B"), Some(SemanticType::GenericText));
        assert_eq!(detect_field_type("Roberto"), Some(SemanticType::GenericText));
    }
}
