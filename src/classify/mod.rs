//! Voting classifier for column semantic types.
//!
//! Each non-empty field of a bounded sample casts one vote, chosen by an
//! ordered chain of shape predicates. A column takes the plurality type when
//! that type holds more than 30% of the column's votes.

pub mod detection;
pub mod patterns;
pub mod tally;

pub use detection::detect_field_type;
pub use tally::{ColumnTypes, ColumnVoteTally};

use crate::layout::Separator;
use crate::sample::DEFAULT_CLASSIFIER_ROWS;

/// Classify the columns of `rows` split on `separator`.
///
/// Only the first 100 non-empty rows vote. Never fails: missing or
/// malformed data degrades to `generic_text`.
pub fn classify<S: AsRef<str>>(rows: &[S], separator: Separator) -> ColumnTypes {
    classify_with_limit(rows, separator, DEFAULT_CLASSIFIER_ROWS)
}

/// Same as [`classify`] with an explicit row limit.
pub fn classify_with_limit<S: AsRef<str>>(
    rows: &[S],
    separator: Separator,
    max_rows: usize,
) -> ColumnTypes {
    let sep = separator.as_str();
    let mut sample = rows
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.trim().is_empty())
        .take(max_rows)
        .peekable();

    let Some(first) = sample.peek() else {
        return ColumnTypes::default();
    };

    let mut tally = ColumnVoteTally::new(first.split(sep).count());
    for row in sample {
        tally.add_row(row.split(sep));
    }

    let types = tally.winners();
    tracing::debug!(
        columns = types.len(),
        votes = tally.total_votes(),
        types = %types,
        "classified columns"
    );
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic_type::SemanticType;

    #[test]
    fn test_classify_mixed_row() {
        let rows = ["joao.silva@empresa.com|123.456.789-00|SP|01/06/2023"];
        let types = classify(&rows, Separator::Pipe);

        assert_eq!(types.len(), 4);
        assert_eq!(types.get(0), SemanticType::Email);
        assert_eq!(types.get(1), SemanticType::Cpf);
        assert_eq!(types.get(2), SemanticType::RegionCode);
        assert_eq!(types.get(3), SemanticType::Date);
    }

    #[test]
    fn test_classify_empty_input() {
        let rows: [&str; 0] = [];
        assert!(classify(&rows, Separator::Comma).is_empty());

        let blank = ["", "   "];
        assert!(classify(&blank, Separator::Comma).is_empty());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let rows = ["1;ana", "2;bia;extra;more", "3;caio"];
        let types = classify(&rows, Separator::Semicolon);
        assert_eq!(types.len(), 2);
        assert_eq!(types.get(0), SemanticType::Number);
        assert_eq!(types.get(2), SemanticType::GenericText);
    }

    #[test]
    fn test_only_first_hundred_rows_vote() {
        let mut rows: Vec<String> = (0..100).map(|i| format!("{i}")).collect();
        rows.extend((0..200).map(|_| "n/a".to_string()));

        let types = classify(&rows, Separator::Comma);
        assert_eq!(types.get(0), SemanticType::Number);

        let types = classify_with_limit(&rows, Separator::Comma, 300);
        assert_eq!(types.get(0), SemanticType::GenericText);
    }

    #[test]
    fn test_empty_column_defaults_to_generic() {
        let rows = ["a@b.com,", "c@d.org,  "];
        let types = classify(&rows, Separator::Comma);
        assert_eq!(types.get(0), SemanticType::Email);
        assert_eq!(types.get(1), SemanticType::GenericText);
    }
}
