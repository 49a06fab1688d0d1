//! Per-column vote counting and winner extraction.

use serde::Serialize;
use std::fmt;

use super::detection::detect_field_type;
use crate::semantic_type::SemanticType;

/// Percentage of a column's non-empty votes the plurality type must exceed.
pub const CONFIDENCE_PERCENT: usize = 30;

/// Vote counts per column, indexed by [`SemanticType::as_index`].
#[derive(Debug, Clone)]
pub struct ColumnVoteTally {
    counts: Vec<[usize; SemanticType::COUNT]>,
}

impl ColumnVoteTally {
    /// Create an empty tally for `num_columns` columns.
    pub fn new(num_columns: usize) -> Self {
        Self {
            counts: vec![[0; SemanticType::COUNT]; num_columns],
        }
    }

    /// Number of columns tracked.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.counts.len()
    }

    /// Cast one vote per non-empty field. Fields past the tracked column
    /// count are ignored.
    pub fn add_row<'a, I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (counts, field) in self.counts.iter_mut().zip(fields) {
            if let Some(t) = detect_field_type(field) {
                counts[t.as_index()] += 1;
            }
        }
    }

    /// Record a single vote directly.
    pub fn add_vote(&mut self, column: usize, semantic_type: SemanticType) {
        if let Some(counts) = self.counts.get_mut(column) {
            counts[semantic_type.as_index()] += 1;
        }
    }

    /// Votes cast for `semantic_type` in `column`.
    pub fn votes(&self, column: usize, semantic_type: SemanticType) -> usize {
        self.counts
            .get(column)
            .map_or(0, |c| c[semantic_type.as_index()])
    }

    /// Total votes over all columns.
    pub fn total_votes(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Extract the winning type of every column.
    pub fn winners(&self) -> ColumnTypes {
        ColumnTypes(self.counts.iter().map(column_winner).collect())
    }
}

/// Pick the plurality type if it clears the confidence threshold.
///
/// Ties go to the type earlier in the detection chain.
fn column_winner(counts: &[usize; SemanticType::COUNT]) -> SemanticType {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return SemanticType::GenericText;
    }

    let (best_idx, best) = counts
        .iter()
        .enumerate()
        .fold((0, 0), |acc, (i, &c)| if c > acc.1 { (i, c) } else { acc });

    if best * 100 > total * CONFIDENCE_PERCENT {
        SemanticType::ALL[best_idx]
    } else {
        SemanticType::GenericText
    }
}

/// Semantic type of every classified column, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnTypes(Vec<SemanticType>);

impl ColumnTypes {
    /// Build from explicit types.
    pub fn new(types: Vec<SemanticType>) -> Self {
        Self(types)
    }

    /// Type of `column`, `generic_text` past the classified columns.
    #[inline]
    pub fn get(&self, column: usize) -> SemanticType {
        self.0.get(column).copied().unwrap_or_default()
    }

    /// Number of classified columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no column was classified.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(column_index, type)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, SemanticType)> + '_ {
        self.0.iter().copied().enumerate()
    }

    /// The types as a slice.
    pub fn as_slice(&self) -> &[SemanticType] {
        &self.0
    }
}

impl From<Vec<SemanticType>> for ColumnTypes {
    fn from(types: Vec<SemanticType>) -> Self {
        Self(types)
    }
}

impl fmt::Display for ColumnTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.iter() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{i}:{t}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plurality_above_threshold() {
        let mut tally = ColumnVoteTally::new(1);
        for _ in 0..35 {
            tally.add_row(["ana@mail.com"]);
        }
        for _ in 0..65 {
            tally.add_row([""]);
        }
        assert_eq!(tally.votes(0, SemanticType::Email), 35);
        assert_eq!(tally.winners().get(0), SemanticType::Email);
    }

    #[test]
    fn test_plurality_below_threshold() {
        // 25 emails against noise where no type passes 30%
        let mut tally = ColumnVoteTally::new(1);
        let noise = ["42", "SP", "Maria Souza", "2023-01-01", "99,90", "Acme Ltda", "x"];
        for _ in 0..25 {
            tally.add_vote(0, SemanticType::Email);
        }
        for i in 0..75 {
            tally.add_row([noise[i % noise.len()]]);
        }
        assert_eq!(tally.winners().get(0), SemanticType::GenericText);
    }

    #[test]
    fn test_exact_threshold_is_not_enough() {
        let mut tally = ColumnVoteTally::new(1);
        for _ in 0..3 {
            tally.add_vote(0, SemanticType::Number);
        }
        for _ in 0..3 {
            tally.add_vote(0, SemanticType::Date);
        }
        for t in [SemanticType::Person, SemanticType::Cpf, SemanticType::Email, SemanticType::Amount] {
            tally.add_vote(0, t);
        }
        // 3 of 10 is exactly 30%
        assert_eq!(tally.winners().get(0), SemanticType::GenericText);
    }

    #[test]
    fn test_tie_prefers_detection_order() {
        let mut tally = ColumnVoteTally::new(1);
        tally.add_vote(0, SemanticType::Number);
        tally.add_vote(0, SemanticType::Cpf);
        assert_eq!(tally.winners().get(0), SemanticType::Cpf);
    }

    #[test]
    fn test_no_votes_defaults_to_generic() {
        let tally = ColumnVoteTally::new(3);
        let winners = tally.winners();
        assert_eq!(winners.len(), 3);
        assert!(winners.iter().all(|(_, t)| t == SemanticType::GenericText));
    }

    #[test]
    fn test_column_types_display() {
        let types = ColumnTypes::new(vec![SemanticType::Email, SemanticType::RegionCode]);
        assert_eq!(types.to_string(), "0:email, 1:region_code");
        assert_eq!(types.get(7), SemanticType::GenericText);
    }
}
