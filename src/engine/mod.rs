//! Deterministic, structure-preserving anonymization of single values.
//!
//! Every value is masked from a seed derived from its own content, so the
//! same value always produces the same replacement, across engine instances
//! and across runs. The memo only saves recomputation and keeps repeated
//! values in a run trivially consistent.

pub mod ratios;
pub mod seed;
pub mod structure;
pub mod transforms;

pub use ratios::SubstitutionRatios;

use foldhash::{HashMap, HashMapExt};

use crate::error::{Result, TransformError};
use crate::semantic_type::SemanticType;

/// Result of masking one value without the memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input, returned as is.
    Unchanged,
    /// The masked replacement.
    Masked(String),
    /// The transform failed; the original value must be used.
    PassThrough(TransformError),
}

impl Outcome {
    /// Resolve to the string written for `original`.
    pub fn into_value(self, original: &str) -> String {
        match self {
            Outcome::Masked(masked) => masked,
            Outcome::Unchanged | Outcome::PassThrough(_) => original.to_string(),
        }
    }
}

/// Mask `value` as `semantic_type`, without memoization.
pub fn try_anonymize(value: &str, semantic_type: SemanticType, ratios: &SubstitutionRatios) -> Outcome {
    if value.trim().is_empty() {
        return Outcome::Unchanged;
    }

    let seed = seed::derive_seed(value);
    match transforms::apply(value, semantic_type, seed, ratios) {
        Ok(masked) => Outcome::Masked(masked),
        Err(e) => Outcome::PassThrough(e),
    }
}

/// Anonymization engine owning the memo of one run.
pub struct Engine {
    ratios: SubstitutionRatios,
    /// One map per semantic type, indexed by [`SemanticType::as_index`].
    memo: [HashMap<String, String>; SemanticType::COUNT],
    pass_through: usize,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("ratios", &self.ratios)
            .field("memo_len", &self.memo_len())
            .field("pass_through", &self.pass_through)
            .finish()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with the default substitution ratios.
    pub fn new() -> Self {
        Self {
            ratios: SubstitutionRatios::default(),
            memo: std::array::from_fn(|_| HashMap::new()),
            pass_through: 0,
        }
    }

    /// Create an engine with custom substitution ratios.
    pub fn with_ratios(ratios: SubstitutionRatios) -> Result<Self> {
        ratios.validate()?;
        Ok(Self {
            ratios,
            ..Self::new()
        })
    }

    /// The substitution ratios in use.
    pub fn ratios(&self) -> &SubstitutionRatios {
        &self.ratios
    }

    /// Mask `value` as `semantic_type`, memoized on the pair.
    ///
    /// Never fails: a transform failure is logged and the original value
    /// returned.
    pub fn anonymize(&mut self, value: &str, semantic_type: SemanticType) -> String {
        if value.trim().is_empty() {
            return value.to_string();
        }

        if let Some(hit) = self.memo[semantic_type.as_index()].get(value) {
            return hit.clone();
        }

        let outcome = try_anonymize(value, semantic_type, &self.ratios);
        self.resolve(value, semantic_type, outcome)
    }

    /// Turn `outcome` into the written value and memoize it.
    /// A pass-through is logged, counted and resolves to `value` itself.
    fn resolve(&mut self, value: &str, semantic_type: SemanticType, outcome: Outcome) -> String {
        if let Outcome::PassThrough(e) = &outcome {
            self.pass_through += 1;
            tracing::warn!(
                semantic_type = %semantic_type,
                chars = value.chars().count(),
                error = %e,
                "value passed through unmasked"
            );
        }

        let masked = outcome.into_value(value);
        self.memo[semantic_type.as_index()].insert(value.to_string(), masked.clone());
        masked
    }

    /// Number of distinct (value, type) pairs memoized.
    pub fn memo_len(&self) -> usize {
        self.memo.iter().map(|m| m.len()).sum()
    }

    /// Number of values passed through because their transform failed.
    pub fn pass_through_count(&self) -> usize {
        self.pass_through
    }
}
