use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::MaskError;

/// Semantic type assigned to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// E-mail address (`local@domain.tld`).
    Email,
    /// Brazilian company registry number (14 digits, `00.000.000/0000-00`).
    Cnpj,
    /// Brazilian individual taxpayer number (11 digits, `000.000.000-00`).
    Cpf,
    /// Calendar date in one of the recognised layouts.
    Date,
    /// Monetary amount with a two-digit fractional part.
    Amount,
    /// Plain digit string.
    Number,
    /// Two-letter region or state code.
    RegionCode,
    /// Company name carrying a legal-entity marker.
    Organization,
    /// Personal name.
    Person,
    /// Anything else (fallback type).
    #[default]
    GenericText,
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SemanticType {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MaskError::InvalidConfig(format!("unknown semantic type: {s}")))
    }
}

impl SemanticType {
    /// Number of variants in the SemanticType enum.
    pub const COUNT: usize = 10;

    /// All variants in detection priority order.
    pub const ALL: [SemanticType; Self::COUNT] = [
        SemanticType::Email,
        SemanticType::Cnpj,
        SemanticType::Cpf,
        SemanticType::Date,
        SemanticType::Amount,
        SemanticType::Number,
        SemanticType::RegionCode,
        SemanticType::Organization,
        SemanticType::Person,
        SemanticType::GenericText,
    ];

    /// Returns the index for this type (0-9), suitable for array indexing.
    /// The index follows detection priority: Email=0 ... GenericText=9.
    #[inline]
    pub const fn as_index(&self) -> usize {
        match self {
            SemanticType::Email => 0,
            SemanticType::Cnpj => 1,
            SemanticType::Cpf => 2,
            SemanticType::Date => 3,
            SemanticType::Amount => 4,
            SemanticType::Number => 5,
            SemanticType::RegionCode => 6,
            SemanticType::Organization => 7,
            SemanticType::Person => 8,
            SemanticType::GenericText => 9,
        }
    }

    /// Stable snake_case name, as exposed in reports.
    pub const fn name(&self) -> &'static str {
        match self {
            SemanticType::Email => "email",
            SemanticType::Cnpj => "cnpj",
            SemanticType::Cpf => "cpf",
            SemanticType::Date => "date",
            SemanticType::Amount => "amount",
            SemanticType::Number => "number",
            SemanticType::RegionCode => "region_code",
            SemanticType::Organization => "organization",
            SemanticType::Person => "person",
            SemanticType::GenericText => "generic_text",
        }
    }

    /// Returns true if values of this type are masked digit by digit.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SemanticType::Cpf | SemanticType::Cnpj | SemanticType::Number | SemanticType::Amount
        )
    }

    /// Returns true if values of this type are masked letter by letter.
    #[inline]
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            SemanticType::Organization | SemanticType::Person | SemanticType::GenericText
        )
    }
}
