use crate::error::{MaskError, Result};

/// Share of letters replaced by letter-structure preservation, per kind of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubstitutionRatios {
    /// E-mail local part and domain name.
    pub email: f64,
    /// Company names.
    pub organization: f64,
    /// Personal names.
    pub person: f64,
    /// Anything else.
    pub generic: f64,
}

impl Default for SubstitutionRatios {
    fn default() -> Self {
        Self {
            email: 0.7,
            organization: 0.4,
            person: 0.4,
            generic: 0.3,
        }
    }
}

impl SubstitutionRatios {
    /// Check every ratio lies in `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("email", self.email),
            ("organization", self.organization),
            ("person", self.person),
            ("generic", self.generic),
        ];
        for (name, ratio) in named {
            if ratio.is_nan() || ratio <= 0.0 || ratio > 1.0 {
                return Err(MaskError::InvalidConfig(format!(
                    "{name} substitution ratio must be in (0, 1], got {ratio}"
                )));
            }
        }
        Ok(())
    }
}
