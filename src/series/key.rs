// src/series/key.rs

use anyhow::{bail, Result};
use std::fmt;

/// Separator used when keys and values travel through the shuffle as text.
pub const FIELD_SEPARATOR: char = ',';

/// State / area / industry triple that observations are grouped by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub state_code: String,
    pub area_code: String,
    pub industry_code: String,
}

impl GroupKey {
    pub fn new(
        state_code: impl Into<String>,
        area_code: impl Into<String>,
        industry_code: impl Into<String>,
    ) -> Self {
        Self {
            state_code: state_code.into(),
            area_code: area_code.into(),
            industry_code: industry_code.into(),
        }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Inverse of `encode`. Anything other than exactly 3 fields is an error.
    pub fn decode(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        if parts.len() != 3 {
            bail!(
                "group key {:?} has {} fields, expected 3",
                raw,
                parts.len()
            );
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.state_code,
            self.area_code,
            self.industry_code,
            sep = FIELD_SEPARATOR
        )
    }
}

/// One monthly data point as emitted by the map phase.
/// `value` stays as text; it is parsed once the group is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObservation {
    pub year: String,
    pub month: u32,
    pub value: String,
}

impl RawObservation {
    pub fn encode(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.year,
            self.month,
            self.value,
            sep = FIELD_SEPARATOR
        )
    }
}
