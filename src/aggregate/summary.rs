// src/aggregate/summary.rs

use anyhow::{anyhow, Context, Result};
use std::fmt;

use super::wage::Wage;
use crate::series::FIELD_SEPARATOR;

/// A parsed monthly median wage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WageObservation {
    pub year: i32,
    pub month: u32,
    pub median_wage: Wage,
}

impl WageObservation {
    /// Parse a `year,month,value` tuple from the shuffle. Any malformed
    /// field fails the whole group.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_fields(raw).with_context(|| format!("Can't understand the data point: {}", raw))
    }

    fn parse_fields(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        let &[year, month, value] = parts.as_slice() else {
            return Err(anyhow!("expected 3 fields, got {}", parts.len()));
        };
        Ok(Self {
            year: year.parse().context("bad year")?,
            month: month.parse().context("bad month")?,
            median_wage: value.parse()?,
        })
    }

    pub fn sort_key(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}

impl fmt::Display for WageObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: {}", self.month, self.year, self.median_wage)
    }
}

/// Earliest and latest observation for one area/industry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub label: String,
    pub first: WageObservation,
    pub last: WageObservation,
}

impl GroupSummary {
    /// The value column of an output line.
    pub fn summary(&self) -> String {
        format!("{} - {}", self.first, self.last)
    }

    /// `label<TAB>summary`
    pub fn to_line(&self) -> String {
        format!("{}\t{}", self.label, self.summary())
    }
}
