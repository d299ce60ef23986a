// src/aggregate/reduce.rs

use anyhow::{bail, Result};
use std::collections::HashSet;
use tracing::warn;

use super::summary::{GroupSummary, WageObservation};
use crate::reference::{Industry, ReferenceTables, StateArea};
use crate::series::GroupKey;

/// Result of reducing one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduced {
    Summary(GroupSummary),
    UnknownArea,
    UnknownIndustry,
}

/// Reduce-side state for one worker: its own copy of the reference tables and
/// the codes it has already warned about.
pub struct ReduceWorker {
    tables: ReferenceTables,
    unknown_areas: HashSet<String>,
    unknown_industries: HashSet<String>,
}

impl ReduceWorker {
    pub fn new(tables: ReferenceTables) -> Self {
        Self {
            tables,
            unknown_areas: HashSet::new(),
            unknown_industries: HashSet::new(),
        }
    }

    fn find_area(&mut self, state_code: &str, area_code: &str) -> Option<&StateArea> {
        let area = self.tables.area(state_code, area_code);
        if area.is_none() && self.unknown_areas.insert(area_code.to_string()) {
            warn!(state_code, area_code, "no area found");
        }
        area
    }

    fn find_industry(&mut self, industry_code: &str) -> Option<&Industry> {
        let industry = self.tables.industry(industry_code);
        if industry.is_none() && self.unknown_industries.insert(industry_code.to_string()) {
            warn!(industry_code, "no industry found");
        }
        industry
    }

    /// Reduce every `year,month,value` tuple emitted for `key` to the earliest
    /// and latest observation.
    ///
    /// Groups with an unknown area or industry are dropped. A malformed tuple
    /// or an empty group is an error.
    pub fn reduce<I, S>(&mut self, key: &str, values: I) -> Result<Reduced>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = GroupKey::decode(key)?;

        let Some(area_text) = self
            .find_area(&key.state_code, &key.area_code)
            .map(|a| a.area_text.clone())
        else {
            return Ok(Reduced::UnknownArea);
        };
        let Some(industry_text) = self
            .find_industry(&key.industry_code)
            .map(|i| i.industry_text.clone())
        else {
            return Ok(Reduced::UnknownIndustry);
        };

        let mut wages = values
            .into_iter()
            .map(|v| WageObservation::parse(v.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        wages.sort_by_key(WageObservation::sort_key);

        let (Some(first), Some(last)) = (wages.first(), wages.last()) else {
            bail!("group {} has no observations", key);
        };

        Ok(Reduced::Summary(GroupSummary {
            label: format!("{} {}", area_text, industry_text),
            first: *first,
            last: *last,
        }))
    }

    pub fn unknown_areas(&self) -> &HashSet<String> {
        &self.unknown_areas
    }

    pub fn unknown_industries(&self) -> &HashSet<String> {
        &self.unknown_industries
    }
}
