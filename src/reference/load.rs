// src/reference/load.rs

use anyhow::{anyhow, bail, Context, Result};
use std::{collections::HashMap, fs, path::Path};
use tracing::{debug, instrument, warn};

use super::types::{Industry, StateArea};
use super::{AREA_FILE_NAME, INDUSTRY_FILE_NAME};

const AREA_HEADER: &str = "state_code";
const INDUSTRY_HEADER: &str = "industry_code";
const INDUSTRY_CODE_LEN: usize = 4;

/// Split a reference line into tab-separated fields, ignoring a trailing `\r`.
/// Blank lines yield `None`.
fn fields(line: &str) -> Option<Vec<&str>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    Some(line.split('\t').collect())
}

/// Parse the area table. The header row (first column `state_code`) is skipped;
/// any other row with fewer than 3 fields is a data-integrity error.
pub fn parse_areas<I, S>(lines: I) -> Result<Vec<StateArea>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let Some(split) = fields(line) else {
            continue;
        };
        if split[0] == AREA_HEADER {
            continue;
        }
        if split.len() < 3 {
            bail!(
                "malformed area row {}: expected at least 3 tab-separated fields, got {}: {:?}",
                idx + 1,
                split.len(),
                line
            );
        }
        out.push(StateArea {
            state_code: split[0].to_string(),
            area_code: split[1].to_string(),
            area_text: split[2].to_string(),
        });
    }
    Ok(out)
}

/// Parse the industry table. Codes are cut down to their first 4 characters,
/// since the source file carries trailing qualifiers on some of them.
pub fn parse_industries<I, S>(lines: I) -> Result<Vec<Industry>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let Some(split) = fields(line) else {
            continue;
        };
        if split[0] == INDUSTRY_HEADER {
            continue;
        }
        if split.len() < 2 {
            bail!(
                "malformed industry row {}: expected at least 2 tab-separated fields, got {}: {:?}",
                idx + 1,
                split.len(),
                line
            );
        }
        let code = split[0].get(..INDUSTRY_CODE_LEN).ok_or_else(|| {
            anyhow!(
                "malformed industry row {}: code {:?} is shorter than {} characters",
                idx + 1,
                split[0],
                INDUSTRY_CODE_LEN
            )
        })?;
        out.push(Industry {
            industry_code: code.to_string(),
            industry_text: split[1].to_string(),
        });
    }
    Ok(out)
}

/// Read-only lookup tables used by one reduce worker.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    areas: HashMap<(String, String), StateArea>,
    industries: HashMap<String, Industry>,
}

impl ReferenceTables {
    /// Index already-parsed rows. On duplicate keys the first row wins.
    pub fn new(areas: Vec<StateArea>, industries: Vec<Industry>) -> Self {
        let mut area_map = HashMap::with_capacity(areas.len());
        for area in areas {
            let key = (area.state_code.clone(), area.area_code.clone());
            if area_map.contains_key(&key) {
                warn!(
                    state_code = %area.state_code,
                    area_code = %area.area_code,
                    "duplicate area row; keeping the first"
                );
                continue;
            }
            area_map.insert(key, area);
        }

        let mut industry_map = HashMap::with_capacity(industries.len());
        for industry in industries {
            if industry_map.contains_key(&industry.industry_code) {
                warn!(
                    industry_code = %industry.industry_code,
                    "duplicate industry row; keeping the first"
                );
                continue;
            }
            industry_map.insert(industry.industry_code.clone(), industry);
        }

        Self {
            areas: area_map,
            industries: industry_map,
        }
    }

    /// Parse both tables from their raw lines.
    pub fn from_lines<A, I, S, T>(area_lines: A, industry_lines: I) -> Result<Self>
    where
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let areas = parse_areas(area_lines).context("parsing area table")?;
        let industries = parse_industries(industry_lines).context("parsing industry table")?;
        Ok(Self::new(areas, industries))
    }

    /// Load `nw.starea` and `nw.industry` from `folder`.
    #[instrument(level = "debug", skip(folder), fields(folder = %folder.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(folder: P) -> Result<Self> {
        let folder = folder.as_ref();
        let area_path = folder.join(AREA_FILE_NAME);
        let industry_path = folder.join(INDUSTRY_FILE_NAME);

        let area_text = fs::read_to_string(&area_path)
            .with_context(|| format!("reading reference table {}", area_path.display()))?;
        let industry_text = fs::read_to_string(&industry_path)
            .with_context(|| format!("reading reference table {}", industry_path.display()))?;

        let tables = Self::from_lines(area_text.lines(), industry_text.lines())
            .with_context(|| format!("loading reference tables from {}", folder.display()))?;
        debug!(
            areas = tables.areas.len(),
            industries = tables.industries.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }

    pub fn area(&self, state_code: &str, area_code: &str) -> Option<&StateArea> {
        self.areas
            .get(&(state_code.to_string(), area_code.to_string()))
    }

    pub fn industry(&self, industry_code: &str) -> Option<&Industry> {
        self.industries.get(industry_code)
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    pub fn industry_count(&self) -> usize {
        self.industries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const AREAS: &str = "state_code\tarea_code\tarea_text\n\
        00\t00000\tNational\n\
        06\t41860\tSan Francisco-Oakland-Fremont, CA\n";
    const INDUSTRIES: &str = "industry_code\tindustry_text\n\
        0000\tAll workers\n\
        G000A\tGoods producing\n";

    #[test]
    fn parses_areas_and_skips_header() -> Result<()> {
        let areas = parse_areas(AREAS.lines())?;
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1].state_code, "06");
        assert_eq!(areas[1].area_code, "41860");
        assert_eq!(areas[1].area_text, "San Francisco-Oakland-Fremont, CA");
        Ok(())
    }

    #[test]
    fn industry_codes_are_truncated_to_four_chars() -> Result<()> {
        let industries = parse_industries(INDUSTRIES.lines())?;
        assert_eq!(industries.len(), 2);
        assert_eq!(industries[1].industry_code, "G000");
        assert_eq!(industries[1].industry_text, "Goods producing");
        Ok(())
    }

    #[test]
    fn short_area_row_is_fatal() {
        let err = parse_areas(["state_code\tarea_code\tarea_text", "06\t41860"]).unwrap_err();
        assert!(err.to_string().contains("malformed area row 2"), "{err}");
    }

    #[test]
    fn short_industry_row_is_fatal() {
        let err = parse_industries(["0000"]).unwrap_err();
        assert!(err.to_string().contains("malformed industry row 1"), "{err}");

        let err = parse_industries(["G0\tGoods"]).unwrap_err();
        assert!(err.to_string().contains("shorter than 4"), "{err}");
    }

    #[test]
    fn lookups_are_keyed_by_state_and_area() -> Result<()> {
        let tables = ReferenceTables::from_lines(AREAS.lines(), INDUSTRIES.lines())?;
        assert_eq!(
            tables.area("06", "41860").map(|a| a.area_text.as_str()),
            Some("San Francisco-Oakland-Fremont, CA")
        );
        // same area code under another state does not match
        assert!(tables.area("07", "41860").is_none());
        assert_eq!(
            tables.industry("0000").map(|i| i.industry_text.as_str()),
            Some("All workers")
        );
        assert!(tables.industry("9999").is_none());
        Ok(())
    }

    #[test]
    fn duplicate_rows_keep_the_first() {
        let tables = ReferenceTables::new(
            vec![
                StateArea {
                    state_code: "01".into(),
                    area_code: "00000".into(),
                    area_text: "Alabama".into(),
                },
                StateArea {
                    state_code: "01".into(),
                    area_code: "00000".into(),
                    area_text: "Alabama again".into(),
                },
            ],
            Vec::new(),
        );
        assert_eq!(tables.area_count(), 1);
        assert_eq!(tables.area("01", "00000").unwrap().area_text, "Alabama");
    }

    #[test]
    fn load_reads_both_files_from_folder() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(AREA_FILE_NAME), AREAS)?;
        fs::write(dir.path().join(INDUSTRY_FILE_NAME), INDUSTRIES)?;

        let tables = ReferenceTables::load(dir.path())?;
        assert_eq!(tables.area_count(), 2);
        assert_eq!(tables.industry_count(), 2);
        Ok(())
    }

    #[test]
    fn load_fails_when_a_file_is_missing() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join(AREA_FILE_NAME), AREAS)?;
        let err = ReferenceTables::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains(INDUSTRY_FILE_NAME), "{err:#}");
        Ok(())
    }
}
