// src/series/filter.rs

use tracing::{trace, warn};

use super::id::SeriesId;
use super::key::{GroupKey, RawObservation, FIELD_SEPARATOR};

const DATA_HEADER: &str = "series_id";
const ANNUAL_AVERAGE_MONTH: u32 = 13;

/// A single (key, value) pair produced by the map phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOutput {
    pub key: GroupKey,
    pub value: RawObservation,
}

/// Map one line of `nw.data.1.AllData` to at most one output pair.
///
/// Rows outside the all-workers hourly median wage series, headers, blank
/// lines and annual averages are dropped. Structural defects are dropped with
/// a warning. This never fails: value parsing happens in the reduce phase.
pub fn map_line(line: &str) -> Option<MapOutput> {
    // only line endings come off the whole line: a blank trailing value
    // field must survive as empty text
    let line = line.trim_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    let split: Vec<&str> = line.split('\t').map(str::trim).collect();

    let series_id = split[0];
    if series_id == DATA_HEADER {
        return None;
    }
    let id = match SeriesId::decode(series_id) {
        Ok(id) => id,
        Err(defect) => {
            warn!(series_id, "{}", defect);
            return None;
        }
    };
    if !id.is_all_workers_median_wage() {
        trace!(series_id, "not an all-workers median wage series");
        return None;
    }
    if [id.state_code, id.area_code, id.industry_code]
        .iter()
        .any(|code| code.contains(FIELD_SEPARATOR))
    {
        warn!(series_id, "series ID contains the key separator");
        return None;
    }

    let (year, period, value) = match (split.get(1), split.get(2), split.get(3)) {
        (Some(y), Some(p), Some(v)) => (*y, *p, *v),
        _ => {
            warn!(series_id, fields = split.len(), "row too short");
            return None;
        }
    };

    if !period.starts_with('M') {
        return None;
    }
    if period.len() < 3 {
        warn!(period, "period too short");
        return None;
    }
    let month: u32 = match period[1..].parse() {
        Ok(m) => m,
        Err(_) => {
            warn!(series_id, period, "period has a non-numeric month");
            return None;
        }
    };
    if month == ANNUAL_AVERAGE_MONTH {
        return None;
    }
    if !(1..=12).contains(&month) {
        warn!(series_id, period, "period month out of range");
        return None;
    }

    Some(MapOutput {
        key: GroupKey::new(id.state_code, id.area_code, id.industry_code),
        value: RawObservation {
            year: year.to_string(),
            month,
            value: value.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDIAN_ID: &str = "NWU0641860000G000000000001400";

    fn row(id: &str, year: &str, period: &str, value: &str) -> String {
        format!("{id}\t{year}\t{period}\t{value}\t")
    }

    #[test]
    fn emits_key_and_value_for_matching_series() {
        let out = map_line(&row(MEDIAN_ID, "2020", "M03", " 010.50")).unwrap();
        assert_eq!(out.key, GroupKey::new("06", "41860", "G000"));
        assert_eq!(out.value.year, "2020");
        assert_eq!(out.value.month, 3);
        assert_eq!(out.value.value, "010.50");
    }

    #[test]
    fn padded_series_id_is_trimmed() {
        let padded = format!("{MEDIAN_ID}       ");
        assert!(map_line(&row(&padded, "2020", "M03", "010.50")).is_some());
    }

    #[test]
    fn every_month_maps_to_its_number() {
        for m in 1..=12u32 {
            let period = format!("M{m:02}");
            let out = map_line(&row(MEDIAN_ID, "2019", &period, "009.25")).unwrap();
            assert_eq!(out.value.month, m);
        }
    }

    #[test]
    fn annual_average_is_dropped() {
        assert_eq!(map_line(&row(MEDIAN_ID, "2019", "M13", "009.25")), None);
    }

    #[test]
    fn headers_blanks_and_foreign_rows_are_dropped() {
        assert_eq!(map_line(""), None);
        assert_eq!(map_line("  \r\n"), None);
        assert_eq!(
            map_line("series_id\tyear\tperiod\tvalue\tfootnote_codes"),
            None
        );
        assert_eq!(
            map_line(&row("CWU0641860000G000000000001400", "2019", "M01", "009.25")),
            None
        );
        assert_eq!(map_line(&row("NWU064186", "2019", "M01", "009.25")), None);
    }

    #[test]
    fn non_matching_categories_are_dropped() {
        for id in [
            "NWU0641860000G000000000001500",
            "NWU0641860000G000110000001400",
            "NWU0641860000G000000000011400",
            "NWU0641860000G000000000001401",
        ] {
            assert_eq!(map_line(&row(id, "2019", "M01", "009.25")), None, "{id}");
        }
    }

    #[test]
    fn bad_periods_are_dropped() {
        assert_eq!(map_line(&row(MEDIAN_ID, "2019", "Q01", "009.25")), None);
        assert_eq!(map_line(&row(MEDIAN_ID, "2019", "M1", "009.25")), None);
        assert_eq!(map_line(&row(MEDIAN_ID, "2019", "Mxx", "009.25")), None);
        assert_eq!(map_line(&row(MEDIAN_ID, "2019", "M00", "009.25")), None);
        assert_eq!(map_line(&format!("{MEDIAN_ID}\t2019\tM01")), None);
    }

    #[test]
    fn blank_value_is_kept_with_or_without_trailing_columns() {
        for line in [
            format!("{MEDIAN_ID}\t2020\tM03\t   \tF"),
            format!("{MEDIAN_ID}\t2020\tM03\t   \t"),
            format!("{MEDIAN_ID}\t2020\tM03\t   \r\n"),
        ] {
            let out = map_line(&line).unwrap();
            assert_eq!(out.value.value, "", "{line:?}");
        }
    }

    #[test]
    fn separator_inside_key_codes_is_dropped() {
        // a comma in the state, area or industry slice
        assert_eq!(
            map_line("NWU0,41860000G000000000001400\t2020\tM03\t010.50"),
            None
        );
        assert_eq!(
            map_line("NWU064186,000G000000000001400\t2020\tM03\t010.50"),
            None
        );
        assert_eq!(
            map_line("NWU0641860000G,00000000001400\t2020\tM03\t010.50"),
            None
        );
    }

    #[test]
    fn value_is_carried_as_text() {
        // malformed values are not this phase's concern
        let out = map_line(&row(MEDIAN_ID, "2019", "M01", "abc")).unwrap();
        assert_eq!(out.value.value, "abc");
    }

    #[test]
    fn mapping_is_repeatable() {
        let lines = [
            row(MEDIAN_ID, "2019", "M06", "009.25"),
            row(MEDIAN_ID, "2019", "M13", "009.25"),
            row("NWU01000000000000000000001400", "2020", "M01", "010.00"),
        ];
        let first: Vec<_> = lines.iter().map(|l| map_line(l)).collect();
        let second: Vec<_> = lines.iter().map(|l| map_line(l)).collect();
        assert_eq!(first, second);
        assert_eq!(first.iter().flatten().count(), 2);
    }
}
