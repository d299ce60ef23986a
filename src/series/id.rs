// src/series/id.rs
//
// Layout of an NCS series ID (see ftp://ftp.bls.gov/pub/time.series/nw/nw.txt):
//
//   NWU 06 41860 000 0000 000000 00 14 00
//   |   |  |     |   |    |      |  |  worker level   [27,29)
//   |   |  |     |   |    |      |  data type         [25,27)
//   |   |  |     |   |    |      subcell              [23,25)
//   |   |  |     |   |    occupation                  [17,23)
//   |   |  |     |   industry                         [13,17)
//   |   |  |     (unused)                             [10,13)
//   |   |  area                                       [5,10)
//   |   state                                         [3,5)
//   survey + seasonal                                 [0,3)

use std::fmt;

pub const SURVEY_PREFIX: &str = "NW";
pub const MIN_SERIES_ID_LEN: usize = 29;

pub const HOURLY_MEDIAN_WAGE: &str = "14";
pub const ALL_WORKERS_OCCUPATION: &str = "000000";
pub const ALL_WORKERS_SUBCELL: &str = "00";
pub const ALL_WORKERS_LEVEL: &str = "00";

/// Why a raw series ID could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdDefect {
    /// Does not start with the survey abbreviation.
    WrongSurvey,
    /// Shorter than 29 bytes (or not slicable at the fixed offsets).
    TooShort,
}

impl fmt::Display for IdDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdDefect::WrongSurvey => write!(f, "unexpected series ID"),
            IdDefect::TooShort => write!(f, "series ID too short"),
        }
    }
}

/// A decoded series ID, borrowing from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesId<'a> {
    pub state_code: &'a str,
    pub area_code: &'a str,
    pub industry_code: &'a str,
    pub occupation_code: &'a str,
    pub subcell_code: &'a str,
    pub data_type_code: &'a str,
    pub worker_level_code: &'a str,
}

impl<'a> SeriesId<'a> {
    pub fn decode(raw: &'a str) -> Result<Self, IdDefect> {
        if !raw.starts_with(SURVEY_PREFIX) {
            return Err(IdDefect::WrongSurvey);
        }
        if raw.len() < MIN_SERIES_ID_LEN {
            return Err(IdDefect::TooShort);
        }
        // `get` rather than indexing: a multi-byte char at an offset is a bad ID, not a panic
        let slice = |start: usize, end: usize| raw.get(start..end).ok_or(IdDefect::TooShort);
        Ok(Self {
            state_code: slice(3, 5)?,
            area_code: slice(5, 10)?,
            industry_code: slice(13, 17)?,
            occupation_code: slice(17, 23)?,
            subcell_code: slice(23, 25)?,
            data_type_code: slice(25, 27)?,
            worker_level_code: slice(27, 29)?,
        })
    }

    /// True for the hourly median wage of the all-workers aggregate.
    pub fn is_all_workers_median_wage(&self) -> bool {
        self.data_type_code == HOURLY_MEDIAN_WAGE
            && self.occupation_code == ALL_WORKERS_OCCUPATION
            && self.subcell_code == ALL_WORKERS_SUBCELL
            && self.worker_level_code == ALL_WORKERS_LEVEL
    }
}
