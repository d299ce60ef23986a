pub mod load;
pub mod types;

pub use load::{parse_areas, parse_industries, ReferenceTables};
pub use types::{Industry, StateArea};

/// Area reference table, relative to the input folder.
pub const AREA_FILE_NAME: &str = "nw.starea";
/// Industry reference table, relative to the input folder.
pub const INDUSTRY_FILE_NAME: &str = "nw.industry";
