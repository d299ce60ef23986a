pub mod filter;
pub mod id;
pub mod key;

pub use filter::{map_line, MapOutput};
pub use id::{IdDefect, SeriesId};
pub use key::{GroupKey, RawObservation, FIELD_SEPARATOR};
