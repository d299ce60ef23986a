pub mod reduce;
pub mod summary;
pub mod wage;

pub use reduce::{Reduced, ReduceWorker};
pub use summary::{GroupSummary, WageObservation};
pub use wage::Wage;
