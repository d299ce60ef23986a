pub mod aggregate;
pub mod job;
pub mod reference;
pub mod series;
