// src/reference/types.rs

/// A state and area as listed in the `nw.starea` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateArea {
    pub state_code: String,
    pub area_code: String,
    pub area_text: String,
}

/// An industry as listed in the `nw.industry` table.
/// `industry_code` is always the 4-character prefix used inside series IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Industry {
    pub industry_code: String,
    pub industry_text: String,
}
