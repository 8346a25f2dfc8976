//! Column-name constants for the stock sheet.
//! Observation columns are not listed here; they are built by the column resolver.

// ── Identity columns ────────────────────────────────────────────────────────
pub mod identity {
    pub const MATERIAL: &str = "Material";
    pub const LAMINATE: &str = "Laminate";
    pub const CODE: &str = "Code";

    /// Read-only in the grid, in display order.
    pub const ALL: [&str; 3] = [MATERIAL, LAMINATE, CODE];
}

// ── Per-material conversion constants ───────────────────────────────────────
pub mod constants {
    pub const METERS_PER_ROLL: &str = "MetersPerRoll";
    pub const ROLLS_PER_PALLET: &str = "RollsPerPallet";
    pub const AREA_PER_PALLET: &str = "AreaPerPallet";

    pub const ALL: [&str; 3] = [METERS_PER_ROLL, ROLLS_PER_PALLET, AREA_PER_PALLET];
}
