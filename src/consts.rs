/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV export of the shared performance sheet
pub(crate) const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1myNDRmrQg4IK2eSJ7cjAgRX7s-DYZgvH_7kE4E5jPkc/export?format=csv&gid=0";

/// Rows with fewer fields than this are skipped
pub(crate) const MIN_FIELDS: usize = 8;

// Column positions in the export; 4 and 5 are not used.
pub(crate) const COL_DATE: usize = 0;
pub(crate) const COL_PRODUCT: usize = 1;
pub(crate) const COL_AD_COST: usize = 2;
pub(crate) const COL_REVENUE: usize = 3;
pub(crate) const COL_ORDERS: usize = 6;
pub(crate) const COL_OPERATING_COST: usize = 7;
