//! API constants

/// Fixed number of rows returned by the listing endpoint. Not configurable.
pub const LIST_LIMIT: usize = 25;
