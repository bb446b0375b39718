//! Monthly revenue types

use serde::{Deserialize, Serialize};

/// Revenue for one month, keyed by a short month code such as `Jan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    /// Month code, at most 4 characters (`VARCHAR(4)`, unique)
    pub month: String,
    /// Revenue for the month
    pub revenue: i32,
}

impl Revenue {
    /// Create a revenue record
    pub fn new(month: impl Into<String>, revenue: i32) -> Self {
        Self {
            month: month.into(),
            revenue,
        }
    }
}
