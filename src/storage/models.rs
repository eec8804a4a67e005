//! Storage record models for the preference file.

use serde::{Deserialize, Serialize};

/// One stored preference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub value: String,

    /// Unix timestamp of the last write.
    pub updated_at: i64,
}

impl PreferenceRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use foodlens::storage::PreferenceRecord;
    ///
    /// let record = PreferenceRecord::new("light");
    /// assert_eq!(record.value, "light");
    /// assert!(record.updated_at > 0);
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}
