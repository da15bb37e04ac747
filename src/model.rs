//! Item records and create payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned item identifier.
pub type ItemId = i64;

/// A found item as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date_found: NaiveDate,
    pub contact_info: Option<String>,
    pub claimed: bool,
}

/// Fields supplied when registering a found item.
///
/// `id` and `claimed` are owned by the store and never accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub date_found: NaiveDate,
    #[serde(default)]
    pub contact_info: Option<String>,
}

/// Rejected create payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
}

impl NewItem {
    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Confirmation body returned by claim and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn claimed() -> Self {
        Self {
            message: "Item claimed successfully".into(),
        }
    }

    pub fn deleted() -> Self {
        Self {
            message: "Item deleted successfully".into(),
        }
    }
}
