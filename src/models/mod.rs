//! Domain records persisted in the record store.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod inventory_item;
pub mod session_user;
pub mod transaction_record;

pub use inventory_item::{InventoryItem, ItemDraft, ItemPatch, ItemStatus};
pub use session_user::SessionUser;
pub use transaction_record::{TransactionDraft, TransactionKind, TransactionRecord};

/// Time-based record identifier. Stored documents may carry ids either as
/// numbers or as strings; equality is lenient across the two representations
/// (a string compares equal to an integer when it parses to the same value),
/// which is what update/delete matching relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecordId::Int(a), RecordId::Int(b)) => a == b,
            (RecordId::Text(a), RecordId::Text(b)) => a == b,
            (RecordId::Int(n), RecordId::Text(s)) | (RecordId::Text(s), RecordId::Int(n)) => {
                s.trim().parse::<i64>().map(|parsed| parsed == *n).unwrap_or(false)
            }
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}
