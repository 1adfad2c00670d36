use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RecordId;

/// Kinds of ledger entries the current flows produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Sale,
    Addition,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "sale",
            TransactionKind::Addition => "addition",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sale" => Some(TransactionKind::Sale),
            "addition" => Some(TransactionKind::Addition),
            _ => None,
        }
    }
}

/// Immutable ledger entry snapshotting an addition or sale. No reference back
/// to the originating inventory item is stored; the relation is by snapshot
/// only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub product_name: String,
    pub farmer_name: String,
    pub quantity: Decimal,
    pub price_per_kg: Decimal,
    /// Zero for additions; quantity x unit price for sales. Documents written
    /// by older builds may omit it, which counts as zero.
    #[serde(default)]
    pub total_price: Decimal,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
}

/// Input for recording a ledger entry. The service assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub product_name: String,
    pub farmer_name: String,
    pub quantity: Decimal,
    pub price_per_kg: Decimal,
    pub total_price: Decimal,
    pub date: DateTime<Utc>,
    pub note: Option<String>,
    pub buyer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TransactionKind::Sale).unwrap(), "\"sale\"");
        assert_eq!(TransactionKind::from_str("addition"), Some(TransactionKind::Addition));
        assert_eq!(TransactionKind::from_str("refund"), None);
    }

    #[test]
    fn missing_total_price_deserializes_as_zero() {
        let raw = r#"{
            "id": 1,
            "type": "addition",
            "product_name": "Potato",
            "farmer_name": "Ahmed Ali",
            "quantity": 100,
            "price_per_kg": 40,
            "date": "2024-01-15T10:30:00Z"
        }"#;
        let record: TransactionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.total_price, Decimal::ZERO);
        assert_eq!(record.kind, TransactionKind::Addition);
        assert_eq!(record.note, None);
    }
}
