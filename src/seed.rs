//! Built-in demo defaults. Seeded at login when the documents are absent and
//! self-healed by the inventory listing when the list is empty.

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use crate::models::{
    InventoryItem, ItemStatus, RecordId, TransactionKind, TransactionRecord,
};

/// The two default produce lots. Fixed timestamps keep self-healing
/// deterministic.
pub fn default_inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem {
            id: RecordId::Int(1),
            product_name: "Potato".to_string(),
            farmer_name: "Ahmed Ali".to_string(),
            farmer_phone: "0300-1234567".to_string(),
            quantity: dec!(100),
            price_per_kg: dec!(40),
            quality: "Premium".to_string(),
            warehouse: "Lahore".to_string(),
            status: ItemStatus::Available,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        },
        InventoryItem {
            id: RecordId::Int(2),
            product_name: "Wheat".to_string(),
            farmer_name: "Muhammad Hussain".to_string(),
            farmer_phone: "0312-7654321".to_string(),
            quantity: dec!(200),
            price_per_kg: dec!(60),
            quality: "Standard".to_string(),
            warehouse: "Faisalabad".to_string(),
            status: ItemStatus::Available,
            created_at: Utc.with_ymd_and_hms(2024, 1, 14, 14, 20, 0).unwrap(),
        },
    ]
}

/// The default ledger: one completed tomato sale.
pub fn default_transactions() -> Vec<TransactionRecord> {
    vec![TransactionRecord {
        id: RecordId::Int(1),
        kind: TransactionKind::Sale,
        product_name: "Tomato".to_string(),
        farmer_name: "Fatima Bibi".to_string(),
        quantity: dec!(50),
        price_per_kg: dec!(80),
        total_price: dec!(4000),
        date: Utc.with_ymd_and_hms(2024, 1, 13, 9, 15, 0).unwrap(),
        note: None,
        buyer: Some("Vegetable Market".to_string()),
    }]
}
