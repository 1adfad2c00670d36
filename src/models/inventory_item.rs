use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::RecordId;

/// Lifecycle status of a produce lot. Transitions are not enforced; an update
/// may write any status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    Sold,
    Spoiled,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Sold => "sold",
            ItemStatus::Spoiled => "spoiled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(ItemStatus::Available),
            "sold" => Some(ItemStatus::Sold),
            "spoiled" => Some(ItemStatus::Spoiled),
            _ => None,
        }
    }
}

/// One unit of produce tracked through its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: RecordId,
    pub product_name: String,
    pub farmer_name: String,
    pub farmer_phone: String,
    /// Kilograms.
    pub quantity: Decimal,
    pub price_per_kg: Decimal,
    pub quality: String,
    pub warehouse: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an inventory item. The service assigns id, status, and
/// creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemDraft {
    #[validate(length(min = 1, message = "product name is required"))]
    pub product_name: String,
    #[validate(length(min = 1, message = "farmer name is required"))]
    pub farmer_name: String,
    #[serde(default)]
    pub farmer_phone: String,
    #[validate(custom = "validate_positive")]
    pub quantity: Decimal,
    #[validate(custom = "validate_positive")]
    pub price_per_kg: Decimal,
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub warehouse: String,
}

fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("positive");
        err.message = Some("value must be positive".into());
        Err(err)
    }
}

/// Partial update: every present field overwrites the stored one. Id and
/// creation timestamp are not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    pub product_name: Option<String>,
    pub farmer_name: Option<String>,
    pub farmer_phone: Option<String>,
    pub quantity: Option<Decimal>,
    pub price_per_kg: Option<Decimal>,
    pub quality: Option<String>,
    pub warehouse: Option<String>,
    pub status: Option<ItemStatus>,
}

impl ItemPatch {
    /// A patch that only flips the status.
    pub fn status(status: ItemStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(&self, item: &mut InventoryItem) {
        if let Some(value) = &self.product_name {
            item.product_name = value.clone();
        }
        if let Some(value) = &self.farmer_name {
            item.farmer_name = value.clone();
        }
        if let Some(value) = &self.farmer_phone {
            item.farmer_phone = value.clone();
        }
        if let Some(value) = self.quantity {
            item.quantity = value;
        }
        if let Some(value) = self.price_per_kg {
            item.price_per_kg = value;
        }
        if let Some(value) = &self.quality {
            item.quality = value.clone();
        }
        if let Some(value) = &self.warehouse {
            item.warehouse = value.clone();
        }
        if let Some(value) = self.status {
            item.status = value;
        }
    }
}
