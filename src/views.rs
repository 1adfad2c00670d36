//! Pure data -> view-model mapping for the portal pages. No rendering and no
//! storage access happens here; the UI layer turns these into markup.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{InventoryItem, ItemStatus, TransactionKind, TransactionRecord};
use crate::services::dashboard::DashboardStats;

/// A badge: a presentation class plus its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub css_class: String,
    pub label: String,
}

impl Badge {
    fn new(css_class: &str, label: impl Into<String>) -> Self {
        Self {
            css_class: css_class.to_string(),
            label: label.into(),
        }
    }
}

pub fn status_badge(status: ItemStatus) -> Badge {
    match status {
        ItemStatus::Available => Badge::new("bg-success", "For sale"),
        ItemStatus::Sold => Badge::new("bg-primary", "Sold"),
        ItemStatus::Spoiled => Badge::new("bg-danger", "Spoiled"),
    }
}

/// Known quality grades get a colored badge; anything else falls back to the
/// neutral one with the raw text.
pub fn quality_badge(quality: &str) -> Badge {
    match quality {
        "Premium" => Badge::new("bg-success", "Premium"),
        "Standard" => Badge::new("bg-warning", "Standard"),
        "Common" => Badge::new("bg-secondary", "Common"),
        other => Badge::new("bg-secondary", other),
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%-d %b %Y").to_string()
}

pub fn format_datetime(date: DateTime<Utc>) -> String {
    date.format("%-d %b %Y %H:%M").to_string()
}

/// Groups the integer digits of an amount with commas, e.g. `4000` ->
/// `"4,000"`. Fractional digits are kept as-is.
pub fn format_amount(amount: Decimal) -> String {
    let normalized = amount.normalize().to_string();
    let (sign, rest) = match normalized.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", normalized.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn format_rupees(amount: Decimal) -> String {
    format!("{} rupees", format_amount(amount))
}

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub product_name: String,
    pub added_on: String,
    pub farmer_name: String,
    pub farmer_phone: String,
    pub quantity: String,
    pub unit_price: String,
    pub quality: Badge,
    pub warehouse: String,
    pub status: Badge,
}

pub fn inventory_row(item: &InventoryItem) -> InventoryRow {
    InventoryRow {
        product_name: item.product_name.clone(),
        added_on: format_date(item.created_at),
        farmer_name: item.farmer_name.clone(),
        farmer_phone: item.farmer_phone.clone(),
        quantity: format!("{} kg", format_amount(item.quantity)),
        unit_price: format!("{}/kg", format_rupees(item.price_per_kg)),
        quality: quality_badge(&item.quality),
        warehouse: item.warehouse.clone(),
        status: status_badge(item.status),
    }
}

/// One entry of the recent-activity panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub icon: String,
    pub product_name: String,
    pub quantity: String,
    pub farmer_name: String,
    pub occurred_on: String,
    pub amount: String,
}

pub fn activity_entry(record: &TransactionRecord) -> ActivityEntry {
    let icon = match record.kind {
        TransactionKind::Sale => "shopping-cart",
        TransactionKind::Addition => "box",
    };
    ActivityEntry {
        icon: icon.to_string(),
        product_name: record.product_name.clone(),
        quantity: format!("{} kg", format_amount(record.quantity)),
        farmer_name: record.farmer_name.clone(),
        occurred_on: format_datetime(record.date),
        amount: format_rupees(record.total_price),
    }
}

/// The four stat cards on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardCards {
    pub total_items: String,
    pub sold_items: String,
    pub spoiled_items: String,
    pub total_revenue: String,
}

pub fn dashboard_cards(stats: &DashboardStats) -> DashboardCards {
    DashboardCards {
        total_items: stats.total_items.to_string(),
        sold_items: stats.sold_items.to_string(),
        spoiled_items: stats.spoiled_items.to_string(),
        total_revenue: format_rupees(stats.total_revenue),
    }
}
