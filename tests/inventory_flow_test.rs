//! End-to-end flows through the inventory service: create, list, filter,
//! sell, delete, and the ledger side effects of each.

mod common;

use chrono::Duration;
use rust_decimal_macros::dec;

use agriverse_core::clock::Clock;
use agriverse_core::models::{
    ItemDraft, ItemPatch, ItemStatus, RecordId, TransactionKind,
};
use agriverse_core::services::inventory::InventoryFilter;

fn rice_draft() -> ItemDraft {
    ItemDraft {
        product_name: "Rice".to_string(),
        farmer_name: "Zafar Iqbal".to_string(),
        farmer_phone: "0345-1122334".to_string(),
        quantity: dec!(10),
        price_per_kg: dec!(100),
        quality: "Premium".to_string(),
        warehouse: "Lahore".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn add_then_list_includes_the_new_item() {
    let (portal, clock) = common::test_portal();

    let created = portal.inventory.add(rice_draft()).await.unwrap();
    assert_eq!(created.status, ItemStatus::Available);
    assert_eq!(created.created_at, clock.now());
    assert_eq!(
        created.id,
        RecordId::from(clock.now().timestamp_millis())
    );

    let items = portal.inventory.list(&InventoryFilter::default()).await.unwrap();
    let matching: Vec<_> = items
        .iter()
        .filter(|item| item.product_name == "Rice")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].quantity, dec!(10));
    assert_eq!(matching[0].price_per_kg, dec!(100));
}

#[tokio::test(start_paused = true)]
async fn add_appends_an_addition_ledger_entry_with_zero_total() {
    let (portal, _clock) = common::test_portal();

    portal.inventory.add(rice_draft()).await.unwrap();

    let ledger = portal.transactions.list().await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].kind, TransactionKind::Addition);
    assert_eq!(ledger[0].total_price, dec!(0));
    assert_eq!(ledger[0].product_name, "Rice");
}

#[tokio::test(start_paused = true)]
async fn invalid_draft_is_rejected_before_any_write() {
    let (portal, _clock) = common::test_portal();

    let mut draft = rice_draft();
    draft.quantity = dec!(0);
    let err = portal.inventory.add(draft).await.unwrap_err();
    assert!(matches!(
        err,
        agriverse_core::errors::ServiceError::Validation(_)
    ));

    assert!(portal.transactions.list().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn marking_sold_appends_exactly_one_sale_entry() {
    let (portal, clock) = common::test_portal();

    let created = portal.inventory.add(rice_draft()).await.unwrap();
    clock.advance(Duration::milliseconds(5));

    let updated = portal
        .inventory
        .update(&created.id, ItemPatch::status(ItemStatus::Sold))
        .await
        .unwrap();
    assert_eq!(updated.status, ItemStatus::Sold);

    let ledger = portal.transactions.list().await.unwrap();
    let sales: Vec<_> = ledger
        .iter()
        .filter(|t| t.kind == TransactionKind::Sale)
        .collect();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].total_price, dec!(10) * dec!(100));
    // Newest-first: the sale sits ahead of the addition.
    assert_eq!(ledger[0].kind, TransactionKind::Sale);
}

#[tokio::test(start_paused = true)]
async fn sale_total_is_priced_from_the_post_merge_item() {
    let (portal, clock) = common::test_portal();

    let created = portal.inventory.add(rice_draft()).await.unwrap();
    clock.advance(Duration::milliseconds(5));

    let patch = ItemPatch {
        quantity: Some(dec!(4)),
        price_per_kg: Some(dec!(250)),
        status: Some(ItemStatus::Sold),
        ..ItemPatch::default()
    };
    portal.inventory.update(&created.id, patch).await.unwrap();

    let ledger = portal.transactions.list().await.unwrap();
    assert_eq!(ledger[0].total_price, dec!(1000));
    assert_eq!(ledger[0].quantity, dec!(4));
}

#[tokio::test(start_paused = true)]
async fn update_without_a_status_change_records_no_sale() {
    let (portal, clock) = common::test_portal();

    let created = portal.inventory.add(rice_draft()).await.unwrap();
    clock.advance(Duration::milliseconds(5));

    let patch = ItemPatch {
        quantity: Some(dec!(7)),
        ..ItemPatch::default()
    };
    portal.inventory.update(&created.id, patch).await.unwrap();

    let ledger = portal.transactions.list().await.unwrap();
    assert!(ledger.iter().all(|t| t.kind == TransactionKind::Addition));
}

#[tokio::test(start_paused = true)]
async fn update_of_unknown_id_is_not_found() {
    let (portal, _clock) = common::test_portal();

    let err = portal
        .inventory
        .update(&RecordId::Int(999), ItemPatch::status(ItemStatus::Sold))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test(start_paused = true)]
async fn string_form_of_a_numeric_id_matches() {
    let (portal, clock) = common::test_portal();

    let created = portal.inventory.add(rice_draft()).await.unwrap();
    clock.advance(Duration::milliseconds(5));

    let string_id = RecordId::from(created.id.to_string());
    let updated = portal
        .inventory
        .update(&string_id, ItemPatch::status(ItemStatus::Spoiled))
        .await
        .unwrap();
    assert_eq!(updated.status, ItemStatus::Spoiled);

    portal.inventory.delete(&string_id).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn delete_removes_the_item() {
    let (portal, clock) = common::test_portal();

    let created = portal.inventory.add(rice_draft()).await.unwrap();
    clock.advance(Duration::milliseconds(5));
    portal.inventory.delete(&created.id).await.unwrap();

    let items = portal.inventory.list(&InventoryFilter::search("Rice")).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test(start_paused = true)]
async fn delete_of_unknown_id_fails_and_leaves_the_list_unchanged() {
    let (portal, clock) = common::test_portal();

    portal.inventory.add(rice_draft()).await.unwrap();
    clock.advance(Duration::milliseconds(5));

    let before = portal.inventory.list(&InventoryFilter::default()).await.unwrap();
    let err = portal.inventory.delete(&RecordId::Int(12345)).await.unwrap_err();
    assert!(err.is_not_found());

    let after = portal.inventory.list(&InventoryFilter::default()).await.unwrap();
    assert_eq!(before.len(), after.len());
}

#[tokio::test(start_paused = true)]
async fn empty_store_seeds_the_two_defaults_exactly_once() {
    let (portal, _clock) = common::test_portal();

    let first = portal.inventory.list(&InventoryFilter::default()).await.unwrap();
    assert_eq!(first.len(), 2);
    let names: Vec<_> = first.iter().map(|i| i.product_name.as_str()).collect();
    assert!(names.contains(&"Potato"));
    assert!(names.contains(&"Wheat"));

    let second = portal.inventory.list(&InventoryFilter::default()).await.unwrap();
    assert_eq!(second.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn listing_is_newest_first() {
    let (portal, clock) = common::test_portal();

    let mut first_draft = rice_draft();
    first_draft.product_name = "Rice".to_string();
    portal.inventory.add(first_draft).await.unwrap();

    clock.advance(Duration::milliseconds(10));
    let mut second_draft = rice_draft();
    second_draft.product_name = "Corn".to_string();
    portal.inventory.add(second_draft).await.unwrap();

    let items = portal.inventory.list(&InventoryFilter::default()).await.unwrap();
    assert_eq!(items[0].product_name, "Corn");
    assert_eq!(items[1].product_name, "Rice");
}

#[tokio::test(start_paused = true)]
async fn search_results_are_a_subset_of_the_unfiltered_list() {
    let (portal, clock) = common::test_portal();

    portal.inventory.list(&InventoryFilter::default()).await.unwrap(); // seed
    clock.advance(Duration::milliseconds(10));
    portal.inventory.add(rice_draft()).await.unwrap();

    let all = portal.inventory.list(&InventoryFilter::default()).await.unwrap();
    let hits = portal
        .inventory
        .list(&InventoryFilter::search("lahore"))
        .await
        .unwrap();

    assert!(!hits.is_empty());
    for hit in &hits {
        assert!(all.iter().any(|item| item == hit));
        assert!(hit.warehouse.eq_ignore_ascii_case("Lahore")
            || hit.farmer_name.to_lowercase().contains("lahore")
            || hit.product_name.to_lowercase().contains("lahore"));
    }
}

#[tokio::test(start_paused = true)]
async fn status_and_warehouse_filters_compose() {
    let (portal, clock) = common::test_portal();

    portal.inventory.list(&InventoryFilter::default()).await.unwrap(); // seed
    clock.advance(Duration::milliseconds(10));
    let created = portal.inventory.add(rice_draft()).await.unwrap();
    clock.advance(Duration::milliseconds(10));
    portal
        .inventory
        .update(&created.id, ItemPatch::status(ItemStatus::Sold))
        .await
        .unwrap();

    let filter = InventoryFilter {
        status: Some(ItemStatus::Sold),
        warehouse: Some("Lahore".to_string()),
        ..InventoryFilter::default()
    };
    let items = portal.inventory.list(&filter).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_name, "Rice");
}
