use chrono::NaiveDate;
use sea_orm::Database;

use engine::{
    ChangeAction, CreateVoucherCmd, Engine, EngineError, LineRequest, NewProductCmd,
    UpdateVoucherCmd, VoucherKind, VoucherListFilter,
};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

async fn seed_product(engine: &Engine, product_id: &str, name: &str, quantity_minor: i64) {
    engine
        .new_product(NewProductCmd::new(product_id, name).initial_quantity_minor(quantity_minor))
        .await
        .unwrap();
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn balance(engine: &Engine, product_id: &str) -> i64 {
    engine.product(product_id).await.unwrap().quantity_minor
}

#[tokio::test]
async fn addition_increases_stock() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    let records = engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 500)),
        )
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, ChangeAction::Added);
    assert_eq!(records[0].old_quantity_minor, 1000);
    assert_eq!(records[0].new_quantity_minor, 1500);
    assert_eq!(records[0].difference_minor, 500);
    assert_eq!(balance(&engine, "p1").await, 1500);
}

#[tokio::test]
async fn disbursement_decreases_stock() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 400)),
        )
        .await
        .unwrap();

    assert_eq!(balance(&engine, "p1").await, 600);
}

#[tokio::test]
async fn return_kinds_follow_their_signs() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::CustomerReturn, day("2026-02-01"))
                .line(LineRequest::new("p1", 300)),
        )
        .await
        .unwrap();
    assert_eq!(balance(&engine, "p1").await, 1300);

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-2", VoucherKind::SupplierReturn, day("2026-02-02"))
                .line(LineRequest::new("p1", 200)),
        )
        .await
        .unwrap();
    assert_eq!(balance(&engine, "p1").await, 1100);
}

#[tokio::test]
async fn disbursement_below_zero_is_rejected_and_rolled_back() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    let err = engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 1500)),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::StockViolation {
            product_id: "p1".to_string(),
            name: "Bolts".to_string(),
            quantity_minor: 1000,
        }
    );
    assert_eq!(balance(&engine, "p1").await, 1000);
    assert!(matches!(
        engine.voucher_detail("V-1").await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn violation_on_one_line_rolls_back_all_lines() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;
    seed_product(&engine, "p2", "Nuts", 100).await;

    let err = engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 500))
                .line(LineRequest::new("p2", 200)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::StockViolation { .. }));
    assert_eq!(balance(&engine, "p1").await, 1000);
    assert_eq!(balance(&engine, "p2").await, 100);
}

#[tokio::test]
async fn duplicate_product_lines_accumulate() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    let records = engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 100))
                .line(LineRequest::new("p1", 200)),
        )
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].old_quantity_minor, 1000);
    assert_eq!(records[0].new_quantity_minor, 1100);
    assert_eq!(records[1].old_quantity_minor, 1100);
    assert_eq!(records[1].new_quantity_minor, 1300);
    assert_eq!(balance(&engine, "p1").await, 1300);
}

#[tokio::test]
async fn duplicate_disbursement_lines_can_exhaust_stock() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    let err = engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 600))
                .line(LineRequest::new("p1", 600)),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::StockViolation {
            product_id: "p1".to_string(),
            name: "Bolts".to_string(),
            quantity_minor: 400,
        }
    );
    assert_eq!(balance(&engine, "p1").await, 1000);
}

#[tokio::test]
async fn create_rejects_duplicate_voucher_number() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    let cmd = CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
        .line(LineRequest::new("p1", 100));
    engine.create_voucher(cmd.clone()).await.unwrap();

    let err = engine.create_voucher(cmd).await.unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("V-1".to_string()));
    assert_eq!(balance(&engine, "p1").await, 1100);
}

#[tokio::test]
async fn create_rejects_unknown_product() {
    let engine = engine_with_db().await;

    let err = engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("ghost", 100)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::KeyNotFound(_)));
    assert!(matches!(
        engine.voucher_detail("V-1").await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn create_rejects_empty_lines_and_bad_quantities() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    let err = engine
        .create_voucher(CreateVoucherCmd::new(
            "V-1",
            VoucherKind::Addition,
            day("2026-02-01"),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));

    let err = engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 0)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));

    let err = engine
        .create_voucher(
            CreateVoucherCmd::new("  ", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 100)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidId(_)));
}

#[tokio::test]
async fn update_applies_only_the_net_delta() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 0).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 1000)),
        )
        .await
        .unwrap();
    engine
        .create_voucher(
            CreateVoucherCmd::new("V-2", VoucherKind::Disbursement, day("2026-02-02"))
                .line(LineRequest::new("p1", 800)),
        )
        .await
        .unwrap();
    assert_eq!(balance(&engine, "p1").await, 200);

    // Shrinking the addition from 10.00 to 9.00 moves the balance by the
    // delta alone. Reversing the full 10.00 first would underflow.
    let records = engine
        .update_voucher(UpdateVoucherCmd::new(
            "V-1",
            vec![LineRequest::new("p1", 900)],
        ))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, ChangeAction::Modified);
    assert_eq!(records[0].old_quantity_minor, 200);
    assert_eq!(records[0].new_quantity_minor, 100);
    assert_eq!(records[0].difference_minor, -100);
    assert_eq!(balance(&engine, "p1").await, 100);
}

#[tokio::test]
async fn update_with_unchanged_lines_is_a_no_op() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 400)),
        )
        .await
        .unwrap();

    let records = engine
        .update_voucher(UpdateVoucherCmd::new(
            "V-1",
            vec![LineRequest::new("p1", 400)],
        ))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, ChangeAction::Modified);
    assert_eq!(records[0].difference_minor, 0);
    assert_eq!(balance(&engine, "p1").await, 600);
}

#[tokio::test]
async fn update_totals_duplicate_lines_per_product() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 0).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 100))
                .line(LineRequest::new("p1", 200)),
        )
        .await
        .unwrap();
    assert_eq!(balance(&engine, "p1").await, 300);

    // Resubmitting the identical duplicate-line list must not move the
    // balance: the old rows are totalled per product, not matched one by
    // one against each new line.
    let records = engine
        .update_voucher(UpdateVoucherCmd::new(
            "V-1",
            vec![LineRequest::new("p1", 100), LineRequest::new("p1", 200)],
        ))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, ChangeAction::Modified);
    assert_eq!(records[0].difference_minor, 0);
    assert_eq!(balance(&engine, "p1").await, 300);

    let (_, items) = engine.voucher_detail("V-1").await.unwrap();
    assert_eq!(items.len(), 2);

    // Collapsing the duplicates into one line moves by the delta between
    // totals.
    let records = engine
        .update_voucher(UpdateVoucherCmd::new(
            "V-1",
            vec![LineRequest::new("p1", 50)],
        ))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].old_quantity_minor, 300);
    assert_eq!(records[0].new_quantity_minor, 50);
    assert_eq!(balance(&engine, "p1").await, 50);
}

#[tokio::test]
async fn update_reverses_duplicate_lines_once_on_removal() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 0).await;
    seed_product(&engine, "p2", "Nuts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 100))
                .line(LineRequest::new("p1", 200)),
        )
        .await
        .unwrap();

    let records = engine
        .update_voucher(UpdateVoucherCmd::new(
            "V-1",
            vec![LineRequest::new("p2", 400)],
        ))
        .await
        .unwrap();

    let removed = records.iter().find(|r| r.product_id == "p1").unwrap();
    assert_eq!(removed.action, ChangeAction::Removed);
    assert_eq!(removed.old_quantity_minor, 300);
    assert_eq!(removed.new_quantity_minor, 0);
    assert_eq!(balance(&engine, "p1").await, 0);
    assert_eq!(balance(&engine, "p2").await, 1400);
}

#[tokio::test]
async fn update_adds_and_removes_lines() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;
    seed_product(&engine, "p2", "Nuts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 500)),
        )
        .await
        .unwrap();

    let records = engine
        .update_voucher(UpdateVoucherCmd::new(
            "V-1",
            vec![LineRequest::new("p2", 300)],
        ))
        .await
        .unwrap();

    let removed = records
        .iter()
        .find(|r| r.product_id == "p1")
        .unwrap();
    assert_eq!(removed.action, ChangeAction::Removed);
    assert_eq!(removed.new_quantity_minor, 1000);

    let added = records
        .iter()
        .find(|r| r.product_id == "p2")
        .unwrap();
    assert_eq!(added.action, ChangeAction::Added);
    assert_eq!(added.new_quantity_minor, 700);

    assert_eq!(balance(&engine, "p1").await, 1000);
    assert_eq!(balance(&engine, "p2").await, 700);

    let (_, items) = engine.voucher_detail("V-1").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, "p2");
}

#[tokio::test]
async fn update_with_empty_lines_clears_items() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 400)),
        )
        .await
        .unwrap();

    let records = engine
        .update_voucher(UpdateVoucherCmd::new("V-1", Vec::new()))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, ChangeAction::Removed);
    assert_eq!(balance(&engine, "p1").await, 1000);

    let (voucher, items) = engine.voucher_detail("V-1").await.unwrap();
    assert_eq!(voucher.kind, VoucherKind::Disbursement);
    assert!(items.is_empty());
}

#[tokio::test]
async fn update_patches_header_fields() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 100))
                .supplier("Acme"),
        )
        .await
        .unwrap();

    engine
        .update_voucher(
            UpdateVoucherCmd::new("V-1", vec![LineRequest::new("p1", 100)])
                .date(day("2026-02-15"))
                .notes("recounted"),
        )
        .await
        .unwrap();

    let (voucher, _) = engine.voucher_detail("V-1").await.unwrap();
    assert_eq!(voucher.date, day("2026-02-15"));
    assert_eq!(voucher.notes.as_deref(), Some("recounted"));
    // Untouched patches keep the stored value.
    assert_eq!(voucher.supplier.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn update_violation_leaves_everything_untouched() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 400)),
        )
        .await
        .unwrap();

    let err = engine
        .update_voucher(UpdateVoucherCmd::new(
            "V-1",
            vec![LineRequest::new("p1", 2000)],
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::StockViolation { .. }));
    assert_eq!(balance(&engine, "p1").await, 600);

    let (_, items) = engine.voucher_detail("V-1").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity_minor(VoucherKind::Disbursement), 400);
}

#[tokio::test]
async fn update_unknown_voucher_is_not_found() {
    let engine = engine_with_db().await;

    let err = engine
        .update_voucher(UpdateVoucherCmd::new("ghost", Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn delete_restores_balances() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;
    seed_product(&engine, "p2", "Nuts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 400))
                .line(LineRequest::new("p2", 300)),
        )
        .await
        .unwrap();

    let records = engine.delete_voucher("V-1").await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.action == ChangeAction::Removed));

    assert_eq!(balance(&engine, "p1").await, 1000);
    assert_eq!(balance(&engine, "p2").await, 1000);
    assert!(matches!(
        engine.voucher_detail("V-1").await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn delete_of_consumed_addition_is_rejected() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 0).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 1000)),
        )
        .await
        .unwrap();
    engine
        .create_voucher(
            CreateVoucherCmd::new("V-2", VoucherKind::Disbursement, day("2026-02-02"))
                .line(LineRequest::new("p1", 800)),
        )
        .await
        .unwrap();

    let err = engine.delete_voucher("V-1").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::StockViolation {
            product_id: "p1".to_string(),
            name: "Bolts".to_string(),
            quantity_minor: 200,
        }
    );

    assert_eq!(balance(&engine, "p1").await, 200);
    assert!(engine.voucher_detail("V-1").await.is_ok());
}

#[tokio::test]
async fn delete_unknown_voucher_is_not_found() {
    let engine = engine_with_db().await;

    let err = engine.delete_voucher("ghost").await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn machine_metadata_only_persists_for_disbursements() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01")).line(
                LineRequest::new("p1", 100)
                    .machine("press")
                    .machine_unit("line-a"),
            ),
        )
        .await
        .unwrap();
    let (_, items) = engine.voucher_detail("V-1").await.unwrap();
    assert_eq!(items[0].machine, None);
    assert_eq!(items[0].machine_unit, None);

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-2", VoucherKind::Disbursement, day("2026-02-02")).line(
                LineRequest::new("p1", 100)
                    .machine("press")
                    .machine_unit("line-a"),
            ),
        )
        .await
        .unwrap();
    let (_, items) = engine.voucher_detail("V-2").await.unwrap();
    assert_eq!(items[0].machine.as_deref(), Some("press"));
    assert_eq!(items[0].machine_unit.as_deref(), Some("line-a"));
}

#[tokio::test]
async fn items_snapshot_the_product_unit_price() {
    let engine = engine_with_db().await;
    engine
        .new_product(
            NewProductCmd::new("p1", "Bolts")
                .initial_quantity_minor(1000)
                .unit_price_minor(250),
        )
        .await
        .unwrap();

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 400)),
        )
        .await
        .unwrap();

    let (_, items) = engine.voucher_detail("V-1").await.unwrap();
    assert_eq!(items[0].unit_price_minor, 250);
    // 4.00 units at 2.50 each.
    assert_eq!(items[0].total_price_minor(), 1000);
}

#[tokio::test]
async fn list_vouchers_filters_and_limits() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 10_000).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 100)),
        )
        .await
        .unwrap();
    engine
        .create_voucher(
            CreateVoucherCmd::new("V-2", VoucherKind::Disbursement, day("2026-02-03"))
                .line(LineRequest::new("p1", 100)),
        )
        .await
        .unwrap();
    engine
        .create_voucher(
            CreateVoucherCmd::new("V-3", VoucherKind::Disbursement, day("2026-02-02"))
                .line(LineRequest::new("p1", 100)),
        )
        .await
        .unwrap();

    let all = engine.list_vouchers(VoucherListFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    // Most recent date first.
    assert_eq!(all[0].voucher_number, "V-2");

    let disbursements = engine
        .list_vouchers(VoucherListFilter {
            kind: Some(VoucherKind::Disbursement),
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(disbursements.len(), 2);

    let limited = engine
        .list_vouchers(VoucherListFilter {
            kind: None,
            limit: Some(1),
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].voucher_number, "V-2");
}

#[tokio::test]
async fn low_stock_listing_tracks_thresholds() {
    let engine = engine_with_db().await;
    engine
        .new_product(
            NewProductCmd::new("p1", "Bolts")
                .initial_quantity_minor(1000)
                .minimum_threshold_minor(500),
        )
        .await
        .unwrap();

    assert!(engine.list_low_stock_products().await.unwrap().is_empty());

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 600)),
        )
        .await
        .unwrap();

    let low = engine.list_low_stock_products().await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].product_id, "p1");
    assert!(low[0].is_low_stock());
}

#[tokio::test]
async fn product_crud_guards() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 1000).await;

    let err = engine
        .new_product(NewProductCmd::new("p1", "Bolts again"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("p1".to_string()));

    let err = engine
        .new_product(NewProductCmd::new("p2", "Nuts").initial_quantity_minor(-1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidQuantity(_)));

    let err = engine.product("ghost").await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Disbursement, day("2026-02-01"))
                .line(LineRequest::new("p1", 100)),
        )
        .await
        .unwrap();
    let err = engine.delete_product("p1").await.unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));

    // Once the voucher is gone the product can be deleted.
    engine.delete_voucher("V-1").await.unwrap();
    engine.delete_product("p1").await.unwrap();
    assert!(matches!(
        engine.product("p1").await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn voucher_sequence_keeps_ledger_consistent() {
    let engine = engine_with_db().await;
    seed_product(&engine, "p1", "Bolts", 500).await;

    engine
        .create_voucher(
            CreateVoucherCmd::new("V-1", VoucherKind::Addition, day("2026-02-01"))
                .line(LineRequest::new("p1", 1000)),
        )
        .await
        .unwrap();
    engine
        .create_voucher(
            CreateVoucherCmd::new("V-2", VoucherKind::Disbursement, day("2026-02-02"))
                .line(LineRequest::new("p1", 700)),
        )
        .await
        .unwrap();
    engine
        .create_voucher(
            CreateVoucherCmd::new("V-3", VoucherKind::CustomerReturn, day("2026-02-03"))
                .line(LineRequest::new("p1", 200)),
        )
        .await
        .unwrap();
    engine
        .create_voucher(
            CreateVoucherCmd::new("V-4", VoucherKind::SupplierReturn, day("2026-02-04"))
                .line(LineRequest::new("p1", 300)),
        )
        .await
        .unwrap();

    // 500 + 1000 - 700 + 200 - 300
    assert_eq!(balance(&engine, "p1").await, 700);

    engine.delete_voucher("V-4").await.unwrap();
    engine.delete_voucher("V-3").await.unwrap();
    engine.delete_voucher("V-2").await.unwrap();
    engine.delete_voucher("V-1").await.unwrap();
    assert_eq!(balance(&engine, "p1").await, 500);

    // A deleted number is free for reuse.
    engine
        .create_voucher(
            CreateVoucherCmd::new("V-2", VoucherKind::Addition, day("2026-02-05"))
                .line(LineRequest::new("p1", 100)),
        )
        .await
        .unwrap();
    assert_eq!(balance(&engine, "p1").await, 600);
}
