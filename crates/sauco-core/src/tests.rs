use chrono::{DateTime, NaiveDate, Utc};

use sauco_domain::{
    to_base_units, Catalog, Ledger, Movement, OperationKind, Product, QuantityMode, Sector,
};

use crate::{
    catalog_service::CatalogService,
    movement_service::{MovementDraft, MovementService},
    stock_service::{StockIndex, StockService},
    storage::{CatalogUpload, Dataset},
    time::Clock,
    ValidationError,
};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn clock() -> FixedClock {
    let naive = NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(14, 5, 37)
        .unwrap();
    FixedClock(DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn draft(product: &str, kind: OperationKind, quantity: f64, sector: Sector) -> MovementDraft {
    MovementDraft {
        product: product.to_string(),
        kind,
        quantity,
        sector,
    }
}

#[test]
fn register_appends_with_minute_precision() {
    let mut ledger = Ledger::default();

    let movement = MovementService::register(
        &mut ledger,
        draft("Harina", OperationKind::Entry, 10.0, Sector::Mill),
        &clock(),
    )
    .expect("register");

    assert_eq!(ledger.len(), 1);
    let expected = NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(14, 5, 0)
        .unwrap();
    assert_eq!(movement.recorded_at, expected);
    assert_eq!(ledger.movements[0], movement);
}

#[test]
fn register_rejects_non_positive_quantities() {
    for bad in [0.0, -3.5, f64::NAN, f64::INFINITY] {
        let mut ledger = Ledger::default();
        let err = MovementService::register(
            &mut ledger,
            draft("Harina", OperationKind::Entry, bad, Sector::Mill),
            &clock(),
        )
        .unwrap_err();

        assert!(matches!(err, ValidationError::NonPositiveQuantity(_)));
        assert!(ledger.is_empty(), "rejected input must not append");
    }
}

#[test]
fn current_stock_matches_hand_computed_balance() {
    let mut ledger = Ledger::default();
    let clock = clock();
    let steps = [
        (OperationKind::Entry, 100.0, Sector::Mill),
        (OperationKind::Exit, 30.0, Sector::Mill),
        (OperationKind::Entry, 12.5, Sector::Mill),
        (OperationKind::Entry, 40.0, Sector::Dispatch),
    ];
    for (kind, quantity, sector) in steps {
        MovementService::register(&mut ledger, draft("Harina", kind, quantity, sector), &clock)
            .expect("register");
    }

    assert_eq!(
        StockService::current_stock(&ledger, "Harina", Sector::Mill),
        100.0 - 30.0 + 12.5
    );
    assert_eq!(
        StockService::current_stock(&ledger, "Harina", Sector::Dispatch),
        40.0
    );
    assert_eq!(
        StockService::current_stock(&ledger, "Harina", Sector::Factory),
        0.0
    );
}

#[test]
fn bundle_entry_then_unit_exit_scenario() {
    let catalog = Catalog::new(vec![Product::new("Harina").with_units_per_bundle(25.0)]);
    let mut ledger = Ledger::default();
    let clock = clock();

    let quantity = to_base_units(3.0, QuantityMode::Bundles, catalog.units_per_bundle("Harina"));
    assert_eq!(quantity, 75.0);

    let recorded = MovementService::register(
        &mut ledger,
        draft("Harina", OperationKind::Entry, quantity, Sector::Mill),
        &clock,
    )
    .expect("entry");
    assert_eq!(recorded.quantity, 75.0);
    assert_eq!(
        StockService::current_stock(&ledger, "Harina", Sector::Mill),
        75.0
    );

    MovementService::register(
        &mut ledger,
        draft("Harina", OperationKind::Exit, 20.0, Sector::Mill),
        &clock,
    )
    .expect("exit");
    assert_eq!(
        StockService::current_stock(&ledger, "Harina", Sector::Mill),
        55.0
    );
}

#[test]
fn replace_swaps_catalog_and_leaves_ledger_alone() {
    let mut dataset = Dataset::new(
        Catalog::new(vec![Product::new("Harina")]),
        Ledger::new(vec![Movement {
            recorded_at: clock().now().naive_utc(),
            product: "Harina".to_string(),
            kind: OperationKind::Entry,
            quantity: 10.0,
            sector: Sector::Mill,
        }]),
    );
    let before = dataset.ledger.clone();

    let upload = CatalogUpload {
        columns: vec!["Producto".to_string(), "Unidades_Fardo".to_string()],
        products: vec![
            Product::new("Azúcar").with_units_per_bundle(10.0),
            Product::new("Sal"),
        ],
    };
    CatalogService::replace(&mut dataset, upload).expect("replace");

    assert_eq!(dataset.catalog.len(), 2);
    assert!(dataset.catalog.product("Harina").is_none());
    assert_eq!(dataset.ledger, before);
}

#[test]
fn replace_without_product_column_is_rejected() {
    let original_catalog = Catalog::new(vec![Product::new("Harina")]);
    let mut dataset = Dataset::new(original_catalog.clone(), Ledger::default());

    let upload = CatalogUpload {
        columns: vec!["Nombre".to_string()],
        products: Vec::new(),
    };
    let err = CatalogService::replace(&mut dataset, upload).unwrap_err();

    assert_eq!(err, ValidationError::MissingColumn("Producto"));
    assert_eq!(dataset.catalog, original_catalog);
}

#[test]
fn movements_for_dropped_products_still_aggregate() {
    let mut ledger = Ledger::default();
    MovementService::register(
        &mut ledger,
        draft("Levadura", OperationKind::Entry, 5.0, Sector::Factory),
        &clock(),
    )
    .expect("register");

    let balances = StockService::current_stock_all(&ledger);
    assert_eq!(
        balances.get(&("Levadura".to_string(), Sector::Factory)),
        Some(&5.0)
    );
}

#[test]
fn stock_index_matches_full_replay() {
    let mut ledger = Ledger::default();
    let clock = clock();
    let steps = [
        ("Harina", OperationKind::Entry, 100.0, Sector::Mill),
        ("Harina", OperationKind::Exit, 25.0, Sector::Mill),
        ("Sal", OperationKind::Entry, 8.0, Sector::Dispatch),
        ("Harina", OperationKind::Entry, 50.0, Sector::Factory),
        ("Sal", OperationKind::Exit, 3.0, Sector::Dispatch),
    ];

    let mut index = StockIndex::default();
    for (product, kind, quantity, sector) in steps {
        let movement =
            MovementService::register(&mut ledger, draft(product, kind, quantity, sector), &clock)
                .expect("register");
        index.apply(&movement);
        // Incremental index and full replay agree after every append.
        assert_eq!(index.balances(), &StockService::current_stock_all(&ledger));
    }

    let rebuilt = StockIndex::build(&ledger);
    assert_eq!(rebuilt.balances(), index.balances());
    assert_eq!(index.balance("Harina", Sector::Mill), 75.0);
    assert_eq!(index.balance("Desconocido", Sector::Mill), 0.0);
}

#[test]
fn transfer_appends_a_balanced_pair() {
    let mut ledger = Ledger::default();
    MovementService::register(
        &mut ledger,
        draft("Harina", OperationKind::Entry, 100.0, Sector::Mill),
        &clock(),
    )
    .expect("seed entry");

    MovementService::transfer(
        &mut ledger,
        "Harina",
        30.0,
        Sector::Mill,
        Sector::Dispatch,
        &clock(),
    )
    .expect("transfer");

    assert_eq!(ledger.len(), 3);
    assert_eq!(
        StockService::current_stock(&ledger, "Harina", Sector::Mill),
        70.0
    );
    assert_eq!(
        StockService::current_stock(&ledger, "Harina", Sector::Dispatch),
        30.0
    );
    // The pair shares one timestamp and moves no net stock.
    assert_eq!(
        ledger.movements[1].recorded_at,
        ledger.movements[2].recorded_at
    );
    let total: f64 = StockService::current_stock_all(&ledger).values().sum();
    assert_eq!(total, 100.0);
}

#[test]
fn transfer_rejects_same_sector_and_bad_quantities() {
    let mut ledger = Ledger::default();

    let err = MovementService::transfer(
        &mut ledger,
        "Harina",
        10.0,
        Sector::Mill,
        Sector::Mill,
        &clock(),
    )
    .unwrap_err();
    assert_eq!(err, ValidationError::SameSectorTransfer);

    let err = MovementService::transfer(
        &mut ledger,
        "Harina",
        0.0,
        Sector::Mill,
        Sector::Dispatch,
        &clock(),
    )
    .unwrap_err();
    assert!(matches!(err, ValidationError::NonPositiveQuantity(_)));

    assert!(ledger.is_empty(), "rejected transfers must not append");
}
