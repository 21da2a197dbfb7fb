//! The user-facing operations: stock view, movement entry, transfers, and
//! catalog maintenance.

use std::path::Path;

use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use sauco_core::{
    CatalogService, Clock, Dataset, InventoryStorage, MovementDraft, MovementService, StockService,
};
use sauco_domain::{to_base_units, OperationKind, QuantityMode, Sector};

use crate::cli::formatters::{catalog_table, format_quantity, stock_table};
use crate::errors::AppError;

/// Loads the persisted dataset, degrading to an empty one with a visible
/// warning when the file cannot be read. A broken dataset must not make the
/// tool unusable.
fn load_dataset(storage: &dyn InventoryStorage) -> Dataset {
    match storage.load() {
        Ok(dataset) => dataset,
        Err(err) => {
            tracing::warn!(%err, "falling back to an empty dataset");
            eprintln!("{} {err}", "Warning:".yellow().bold());
            Dataset::default()
        }
    }
}

pub fn show_stock(storage: &dyn InventoryStorage) -> Result<(), AppError> {
    let dataset = load_dataset(storage);
    let balances = StockService::current_stock_all(&dataset.ledger);
    if balances.is_empty() {
        println!("No movements recorded yet.");
        return Ok(());
    }
    print!("{}", stock_table(&balances));
    Ok(())
}

pub fn show_catalog(storage: &dyn InventoryStorage) -> Result<(), AppError> {
    let dataset = load_dataset(storage);
    if dataset.catalog.is_empty() {
        println!("The catalog is empty. Load one with `sauco catalog upload <file.xlsx>`.");
        return Ok(());
    }
    print!("{}", catalog_table(&dataset.catalog));
    Ok(())
}

pub fn register_movement(
    storage: &dyn InventoryStorage,
    clock: &dyn Clock,
) -> Result<(), AppError> {
    let mut dataset = load_dataset(storage);
    if dataset.catalog.is_empty() {
        return Err(AppError::Input(
            "the catalog is empty; load one with `sauco catalog upload <file.xlsx>`".to_string(),
        ));
    }

    let names = dataset.catalog.sorted_names();
    let product_idx = Select::new()
        .with_prompt("Product")
        .items(&names)
        .default(0)
        .interact()?;
    let product = names[product_idx].clone();
    let factor = dataset.catalog.units_per_bundle(&product);

    let mode_idx = Select::new()
        .with_prompt("Quantity in")
        .items(&["Units / Kg", "Bundles"])
        .default(0)
        .interact()?;
    let mode = if mode_idx == 1 {
        QuantityMode::Bundles
    } else {
        QuantityMode::Units
    };
    let raw: f64 = Input::new().with_prompt("Quantity").interact_text()?;
    let quantity = to_base_units(raw, mode, factor);
    if mode == QuantityMode::Bundles {
        println!(
            "This will record {} base units.",
            format_quantity(quantity).bold()
        );
    }

    let kind_idx = Select::new()
        .with_prompt("Operation")
        .items(&[OperationKind::Entry.label(), OperationKind::Exit.label()])
        .default(0)
        .interact()?;
    let kind = OperationKind::ALL[kind_idx];

    let sector_labels: Vec<&str> = Sector::ALL.iter().map(Sector::label).collect();
    let sector_idx = Select::new()
        .with_prompt("Sector")
        .items(&sector_labels)
        .default(0)
        .interact()?;
    let sector = Sector::ALL[sector_idx];

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Record {} of {} x {} at {}?",
            kind,
            format_quantity(quantity),
            product,
            sector
        ))
        .default(true)
        .interact()?;
    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    let movement = MovementService::register(
        &mut dataset.ledger,
        MovementDraft {
            product,
            kind,
            quantity,
            sector,
        },
        clock,
    )?;
    storage.save(&dataset)?;
    println!(
        "{} Recorded {} base units of {} ({}, {}).",
        "OK".green().bold(),
        format_quantity(movement.quantity),
        movement.product,
        movement.kind,
        movement.sector
    );
    Ok(())
}

pub fn transfer(storage: &dyn InventoryStorage, clock: &dyn Clock) -> Result<(), AppError> {
    let mut dataset = load_dataset(storage);
    if dataset.catalog.is_empty() {
        return Err(AppError::Input(
            "the catalog is empty; load one with `sauco catalog upload <file.xlsx>`".to_string(),
        ));
    }

    let names = dataset.catalog.sorted_names();
    let product_idx = Select::new()
        .with_prompt("Product")
        .items(&names)
        .default(0)
        .interact()?;
    let product = names[product_idx].clone();

    let sector_labels: Vec<&str> = Sector::ALL.iter().map(Sector::label).collect();
    let from_idx = Select::new()
        .with_prompt("From sector")
        .items(&sector_labels)
        .default(0)
        .interact()?;
    let to_idx = Select::new()
        .with_prompt("To sector")
        .items(&sector_labels)
        .default(0)
        .interact()?;
    let (from, to) = (Sector::ALL[from_idx], Sector::ALL[to_idx]);

    let quantity: f64 = Input::new().with_prompt("Quantity (base units)").interact_text()?;
    let on_hand = StockService::current_stock(&dataset.ledger, &product, from);
    if quantity > on_hand {
        println!(
            "{} {} only holds {} of {}; the balance there will go negative.",
            "Note:".yellow().bold(),
            from,
            format_quantity(on_hand),
            product
        );
    }

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Move {} x {} from {} to {}?",
            format_quantity(quantity),
            product,
            from,
            to
        ))
        .default(true)
        .interact()?;
    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    MovementService::transfer(&mut dataset.ledger, &product, quantity, from, to, clock)?;
    storage.save(&dataset)?;
    println!(
        "{} Moved {} x {} from {} to {}.",
        "OK".green().bold(),
        format_quantity(quantity),
        product,
        from,
        to
    );
    Ok(())
}

pub fn upload_catalog(storage: &dyn InventoryStorage, path: &Path) -> Result<(), AppError> {
    let mut dataset = load_dataset(storage);
    let upload = storage.read_catalog_upload(path)?;
    CatalogService::replace(&mut dataset, upload)?;
    storage.save(&dataset)?;
    println!(
        "{} Catalog updated ({} products); movement history untouched.",
        "OK".green().bold(),
        dataset.catalog.len()
    );
    Ok(())
}
