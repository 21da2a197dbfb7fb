//! Two-sheet xlsx persistence for the inventory dataset.
//!
//! The catalog lives in a `Catalogo` sheet and the movement ledger in a
//! `Movimientos` sheet of a single workbook. Saves write a temp file next to
//! the destination and rename it into place, so readers never observe a
//! partial rewrite.

use std::{
    fs,
    io::{self, Read, Seek},
    path::{Path, PathBuf},
};

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::{NaiveDateTime, Timelike};
use rust_xlsxwriter::Workbook;

use sauco_core::{CatalogUpload, Dataset, InventoryStorage, StoreError, PRODUCT_COLUMN};
use sauco_domain::{Catalog, Ledger, Movement, OperationKind, Product, Sector};

const CATALOG_SHEET: &str = "Catalogo";
const LEDGER_SHEET: &str = "Movimientos";
const UNITS_PER_BUNDLE_COLUMN: &str = "Unidades_Fardo";
const DATE_COLUMN: &str = "Fecha";
const KIND_COLUMN: &str = "Tipo";
const QUANTITY_COLUMN: &str = "Cantidad";
const SECTOR_COLUMN: &str = "Sector";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed xlsx persistence for the catalog and movement sheets.
#[derive(Debug, Clone)]
pub struct XlsxInventoryStorage {
    path: PathBuf,
}

impl XlsxInventoryStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventoryStorage for XlsxInventoryStorage {
    fn load(&self) -> Result<Dataset, StoreError> {
        if !self.path.exists() {
            return Ok(Dataset::default());
        }
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(corrupt)?;
        let catalog = read_catalog_sheet(&mut workbook)?;
        let ledger = read_ledger_sheet(&mut workbook)?;
        Ok(Dataset { catalog, ledger })
    }

    fn save(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let tmp = tmp_path(&self.path);
        write_workbook(dataset, &tmp)?;
        fs::rename(&tmp, &self.path).map_err(|err| {
            let _ = fs::remove_file(&tmp);
            classify_write_error(&err)
        })
    }

    fn read_catalog_upload(&self, path: &Path) -> Result<CatalogUpload, StoreError> {
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(corrupt)?;
        let sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| StoreError::Corrupt("the workbook has no sheets".to_string()))?;
        let range = workbook.worksheet_range(&sheet).map_err(corrupt)?;
        Ok(parse_catalog_range(&range))
    }
}

fn read_catalog_sheet<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> Result<Catalog, StoreError> {
    let range = workbook.worksheet_range(CATALOG_SHEET).map_err(corrupt)?;
    Ok(Catalog::new(parse_catalog_range(&range).products))
}

fn parse_catalog_range(range: &Range<Data>) -> CatalogUpload {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return CatalogUpload::default();
    };
    let columns: Vec<String> = header
        .iter()
        .map(|cell| cell_string(cell).unwrap_or_default())
        .collect();
    let product_col = columns.iter().position(|column| column == PRODUCT_COLUMN);
    let factor_col = columns
        .iter()
        .position(|column| column == UNITS_PER_BUNDLE_COLUMN);

    let mut products = Vec::new();
    if let Some(product_col) = product_col {
        for row in rows {
            let Some(name) = row.get(product_col).and_then(cell_string) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let factor = match factor_col.and_then(|col| row.get(col)).and_then(cell_number) {
                Some(factor) if factor > 0.0 => Some(factor),
                Some(factor) => {
                    tracing::warn!(
                        product = %name,
                        factor,
                        "ignoring non-positive units-per-bundle value"
                    );
                    None
                }
                None => None,
            };
            products.push(Product {
                name,
                units_per_bundle: factor,
            });
        }
    }
    CatalogUpload { columns, products }
}

fn read_ledger_sheet<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> Result<Ledger, StoreError> {
    let range = workbook.worksheet_range(LEDGER_SHEET).map_err(corrupt)?;
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Ledger::default());
    };
    let columns: Vec<String> = header
        .iter()
        .map(|cell| cell_string(cell).unwrap_or_default())
        .collect();
    let column = |name: &str| {
        columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| {
                StoreError::Corrupt(format!("sheet `{LEDGER_SHEET}` is missing column `{name}`"))
            })
    };
    let date_col = column(DATE_COLUMN)?;
    let product_col = column(PRODUCT_COLUMN)?;
    let kind_col = column(KIND_COLUMN)?;
    let quantity_col = column(QUANTITY_COLUMN)?;
    let sector_col = column(SECTOR_COLUMN)?;

    let mut movements = Vec::new();
    for (offset, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let movement = parse_movement_row(row, date_col, product_col, kind_col, quantity_col, sector_col)
            .map_err(|reason| {
                // +2: one for the header, one for 1-based spreadsheet rows.
                StoreError::Corrupt(format!(
                    "sheet `{LEDGER_SHEET}` row {}: {reason}",
                    offset + 2
                ))
            })?;
        movements.push(movement);
    }
    Ok(Ledger::new(movements))
}

fn parse_movement_row(
    row: &[Data],
    date_col: usize,
    product_col: usize,
    kind_col: usize,
    quantity_col: usize,
    sector_col: usize,
) -> Result<Movement, String> {
    let text = |col: usize, name: &str| {
        row.get(col)
            .and_then(cell_string)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format!("missing `{name}`"))
    };

    let recorded_at = row
        .get(date_col)
        .and_then(cell_datetime)
        .ok_or_else(|| format!("bad or missing `{DATE_COLUMN}`"))?;
    let product = text(product_col, PRODUCT_COLUMN)?;
    let kind: OperationKind = text(kind_col, KIND_COLUMN)?
        .parse()
        .map_err(|err: sauco_domain::UnknownOperation| err.to_string())?;
    let quantity = row
        .get(quantity_col)
        .and_then(cell_number)
        .ok_or_else(|| format!("bad or missing `{QUANTITY_COLUMN}`"))?;
    let sector: Sector = text(sector_col, SECTOR_COLUMN)?
        .parse()
        .map_err(|err: sauco_domain::UnknownSector| err.to_string())?;

    Ok(Movement {
        recorded_at,
        product,
        kind,
        quantity,
        sector,
    })
}

fn write_workbook(dataset: &Dataset, path: &Path) -> Result<(), StoreError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(CATALOG_SHEET).map_err(write_failed)?;
    sheet.write_string(0, 0, PRODUCT_COLUMN).map_err(write_failed)?;
    sheet
        .write_string(0, 1, UNITS_PER_BUNDLE_COLUMN)
        .map_err(write_failed)?;
    for (offset, product) in dataset.catalog.products.iter().enumerate() {
        let row = (offset + 1) as u32;
        sheet.write_string(row, 0, &product.name).map_err(write_failed)?;
        if let Some(factor) = product.units_per_bundle {
            sheet.write_number(row, 1, factor).map_err(write_failed)?;
        }
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(LEDGER_SHEET).map_err(write_failed)?;
    for (col, name) in [
        DATE_COLUMN,
        PRODUCT_COLUMN,
        KIND_COLUMN,
        QUANTITY_COLUMN,
        SECTOR_COLUMN,
    ]
    .into_iter()
    .enumerate()
    {
        sheet.write_string(0, col as u16, name).map_err(write_failed)?;
    }
    for (offset, movement) in dataset.ledger.movements.iter().enumerate() {
        let row = (offset + 1) as u32;
        let stamp = movement
            .recorded_at
            .format(Movement::TIMESTAMP_FORMAT)
            .to_string();
        sheet.write_string(row, 0, stamp).map_err(write_failed)?;
        sheet
            .write_string(row, 1, &movement.product)
            .map_err(write_failed)?;
        sheet
            .write_string(row, 2, movement.kind.label())
            .map_err(write_failed)?;
        sheet
            .write_number(row, 3, movement.quantity)
            .map_err(write_failed)?;
        sheet
            .write_string(row, 4, movement.sector.label())
            .map_err(write_failed)?;
    }

    workbook.save(path).map_err(write_failed)
}

fn cell_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(value) => Some(value.trim().to_string()),
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(value.to_string()),
        Data::DateTimeIso(value) => Some(value.clone()),
        _ => None,
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(value) => Some(*value),
        Data::Int(value) => Some(*value as f64),
        Data::String(value) => value.trim().parse().ok(),
        _ => None,
    }
}

fn cell_datetime(cell: &Data) -> Option<NaiveDateTime> {
    let parsed = match cell {
        Data::String(value) => {
            NaiveDateTime::parse_from_str(value.trim(), Movement::TIMESTAMP_FORMAT).ok()
        }
        // Spreadsheet editors sometimes coerce the column to a real date.
        Data::DateTime(value) => value.as_datetime(),
        _ => None,
    }?;
    parsed
        .with_second(0)
        .and_then(|stamp| stamp.with_nanosecond(0))
}

/// A workbook held open elsewhere (Excel keeps a write lock on open files)
/// surfaces as a sharing violation or permission failure on the final
/// rename. Those map to `Locked`; everything else is generic I/O.
fn classify_write_error(err: &io::Error) -> StoreError {
    // Windows sharing/lock violation codes.
    const SHARING_VIOLATION: i32 = 32;
    const LOCK_VIOLATION: i32 = 33;
    let os_locked = matches!(
        err.raw_os_error(),
        Some(SHARING_VIOLATION) | Some(LOCK_VIOLATION)
    );
    if os_locked || err.kind() == io::ErrorKind::PermissionDenied {
        StoreError::Locked
    } else {
        StoreError::Io(err.to_string())
    }
}

fn corrupt(err: impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(err.to_string())
}

fn write_failed(err: rust_xlsxwriter::XlsxError) -> StoreError {
    StoreError::Io(err.to_string())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
