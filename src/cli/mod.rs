pub mod commands;
pub mod formatters;
pub mod system_clock;

use std::path::Path;

use sauco_storage_xlsx::XlsxInventoryStorage;

use crate::{config::AppConfig, errors::AppError};
use system_clock::SystemClock;

/// Parses the command line and runs the requested operation against the
/// configured dataset. The storage handle is built here and passed down
/// explicitly; nothing else knows where the dataset lives.
pub fn run_cli() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::load_or_default()?;
    let storage = XlsxInventoryStorage::new(config.dataset_path());
    let clock = SystemClock;

    match args.first().map(String::as_str) {
        Some("stock") => commands::show_stock(&storage),
        Some("register") => commands::register_movement(&storage, &clock),
        Some("transfer") => commands::transfer(&storage, &clock),
        Some("catalog") => match args.get(1).map(String::as_str) {
            Some("show") => commands::show_catalog(&storage),
            Some("upload") => {
                let path = args.get(2).ok_or_else(|| {
                    AppError::Usage("usage: sauco catalog upload <file.xlsx>".to_string())
                })?;
                commands::upload_catalog(&storage, Path::new(path))
            }
            _ => Err(AppError::Usage(
                "usage: sauco catalog <show | upload FILE>".to_string(),
            )),
        },
        Some("help") | None => {
            print_usage();
            Ok(())
        }
        Some(other) => Err(AppError::Usage(format!(
            "unknown command `{other}`; run `sauco help`"
        ))),
    }
}

fn print_usage() {
    println!("sauco - inventory ledger over a two-sheet spreadsheet");
    println!();
    println!("Commands:");
    println!("  stock                        current stock per product and sector");
    println!("  register                     record a stock entry or exit");
    println!("  transfer                     move stock between two sectors");
    println!("  catalog show                 list the product catalog");
    println!("  catalog upload <file.xlsx>   replace the catalog, keeping history");
    println!("  help                         show this message");
}
