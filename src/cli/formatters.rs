//! Plain-text table rendering for stock and catalog listings.

use std::collections::BTreeMap;

use sauco_domain::{Catalog, Sector};

/// Formats a quantity without trailing noise: whole numbers drop the
/// decimals, everything else keeps two.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

pub fn stock_table(balances: &BTreeMap<(String, Sector), f64>) -> String {
    let mut product_width = "Product".len();
    for (product, _) in balances.keys() {
        product_width = product_width.max(product.chars().count());
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<product_width$}  {:<8}  {:>10}\n",
        "Product", "Sector", "Stock"
    ));
    for ((product, sector), balance) in balances {
        out.push_str(&format!(
            "{:<product_width$}  {:<8}  {:>10}\n",
            product,
            sector.label(),
            format_quantity(*balance)
        ));
    }
    out
}

pub fn catalog_table(catalog: &Catalog) -> String {
    let mut name_width = "Product".len();
    for product in &catalog.products {
        name_width = name_width.max(product.name.chars().count());
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "Product", "Units/bundle"
    ));
    for product in &catalog.products {
        let factor = product
            .units_per_bundle
            .map(format_quantity)
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{:<name_width$}  {factor:>12}\n", product.name));
    }
    out
}
