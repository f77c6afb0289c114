//! Report
//!
//! Terminal rendering of the store: the product overview table, the product
//! grid for the selected category, product details, the cart and the summary.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::CategoryFilter,
    inventory::{InventoryCart, InventoryError, Summary},
    pricing::{Priced, PricedLine, format_amount},
    products::Product,
    session::Notice,
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The store could not produce the figures to show.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Writes every product with its stock value, regardless of the selected category.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_overview(out: &mut impl io::Write, inventory: &InventoryCart) -> Result<(), ReportError> {
    let currency = inventory.currency();
    let mut builder = Builder::default();

    builder.push_record([
        "ID".to_string(),
        "Product".to_string(),
        "Price".to_string(),
        "Qty".to_string(),
        "Subtotal".to_string(),
    ]);

    for product in inventory.products() {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            format_amount(product.price, currency),
            product.quantity.to_string(),
            format_amount(product.subtotal(), currency),
        ]);
    }

    let mut table = builder.build();

    style(&mut table, 2..5);

    writeln!(out, "\nProduct Overview\n{table}")?;

    Ok(())
}

/// Writes the products visible under `filter`, flagging those running low.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_product_grid(
    out: &mut impl io::Write,
    inventory: &InventoryCart,
    filter: &CategoryFilter,
) -> Result<(), ReportError> {
    let currency = inventory.currency();
    let products = inventory.filter_by_category(filter);

    writeln!(out, "\nAvailable Products ({filter})")?;

    if products.is_empty() {
        writeln!(out, "No products in this category.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record([
        "ID".to_string(),
        "Product".to_string(),
        "Category".to_string(),
        "Rating".to_string(),
        "Price".to_string(),
        "Qty".to_string(),
        "Subtotal".to_string(),
        String::new(),
    ]);

    let mut low_stock_rows = Vec::new();

    for (idx, product) in products.iter().enumerate() {
        if product.is_low_stock() {
            low_stock_rows.push(idx + 1); // header is row 0
        }

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            product.rating.to_string(),
            format_amount(product.price, currency),
            product.quantity.to_string(),
            format_amount(product.subtotal(), currency),
            if product.is_low_stock() {
                "low stock".to_string()
            } else {
                String::new()
            },
        ]);
    }

    let mut table = builder.build();

    style(&mut table, 3..7);

    for row in low_stock_rows {
        table.modify((row, 5), Color::FG_RED);
    }

    writeln!(out, "{table}")?;

    Ok(())
}

/// Writes the detail view of a single product.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_product_detail(
    out: &mut impl io::Write,
    product: &Product,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    writeln!(out, "\n{}", product.name)?;
    writeln!(
        out,
        "Category: {} | Rating: {}",
        product.category, product.rating
    )?;
    writeln!(out, "Image: {}", product.image)?;
    writeln!(out, "{}", product.description)?;
    writeln!(out, "Specification: {}", product.specification)?;
    writeln!(out, "Price: {}", format_amount(product.price, currency))?;
    writeln!(out, "In stock: {}", product.quantity)?;

    Ok(())
}

/// Writes the category picker options, marking the current selection.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_categories(
    out: &mut impl io::Write,
    options: &[CategoryFilter],
    selected: &CategoryFilter,
) -> Result<(), ReportError> {
    for option in options {
        let marker = if option == selected { '*' } else { ' ' };

        writeln!(out, "{marker} {option}")?;
    }

    Ok(())
}

/// Writes the cart lines priced at current product prices.
///
/// # Errors
///
/// Returns an error if a cart line has no product or the output cannot be written.
pub fn write_cart(out: &mut impl io::Write, inventory: &InventoryCart) -> Result<(), ReportError> {
    let currency = inventory.currency();
    let lines = inventory.cart_lines()?;

    writeln!(out, "\nCart")?;

    if lines.is_empty() {
        writeln!(out, "The cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record([
        "Product".to_string(),
        "Price".to_string(),
        "Qty".to_string(),
        "Subtotal".to_string(),
    ]);

    for (line, product) in &lines {
        builder.push_record([
            product.name.clone(),
            format_amount(product.price, currency),
            line.quantity().to_string(),
            format_amount(
                PricedLine {
                    unit_price: product.price,
                    units: line.quantity(),
                }
                .subtotal(),
                currency,
            ),
        ]);
    }

    let mut table = builder.build();

    style(&mut table, 1..4);

    writeln!(out, "{table}")?;
    writeln!(out, "Cart Total: {}", format_amount(inventory.cart_total()?, currency))?;

    Ok(())
}

/// Writes the summary panel.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_summary(
    out: &mut impl io::Write,
    summary: &Summary,
    currency: &'static Currency,
) -> Result<(), ReportError> {
    writeln!(out, "\nSummary")?;
    writeln!(out, "Total Products: {}", summary.product_count)?;
    writeln!(
        out,
        "Overall Total: {}",
        format_amount(summary.overall_total, currency)
    )?;
    writeln!(
        out,
        "In Cart: {} item(s), {} unit(s), {}",
        summary.cart_lines,
        summary.cart_units,
        format_amount(summary.cart_total, currency)
    )?;

    Ok(())
}

/// Writes rejected actions, one per line.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_notices(out: &mut impl io::Write, notices: &[Notice]) -> Result<(), ReportError> {
    for notice in notices {
        writeln!(out, "! {notice}")?;
    }

    Ok(())
}

fn style(table: &mut Table, numeric: std::ops::Range<usize>) {
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric), Alignment::right());
}
