//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    catalog::{ALL_CATEGORIES, CategoryFilter},
    fixtures::{Fixture, FixtureError},
    inventory::{InventoryCart, InventoryError, Summary},
    pricing::{Priced, PricedLine, format_amount, overall_total},
    products::{LOW_STOCK_THRESHOLD, NewProduct, Product, ProductId},
    report::ReportError,
    session::{Action, Notice, Outcome, Script, Session, SessionError},
    validation::{FieldError, ProductField, ProductForm, ValidationErrors},
};
