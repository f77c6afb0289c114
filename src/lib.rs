//! Storefront
//!
//! Storefront is a product catalog and shopping cart engine. It keeps a product
//! list with stock levels, moves stock into a cart, filters the catalog by
//! category and reports the value of everything on the shelves.

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod inventory;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod report;
pub mod session;
pub mod validation;
