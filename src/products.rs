//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::Priced;

/// Stock level below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The identifier following this one, or `None` at the ceiling.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier, fixed once assigned
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Category used for filtering
    pub category: String,

    /// Display asset reference
    pub image: String,

    /// Unit price in the store currency
    pub price: Decimal,

    /// Units currently in stock
    pub quantity: u32,

    /// Customer rating between 0 and 5
    pub rating: Decimal,

    /// Product description
    pub description: String,

    /// Product specification
    pub specification: String,
}

impl Product {
    /// Builds a product from validated details and an assigned id.
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            category: new.category,
            image: new.image,
            price: new.price,
            quantity: new.quantity,
            rating: new.rating,
            description: new.description,
            specification: new.specification,
        }
    }

    /// Price multiplied by the units in stock.
    pub fn subtotal(&self) -> Decimal {
        Priced::subtotal(self)
    }

    /// Whether stock has dropped below [`LOW_STOCK_THRESHOLD`].
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }
}

impl Priced for Product {
    fn unit_price(&self) -> Decimal {
        self.price
    }

    fn units(&self) -> u32 {
        self.quantity
    }
}

/// Validated product details that have not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Product name
    pub name: String,

    /// Category used for filtering
    pub category: String,

    /// Display asset reference
    pub image: String,

    /// Unit price, never negative
    pub price: Decimal,

    /// Initial stock
    pub quantity: u32,

    /// Rating between 0 and 5
    pub rating: Decimal,

    /// Product description
    pub description: String,

    /// Product specification
    pub specification: String,
}
