//! Product Fixtures

use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, PHP, USD};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Product, ProductId},
    validation::MAX_RATING,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u64,

    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Display asset reference
    #[serde(default)]
    pub image: String,

    /// Product price (e.g., "6999.00 PHP")
    pub price: String,

    /// Units in stock
    pub quantity: u32,

    /// Rating between 0 and 5
    pub rating: Decimal,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product specification
    #[serde(default)]
    pub specification: String,
}

impl ProductFixture {
    /// Convert into a product, returning the currency its price was given in.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed or the rating is out of range.
    pub fn try_into_product(self) -> Result<(Product, &'static Currency), FixtureError> {
        let id = ProductId::new(self.id);
        let (price, currency) = parse_price(&self.price)?;

        if self.rating < Decimal::ZERO || self.rating > MAX_RATING {
            return Err(FixtureError::InvalidRating(id, self.rating));
        }

        let product = Product {
            id,
            name: self.name,
            category: self.category,
            image: self.image,
            price,
            quantity: self.quantity,
            rating: self.rating,
            description: self.description,
            specification: self.specification,
        };

        Ok((product, currency))
    }
}

/// Parse price string (e.g., "6999.00 PHP") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount < Decimal::ZERO {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let currency = match *currency_code {
        "PHP" => PHP,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}
