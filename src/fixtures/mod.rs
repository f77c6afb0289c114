//! Fixtures
//!
//! Seed data for the store, loaded from YAML files laid out as
//! `<base>/products/<name>.yml`. The default sample set is compiled in.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    inventory::{InventoryCart, InventoryError},
    products::{Product, ProductId},
};

pub mod products;

/// Name of the built-in sample product set.
pub const DEFAULT_SET: &str = "default";

const DEFAULT_PRODUCTS_YAML: &str = include_str!("../../fixtures/products/default.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Rating outside 0 to 5
    #[error("Product {0} has rating {1}, expected 0 to 5")]
    InvalidRating(ProductId, rust_decimal::Decimal),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Loaded products could not seed a store
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in fixture order
    products: Vec<Product>,

    /// Currency shared by every loaded product
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            currency: None,
        }
    }

    /// Load the built-in sample products.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded fixture is malformed.
    pub fn sample() -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products_yaml(DEFAULT_PRODUCTS_YAML)?;

        Ok(fixture)
    }

    /// Load a product set by name from `<base>/products/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));

        self.load_products_file(&file_path)
    }

    /// Load products from an explicit YAML file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products_file(&mut self, path: &Path) -> Result<&mut Self, FixtureError> {
        debug!(path = %path.display(), "loading products fixture");

        let contents = fs::read_to_string(path)?;

        self.load_products_yaml(&contents)
    }

    /// Load products from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a price or rating is invalid, or
    /// products are priced in different currencies.
    pub fn load_products_yaml(&mut self, yaml: &str) -> Result<&mut Self, FixtureError> {
        let fixture: products::ProductsFixture = serde_norway::from_str(yaml)?;

        let mut currency = self.currency;
        let mut loaded = Vec::with_capacity(fixture.products.len());

        for product_fixture in fixture.products {
            let (product, product_currency) = product_fixture.try_into_product()?;

            // Validate currency consistency
            match currency {
                Some(existing) if existing != product_currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        product_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(product_currency),
            }

            loaded.push(product);
        }

        self.currency = currency;
        self.products.extend(loaded);

        Ok(self)
    }

    /// Load a product set by name with the default base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?;

        Ok(fixture)
    }

    /// Get all loaded products
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Seed a store with the loaded products.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was loaded or two products share an id.
    pub fn inventory(&self) -> Result<InventoryCart, FixtureError> {
        Ok(InventoryCart::new(self.products.clone(), self.currency()?)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
