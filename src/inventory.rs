//! Inventory and cart
//!
//! [`InventoryCart`] owns the product list and the cart. Every mutation goes
//! through `&mut self` and either applies completely or leaves both collections
//! untouched.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartLine},
    catalog::{CategoryFilter, category_options, filter_by_category},
    pricing::{PricedLine, overall_total},
    products::{NewProduct, Product, ProductId},
    validation::{ProductForm, ValidationErrors},
};

/// Errors raised by inventory and cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// One or more add-product fields were missing or out of range.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// No product has the given id.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// Not enough stock to satisfy an add-to-cart request.
    #[error("product {product_id} is out of stock: requested {requested}, available {available}")]
    OutOfStock {
        /// Product the request was for
        product_id: ProductId,
        /// Units requested
        requested: u32,
        /// Units in stock, zero when the product does not exist
        available: u32,
    },

    /// The cart line for a product cannot hold any more units.
    #[error("cart line for product {product_id} is full: holds {in_cart}, requested {requested} more")]
    CartFull {
        /// Product the request was for
        product_id: ProductId,
        /// Units requested
        requested: u32,
        /// Units already in the cart
        in_cart: u32,
    },

    /// Two products were given the same id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// Every product id has been handed out.
    #[error("no product ids left to assign")]
    IdsExhausted,
}

/// Snapshot of the figures shown in the summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of products in the catalog
    pub product_count: usize,

    /// Value of all stock, `price * quantity` summed over every product
    pub overall_total: Decimal,

    /// Number of distinct products in the cart
    pub cart_lines: usize,

    /// Units held in the cart
    pub cart_units: u64,

    /// Value of the cart
    pub cart_total: Decimal,
}

/// Product list plus cart, with the operations that move stock between them.
#[derive(Debug, Clone)]
pub struct InventoryCart {
    products: Vec<Product>,
    cart: Cart,
    next_id: Option<ProductId>,
    currency: &'static Currency,
}

impl InventoryCart {
    /// Create a store seeded with the given products, priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>, currency: &'static Currency) -> Result<Self, InventoryError> {
        let mut seen = FxHashSet::default();

        for product in &products {
            if !seen.insert(product.id) {
                return Err(InventoryError::DuplicateId(product.id));
            }
        }

        let next_id = match products.iter().map(|product| product.id).max() {
            Some(highest) => highest.next(),
            None => Some(ProductId::new(1)),
        };

        info!(
            products = products.len(),
            currency = currency.iso_alpha_code,
            "inventory seeded"
        );

        Ok(Self {
            products,
            cart: Cart::new(),
            next_id,
            currency,
        })
    }

    /// Validate the add-product form and prepend the new product.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Validation`] with every failing field, leaving the
    /// product list unchanged.
    #[tracing::instrument(name = "inventory.add_product", skip(self, form), err(level = "warn"))]
    pub fn add_product(&mut self, form: &ProductForm) -> Result<Product, InventoryError> {
        let new = form.validate()?;

        self.insert_product(new)
    }

    /// Prepend already validated product details under a fresh id.
    fn insert_product(&mut self, new: NewProduct) -> Result<Product, InventoryError> {
        let id = self.next_id.ok_or(InventoryError::IdsExhausted)?;
        let product = Product::from_new(id, new);

        self.next_id = id.next();
        self.products.insert(0, product.clone());

        info!(product_id = %id, name = %product.name, "product added");

        Ok(product)
    }

    /// Change a product's stock by `delta`, clamping at zero.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if the product does not exist.
    #[tracing::instrument(name = "inventory.adjust_quantity", skip(self), err(level = "warn"))]
    pub fn adjust_quantity(
        &mut self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<Product, InventoryError> {
        let product = self
            .products
            .iter_mut()
            .find(|product| product.id == product_id)
            .ok_or(InventoryError::NotFound(product_id))?;

        let adjusted = i64::from(product.quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));

        product.quantity = u32::try_from(adjusted).unwrap_or(u32::MAX);

        debug!(quantity = product.quantity, "stock adjusted");

        Ok(product.clone())
    }

    /// Add one unit of stock.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if the product does not exist.
    pub fn increment(&mut self, product_id: ProductId) -> Result<Product, InventoryError> {
        self.adjust_quantity(product_id, 1)
    }

    /// Remove one unit of stock, stopping at zero.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if the product does not exist.
    pub fn decrement(&mut self, product_id: ProductId) -> Result<Product, InventoryError> {
        self.adjust_quantity(product_id, -1)
    }

    /// Move `requested` units from a product's stock into the cart.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::OutOfStock`] if the product does not exist or holds
    /// fewer than `requested` units, and [`InventoryError::CartFull`] if the cart line
    /// cannot take `requested` more. Neither stock nor cart changes on failure.
    #[tracing::instrument(name = "inventory.add_to_cart", skip(self), err(level = "warn"))]
    pub fn add_to_cart(
        &mut self,
        product_id: ProductId,
        requested: NonZeroU32,
    ) -> Result<CartLine, InventoryError> {
        let Some(product) = self
            .products
            .iter_mut()
            .find(|product| product.id == product_id)
        else {
            return Err(InventoryError::OutOfStock {
                product_id,
                requested: requested.get(),
                available: 0,
            });
        };

        let remaining = product.quantity.checked_sub(requested.get()).ok_or(
            InventoryError::OutOfStock {
                product_id,
                requested: requested.get(),
                available: product.quantity,
            },
        )?;

        let line = self
            .cart
            .add(product_id, requested)
            .ok_or_else(|| InventoryError::CartFull {
                product_id,
                requested: requested.get(),
                in_cart: self.cart.line(product_id).map_or(0, CartLine::quantity),
            })?;

        product.quantity = remaining;

        debug!(remaining, in_cart = line.quantity(), "stock moved into cart");

        Ok(line)
    }

    /// Move a single unit into the cart.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::OutOfStock`] if the product is missing or sold out.
    pub fn add_one_to_cart(&mut self, product_id: ProductId) -> Result<CartLine, InventoryError> {
        self.add_to_cart(product_id, NonZeroU32::MIN)
    }

    /// Look up a product by id.
    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.products
            .iter()
            .find(|product| product.id == product_id)
    }

    /// All products, newest additions first.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Currency prices are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Products in the selected category, in list order.
    pub fn filter_by_category(&self, filter: &CategoryFilter) -> Vec<&Product> {
        filter_by_category(&self.products, filter)
    }

    /// Category picker options for the current catalog.
    pub fn categories(&self) -> Vec<CategoryFilter> {
        category_options(&self.products)
    }

    /// Value of all stock.
    pub fn overall_total(&self) -> Decimal {
        overall_total(&self.products)
    }

    /// Value of the stock in the selected category.
    pub fn filtered_total(&self, filter: &CategoryFilter) -> Decimal {
        overall_total(self.filter_by_category(filter))
    }

    /// Cart lines paired with the product each one holds.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if a line refers to a missing product.
    pub fn cart_lines(&self) -> Result<Vec<(CartLine, &Product)>, InventoryError> {
        self.cart
            .iter()
            .map(|line| {
                self.product(line.product_id())
                    .map(|product| (*line, product))
                    .ok_or(InventoryError::NotFound(line.product_id()))
            })
            .collect()
    }

    /// Value of the cart at current product prices.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if a line refers to a missing product.
    pub fn cart_total(&self) -> Result<Decimal, InventoryError> {
        let lines = self.cart_lines()?;

        Ok(overall_total(lines.iter().map(|(line, product)| PricedLine {
            unit_price: product.price,
            units: line.quantity(),
        })))
    }

    /// Figures for the summary panel.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::NotFound`] if a cart line refers to a missing product.
    pub fn summary(&self) -> Result<Summary, InventoryError> {
        Ok(Summary {
            product_count: self.products.len(),
            overall_total: self.overall_total(),
            cart_lines: self.cart.len(),
            cart_units: self.cart.units(),
            cart_total: self.cart_total()?,
        })
    }
}
