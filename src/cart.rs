//! Cart

use std::num::NonZeroU32;

use crate::products::ProductId;

/// Units of one product held in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    product_id: ProductId,
    quantity: NonZeroU32,
}

impl CartLine {
    /// Create a cart line for the given product.
    pub fn new(product_id: ProductId, quantity: NonZeroU32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }

    /// The product this line holds.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Units held, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }
}

/// Cart
///
/// Holds at most one line per product, in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add units of a product, merging with its existing line if there is one.
    ///
    /// Returns the line as it stands after the merge, or `None` without changing
    /// anything when the merged quantity would not fit in a line.
    pub fn add(&mut self, product_id: ProductId, quantity: NonZeroU32) -> Option<CartLine> {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = line.quantity.checked_add(quantity.get())?;

            return Some(*line);
        }

        let line = CartLine::new(product_id, quantity);

        self.lines.push(line);

        Some(line)
    }

    /// Look up the line for a product.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
    }

    /// Iterate over the cart lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Total units across all lines.
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
