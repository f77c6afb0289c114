//! Scripted sessions
//!
//! A session replays user events (button presses, form submissions, category
//! picks) against a store, one at a time. A rejected event becomes a notice and
//! the session carries on with the next one.

use std::{fmt, fs, num::NonZeroU32, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::CartLine,
    catalog::CategoryFilter,
    inventory::{InventoryCart, InventoryError},
    products::{Product, ProductId},
    validation::ProductForm,
};

/// Errors reading a session script.
#[derive(Debug, Error)]
pub enum SessionError {
    /// IO error reading the script
    #[error("Failed to read session script: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse session script: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// A single user event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// The `+` button on a product card
    Increment {
        /// Target product
        product: ProductId,
    },

    /// The `-` button on a product card
    Decrement {
        /// Target product
        product: ProductId,
    },

    /// Direct stock correction
    Adjust {
        /// Target product
        product: ProductId,
        /// Units to add, negative to remove
        delta: i64,
    },

    /// The add-to-cart button
    AddToCart {
        /// Target product
        product: ProductId,
        /// Units to move into the cart
        #[serde(default = "one")]
        quantity: NonZeroU32,
    },

    /// Submission of the add-product form
    AddProduct(ProductForm),

    /// Selection in the category picker
    Filter {
        /// Category name, `All` for everything
        category: String,
    },
}

fn one() -> NonZeroU32 {
    NonZeroU32::MIN
}

/// What an accepted event changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A product's stock changed
    Adjusted(Product),

    /// Stock moved into the cart
    AddedToCart(CartLine),

    /// A new product was listed
    ProductAdded(Product),

    /// The category selection changed
    Filtered(CategoryFilter),
}

/// A rejected event, kept for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// Position of the event in the script, starting at 1
    pub step: usize,

    /// Why it was rejected
    pub error: InventoryError,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}: {}", self.step, self.error)
    }
}

/// A list of events to replay.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    /// Events in the order they happen
    pub actions: Vec<Action>,
}

impl Script {
    /// Parse a script from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not describe a list of actions.
    pub fn from_yaml(yaml: &str) -> Result<Self, SessionError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read a script from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }
}

/// A store plus the current category selection.
#[derive(Debug, Clone)]
pub struct Session {
    inventory: InventoryCart,
    filter: CategoryFilter,
}

impl Session {
    /// Start a session showing every category.
    pub fn new(inventory: InventoryCart) -> Self {
        Self {
            inventory,
            filter: CategoryFilter::All,
        }
    }

    /// Handle one event to completion.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the event is rejected; nothing changes in that case.
    pub fn apply(&mut self, action: &Action) -> Result<Outcome, InventoryError> {
        match action {
            Action::Increment { product } => {
                self.inventory.increment(*product).map(Outcome::Adjusted)
            }
            Action::Decrement { product } => {
                self.inventory.decrement(*product).map(Outcome::Adjusted)
            }
            Action::Adjust { product, delta } => self
                .inventory
                .adjust_quantity(*product, *delta)
                .map(Outcome::Adjusted),
            Action::AddToCart { product, quantity } => self
                .inventory
                .add_to_cart(*product, *quantity)
                .map(Outcome::AddedToCart),
            Action::AddProduct(form) => self
                .inventory
                .add_product(form)
                .map(Outcome::ProductAdded),
            Action::Filter { category } => {
                self.filter = CategoryFilter::new(category.as_str());

                Ok(Outcome::Filtered(self.filter.clone()))
            }
        }
    }

    /// Replay a script, collecting a notice for every rejected event.
    pub fn run(&mut self, script: &Script) -> Vec<Notice> {
        let mut notices = Vec::new();

        for (idx, action) in script.actions.iter().enumerate() {
            let step = idx + 1;

            match self.apply(action) {
                Ok(outcome) => info!(step, ?outcome, "action applied"),
                Err(error) => {
                    warn!(step, %error, "action rejected");
                    notices.push(Notice { step, error });
                }
            }
        }

        notices
    }

    /// The store.
    pub fn inventory(&self) -> &InventoryCart {
        &self.inventory
    }

    /// The current category selection.
    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Products visible under the current selection.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.inventory.filter_by_category(&self.filter)
    }

    /// End the session, handing back the store.
    pub fn into_inventory(self) -> InventoryCart {
        self.inventory
    }
}
