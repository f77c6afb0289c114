//! Catalog filtering

use std::{convert::Infallible, fmt, str::FromStr};

use crate::products::Product;

/// Sentinel category name that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Category selection for the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every product
    #[default]
    All,

    /// Products whose category matches exactly
    Only(String),
}

impl CategoryFilter {
    /// Build a filter from a category name, treating `All` as the sentinel.
    pub fn new(category: impl Into<String>) -> Self {
        let category = category.into();

        if category == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(category)
        }
    }

    /// Whether a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }

    /// The name shown in a category picker.
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Products passing the filter, in their original order.
pub fn filter_by_category<'a>(products: &'a [Product], filter: &CategoryFilter) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .collect()
}

/// Picker options: `All` first, then each distinct category in first-seen order.
pub fn category_options(products: &[Product]) -> Vec<CategoryFilter> {
    let mut options = vec![CategoryFilter::All];

    for product in products {
        let option = CategoryFilter::new(product.category.as_str());

        if !options.contains(&option) {
            options.push(option);
        }
    }

    options
}
