//! Property tests for stock totals and quantity adjustments

use std::num::NonZeroU32;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rusty_money::iso::PHP;

use storefront::{
    inventory::InventoryCart,
    pricing::{PricedLine, overall_total},
    products::{Product, ProductId},
};

fn product(id: u64, price_minor: i64, quantity: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        category: "Misc".to_string(),
        image: String::new(),
        price: Decimal::new(price_minor, 2),
        quantity,
        rating: Decimal::ZERO,
        description: String::new(),
        specification: String::new(),
    }
}

fn store(products: Vec<Product>) -> Result<InventoryCart, TestCaseError> {
    InventoryCart::new(products, PHP).map_err(|err| TestCaseError::fail(err.to_string()))
}

fn lines_and_shuffle() -> impl Strategy<Value = (Vec<(i64, u32)>, Vec<(i64, u32)>)> {
    prop::collection::vec((0_i64..10_000_000, 0_u32..10_000), 0..24)
        .prop_flat_map(|lines| (Just(lines.clone()), Just(lines).prop_shuffle()))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: the stock value does not depend on product order.
    #[test]
    fn overall_total_ignores_order((lines, shuffled) in lines_and_shuffle()) {
        let total = |lines: &[(i64, u32)]| {
            overall_total(lines.iter().map(|&(price, units)| PricedLine {
                unit_price: Decimal::new(price, 2),
                units,
            }))
        };

        prop_assert_eq!(total(&lines), total(&shuffled));
    }

    /// Property: the store total equals the sum of product subtotals.
    #[test]
    fn store_total_matches_subtotals(lines in prop::collection::vec((0_i64..10_000_000, 0_u32..10_000), 0..24)) {
        let products: Vec<Product> = lines
            .iter()
            .zip(1_u64..)
            .map(|(&(price, quantity), id)| product(id, price, quantity))
            .collect();

        let expected = products
            .iter()
            .fold(Decimal::ZERO, |sum, p| sum + p.price * Decimal::from(p.quantity));

        prop_assert_eq!(store(products)?.overall_total(), expected);
    }

    /// Property: adjusting stock never goes below zero.
    #[test]
    fn adjust_quantity_clamps_at_zero(quantity in 0_u32..100_000, delta in -1_000_000_i64..1_000_000) {
        let mut store = store(vec![product(1, 100, quantity)])?;

        let adjusted = store
            .adjust_quantity(ProductId::new(1), delta)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        let expected = (i64::from(quantity) + delta).max(0);

        prop_assert_eq!(i64::from(adjusted.quantity), expected);
    }

    /// Property: add-to-cart moves units without creating or losing any.
    #[test]
    fn add_to_cart_conserves_units(quantity in 0_u32..50, requests in prop::collection::vec(1_u32..20, 0..10)) {
        let mut store = store(vec![product(1, 100, quantity)])?;

        for requested in requests.into_iter().filter_map(NonZeroU32::new) {
            let before = store.product(ProductId::new(1)).map(|p| p.quantity);
            let result = store.add_to_cart(ProductId::new(1), requested);

            if before < Some(requested.get()) {
                prop_assert!(result.is_err());
                prop_assert_eq!(store.product(ProductId::new(1)).map(|p| p.quantity), before);
            } else {
                prop_assert!(result.is_ok());
            }

            let in_stock = store.product(ProductId::new(1)).map_or(0, |p| u64::from(p.quantity));

            prop_assert_eq!(in_stock + store.cart().units(), u64::from(quantity));
        }
    }
}
