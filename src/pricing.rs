//! Pricing

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

/// Anything with a unit price and a unit count.
pub trait Priced {
    /// Price of a single unit
    fn unit_price(&self) -> Decimal;

    /// Number of units
    fn units(&self) -> u32;

    /// Unit price multiplied by the number of units.
    fn subtotal(&self) -> Decimal {
        self.unit_price().saturating_mul(Decimal::from(self.units()))
    }
}

impl<T: Priced + ?Sized> Priced for &T {
    fn unit_price(&self) -> Decimal {
        (**self).unit_price()
    }

    fn units(&self) -> u32 {
        (**self).units()
    }
}

/// A unit price paired with a unit count, used to price cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    /// Price of a single unit
    pub unit_price: Decimal,

    /// Number of units
    pub units: u32,
}

impl Priced for PricedLine {
    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn units(&self) -> u32 {
        self.units
    }
}

/// Sums `price * quantity` over a collection.
///
/// Amounts are not rounded while accumulating and saturate rather than overflow.
pub fn overall_total<I>(lines: I) -> Decimal
where
    I: IntoIterator,
    I::Item: Priced,
{
    lines
        .into_iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.subtotal()))
}

/// Formats an amount for display in the given currency, e.g. `₱6,999.00`.
///
/// Amounts too large for minor units fall back to a plain `AMOUNT CODE` rendering.
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .map_or_else(
            || format!("{:.2} {}", amount.round_dp(2), currency.iso_alpha_code),
            |minor_units| Money::from_minor(minor_units, currency).to_string(),
        )
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    fn line(unit_price: i64, units: u32) -> PricedLine {
        PricedLine {
            unit_price: Decimal::from(unit_price),
            units,
        }
    }

    #[test]
    fn overall_total_sums_subtotals() {
        let lines = [line(100, 2), line(50, 3), line(7, 0)];

        assert_eq!(overall_total(&lines), Decimal::from(350));
    }

    #[test]
    fn overall_total_of_nothing_is_zero() {
        let lines: [PricedLine; 0] = [];

        assert_eq!(overall_total(lines), Decimal::ZERO);
    }

    #[test]
    fn overall_total_keeps_fractional_cents() {
        let lines = [PricedLine {
            unit_price: Decimal::new(3333, 3),
            units: 3,
        }];

        assert_eq!(overall_total(lines), Decimal::new(9999, 3));
    }

    #[test]
    fn overall_total_saturates() {
        let lines = [
            PricedLine {
                unit_price: Decimal::MAX,
                units: 2,
            },
            line(1, 1),
        ];

        assert_eq!(overall_total(lines), Decimal::MAX);
    }

    #[test]
    fn format_amount_uses_currency_display() {
        let formatted = format_amount(Decimal::new(69_990, 1), iso::PHP);

        assert!(formatted.contains("999"), "unexpected format: {formatted}");
        assert!(!formatted.contains("PHP"), "unexpected fallback: {formatted}");
    }

    #[test]
    fn format_amount_falls_back_when_too_large() {
        let formatted = format_amount(Decimal::MAX, iso::PHP);

        assert!(formatted.ends_with(" PHP"), "unexpected format: {formatted}");
    }
}
