//! Decimal money helpers and order-total computation.
//!
//! Prices move through the system as [`Decimal`] values so line math never
//! accumulates float error. Display amounts are rounded to two places with
//! midpoint-away-from-zero, matching conventional retail rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Items subtotal above which shipping is free.
const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping rate applied below the free-shipping threshold.
const FLAT_SHIPPING_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Sales tax rate (15%).
const TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Round a monetary amount to two decimal places.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derived price breakdown for an order.
///
/// Computed once at checkout from the frozen line items; the invariant
/// `total = items + shipping + tax` holds at two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of `price * qty` over all line items.
    pub items_price: Decimal,
    /// Flat rate, waived above the free-shipping threshold.
    pub shipping_price: Decimal,
    /// Tax on the items subtotal.
    pub tax_price: Decimal,
    /// Grand total.
    pub total_price: Decimal,
}

impl OrderTotals {
    /// Compute totals from `(unit price, quantity)` pairs.
    #[must_use]
    pub fn compute(lines: impl IntoIterator<Item = (Decimal, u32)>) -> Self {
        let items_price = round_money(
            lines
                .into_iter()
                .map(|(price, qty)| price * Decimal::from(qty))
                .sum(),
        );
        let shipping_price = if items_price > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING_RATE
        };
        let tax_price = round_money(items_price * TAX_RATE);
        let total_price = items_price + shipping_price + tax_price;

        Self {
            items_price,
            shipping_price,
            tax_price,
            total_price,
        }
    }
}
