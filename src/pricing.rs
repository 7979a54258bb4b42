//! Cart and order pricing.
//!
//! One pure function used both by `POST /api/cart/summary` and by the order repository
//! when an order is created, so the totals a customer sees are the totals stored.

use serde::Serialize;

/// Shipping and tax parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRules {
    /// Discounted subtotals strictly above this ship for free.
    pub shipping_threshold: f64,
    pub shipping_fee: f64,
    /// Fraction of the undiscounted subtotal, e.g. `0.15`.
    pub tax_rate: f64,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            shipping_threshold: 100.0,
            shipping_fee: 10.0,
            tax_rate: 0.15,
        }
    }
}

/// A priced cart line. `discount` is a percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLine {
    pub price: f64,
    pub quantity: u32,
    pub discount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartSummary {
    pub items_price: f64,
    pub discounted_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,
}

/// Rounds to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Converts an amount to integer minor units for the payment gateway.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn summarize(lines: &[PriceLine], rules: &PricingRules) -> CartSummary {
    let items_price: f64 = lines
        .iter()
        .map(|l| l.price * f64::from(l.quantity))
        .sum();
    let discounted_price: f64 = lines
        .iter()
        .map(|l| (l.price - l.price * l.discount / 100.0) * f64::from(l.quantity))
        .sum();

    let shipping_price = if lines.is_empty() || discounted_price > rules.shipping_threshold {
        0.0
    } else {
        rules.shipping_fee
    };
    let tax_price = rules.tax_rate * items_price;

    let discounted_price = round_cents(discounted_price);
    let shipping_price = round_cents(shipping_price);
    let tax_price = round_cents(tax_price);

    CartSummary {
        items_price: round_cents(items_price),
        discounted_price,
        shipping_price,
        tax_price,
        total_price: round_cents(discounted_price + shipping_price + tax_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: u32, discount: f64) -> PriceLine {
        PriceLine {
            price,
            quantity,
            discount,
        }
    }

    #[test]
    fn test_discounted_cart_above_threshold() {
        let summary = summarize(&[line(100.0, 2, 10.0)], &PricingRules::default());
        assert_eq!(summary.items_price, 200.0);
        assert_eq!(summary.discounted_price, 180.0);
        assert_eq!(summary.shipping_price, 0.0);
        assert_eq!(summary.tax_price, 30.0);
        assert_eq!(summary.total_price, 210.0);
    }

    #[test]
    fn test_small_cart_pays_shipping() {
        let summary = summarize(&[line(20.0, 3, 0.0)], &PricingRules::default());
        assert_eq!(summary.discounted_price, 60.0);
        assert_eq!(summary.shipping_price, 10.0);
        assert_eq!(summary.tax_price, 9.0);
        assert_eq!(summary.total_price, 79.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let summary = summarize(&[line(50.0, 2, 0.0)], &PricingRules::default());
        assert_eq!(summary.shipping_price, 10.0);
    }

    #[test]
    fn test_empty_cart_is_free() {
        let summary = summarize(&[], &PricingRules::default());
        assert_eq!(summary.total_price, 0.0);
        assert_eq!(summary.shipping_price, 0.0);
    }

    #[test]
    fn test_custom_rules() {
        let rules = PricingRules {
            shipping_threshold: 500.0,
            shipping_fee: 4.5,
            tax_rate: 0.2,
        };
        let summary = summarize(&[line(80.0, 1, 25.0)], &rules);
        assert_eq!(summary.discounted_price, 60.0);
        assert_eq!(summary.tax_price, 16.0);
        assert_eq!(summary.total_price, 80.5);
    }

    #[test]
    fn test_cents() {
        assert_eq!(to_cents(210.0), 21000);
        assert_eq!(to_cents(78.97), 7897);
    }
}
