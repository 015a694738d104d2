//! Price Calculator
//!
//! Pure arithmetic for cart pricing. Inputs arrive as f64 catalog prices,
//! all math runs on `rust_decimal`, and each output component is rounded
//! once at the end. Every operation is checked: `None` means an input was
//! not a representable amount or a result left the `Decimal` range.

use rust_decimal::prelude::*;
use shared::models::PriceBreakdown;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

const METERS_PER_KM: Decimal = Decimal::ONE_THOUSAND;

/// Convert f64 to Decimal for calculation (`None` for NaN, infinities and
/// magnitudes beyond `Decimal::MAX`)
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Round to 2 decimal places, midpoint away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Catalog price rounded for storage in a snapshot column
#[inline]
pub fn to_money(value: f64) -> Option<Decimal> {
    to_decimal(value).map(round_money)
}

/// Fee schedule applied to every estimate
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRates {
    pub base_delivery_fee: Decimal,
    pub per_km_rate: Decimal,
    pub tax_rate: Decimal,
    pub service_fee_rate: Decimal,
    pub currency: String,
}

impl Default for PricingRates {
    fn default() -> Self {
        Self {
            base_delivery_fee: Decimal::from(20),
            per_km_rate: Decimal::from(5),
            tax_rate: Decimal::new(10, 2),
            service_fee_rate: Decimal::new(5, 2),
            currency: "MAD".to_string(),
        }
    }
}

/// Unrounded total of one cart line
///
/// Modifier prices are a flat add-on per line and are not multiplied by the
/// line quantity.
pub fn line_total(
    unit_price: f64,
    quantity: i32,
    option_prices: impl IntoIterator<Item = f64>,
) -> Option<Decimal> {
    let mut total = to_decimal(unit_price)?.checked_mul(Decimal::from(quantity))?;
    for price in option_prices {
        total = total.checked_add(to_decimal(price)?)?;
    }
    Some(total)
}

impl PricingRates {
    /// Unrounded delivery price for a route length
    pub fn delivery_price(&self, distance_meters: f64) -> Option<Decimal> {
        let km = to_decimal(distance_meters)?.checked_div(METERS_PER_KM)?;
        km.checked_mul(self.per_km_rate)?
            .checked_add(self.base_delivery_fee)
    }

    /// Build the breakdown from the unrounded items total
    ///
    /// Tax and service fee are computed from unrounded values; `total` is the
    /// sum of the rounded components so the stored columns always add up.
    pub fn breakdown(
        &self,
        items_total: Decimal,
        distance_meters: f64,
    ) -> Option<PriceBreakdown> {
        let delivery = self.delivery_price(distance_meters)?;
        let tax = items_total.checked_mul(self.tax_rate)?;
        let service_fee = items_total
            .checked_add(delivery)?
            .checked_mul(self.service_fee_rate)?;

        let items_total = round_money(items_total);
        let delivery_price = round_money(delivery);
        let tax_amount = round_money(tax);
        let service_fee = round_money(service_fee);
        let total = items_total
            .checked_add(delivery_price)?
            .checked_add(tax_amount)?
            .checked_add(service_fee)?;

        Some(PriceBreakdown {
            items_total,
            delivery_price,
            tax_amount,
            service_fee,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_delivery_price_for_four_km() {
        let rates = PricingRates::default();
        assert_eq!(round_money(rates.delivery_price(4000.0).unwrap()), dec("40.00"));
    }

    #[test]
    fn test_zero_distance_is_base_fee() {
        let rates = PricingRates::default();
        assert_eq!(rates.delivery_price(0.0), Some(dec("20")));
    }

    #[test]
    fn test_reference_breakdown() {
        let rates = PricingRates::default();
        let b = rates.breakdown(dec("100"), 4000.0).unwrap();

        assert_eq!(b.items_total, dec("100.00"));
        assert_eq!(b.delivery_price, dec("40.00"));
        assert_eq!(b.tax_amount, dec("10.00"));
        assert_eq!(b.service_fee, dec("7.00"));
        assert_eq!(b.total, dec("157.00"));
    }

    #[test]
    fn test_empty_cart_still_charges_delivery_and_service() {
        let rates = PricingRates::default();
        let b = rates.breakdown(Decimal::ZERO, 0.0).unwrap();

        assert_eq!(b.items_total, Decimal::ZERO);
        assert_eq!(b.delivery_price, dec("20"));
        assert_eq!(b.tax_amount, Decimal::ZERO);
        assert_eq!(b.service_fee, dec("1.00"));
        assert_eq!(b.total, dec("21.00"));
    }

    #[test]
    fn test_option_price_is_flat_per_line() {
        // 3 × 12.50 + 2.00 + 0.75
        let total = line_total(12.5, 3, [2.0, 0.75]);
        assert_eq!(total, Some(dec("40.25")));
    }

    #[test]
    fn test_lines_accumulate_unrounded() {
        // Three lines of 0.333 sum to 0.999, rounded once to 1.00.
        // Rounding each line first would give 0.99.
        let items: Decimal = (0..3).map(|_| line_total(0.333, 1, []).unwrap()).sum();
        let b = PricingRates::default().breakdown(items, 0.0).unwrap();
        assert_eq!(b.items_total, dec("1.00"));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_money(dec("10.005")), dec("10.01"));
        assert_eq!(round_money(dec("10.004")), dec("10.00"));
        assert_eq!(to_money(19.999), Some(dec("20.00")));
    }

    #[test]
    fn test_total_is_sum_of_rounded_components() {
        let rates = PricingRates::default();
        let cases = [
            (dec("0"), 1.0),
            (dec("33.333"), 1234.5),
            (dec("99.995"), 7777.7),
            (dec("12.345"), 0.0),
            (dec("1000.01"), 15432.1),
        ];
        for (items, distance) in cases {
            let b = rates.breakdown(items, distance).unwrap();
            assert_eq!(
                b.total,
                round_money(b.items_total + b.delivery_price + b.tax_amount + b.service_fee),
                "items={items} distance={distance}"
            );
            for part in [b.items_total, b.delivery_price, b.tax_amount, b.service_fee] {
                assert!(part.scale() <= 2);
            }
        }
    }

    #[test]
    fn test_unrepresentable_prices_are_rejected() {
        assert_eq!(to_decimal(f64::NAN), None);
        assert_eq!(to_decimal(f64::INFINITY), None);
        assert_eq!(to_money(1e30), None);
        assert_eq!(line_total(f64::NAN, 1, []), None);
        assert_eq!(line_total(10.0, 1, [f64::NEG_INFINITY]), None);
    }

    #[test]
    fn test_overflow_is_rejected() {
        // 1e28 fits in a Decimal, 100 of them do not
        assert!(to_decimal(1e28).is_some());
        assert_eq!(line_total(1e28, 100, []), None);
        assert_eq!(line_total(7e28, 1, [7e28]), None);

        let rates = PricingRates::default();
        assert_eq!(rates.delivery_price(f64::MAX), None);
        assert_eq!(rates.breakdown(Decimal::MAX, 0.0), None);
    }
}
