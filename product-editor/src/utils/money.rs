//! Money and quantity arithmetic using rust_decimal
//!
//! Values are stored as `f64`; arithmetic that feeds totals or unit
//! conversion goes through `Decimal` and is converted back rounded to 2
//! decimal places.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal (non-finite input becomes zero)
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Whole packages of `conversion_to_base` that `base_stock` fills
///
/// `floor(base_stock / conversion)`; 0 for a non-positive conversion.
pub fn units_available(base_stock: i64, conversion_to_base: f64) -> i64 {
    let conversion = to_decimal(conversion_to_base);
    if conversion <= Decimal::ZERO || base_stock <= 0 {
        return 0;
    }
    (Decimal::from(base_stock) / conversion)
        .floor()
        .to_i64()
        .unwrap_or(0)
}

/// `quantity × unit_price`, rounded to cents
pub fn line_value(quantity: i64, unit_price: f64) -> Decimal {
    Decimal::from(quantity) * to_decimal(unit_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        let sum = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum), 0.3);
    }

    #[test]
    fn test_units_available_floors() {
        assert_eq!(units_available(50, 12.0), 4);
        assert_eq!(units_available(48, 12.0), 4);
        assert_eq!(units_available(11, 12.0), 0);
        assert_eq!(units_available(5, 0.5), 10);
    }

    #[test]
    fn test_units_available_guards() {
        assert_eq!(units_available(50, 0.0), 0);
        assert_eq!(units_available(50, -2.0), 0);
        assert_eq!(units_available(-3, 2.0), 0);
        assert_eq!(units_available(50, f64::NAN), 0);
    }

    #[test]
    fn test_line_value() {
        assert_eq!(to_f64(line_value(3, 10.99)), 32.97);
    }
}
