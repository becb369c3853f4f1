//! Impermanent loss estimation
//!
//! Closed-form value shortfall of holding a 50/50 constant-product
//! position versus holding the assets outright, for a hypothetical
//! relative price move: `loss = (2 * sqrt(r) / (1 + r) - 1) * 100` with
//! `r = 1 + change/100`. The formula is asymmetric in raw percent (a +100%
//! move matches a -50% move, not -100%); callers display both directions
//! from the same curve.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LossError {
    #[error("price change of {change_pct}% implies a non-positive price ratio")]
    InvalidPriceRatio { change_pct: Decimal },
}

/// Impermanent loss for a relative price change, as a percentage.
///
/// Zero change is exactly zero loss; any other change is negative. Fails
/// for changes at or below -100%, where the price ratio stops being
/// meaningful.
pub fn impermanent_loss(price_change_pct: Decimal) -> Result<Decimal, LossError> {
    let ratio = Decimal::ONE + price_change_pct / dec!(100);
    if ratio <= Decimal::ZERO {
        return Err(LossError::InvalidPriceRatio {
            change_pct: price_change_pct,
        });
    }

    let sqrt_ratio = decimal_sqrt(ratio);
    Ok((dec!(2) * sqrt_ratio / (Decimal::ONE + ratio) - Decimal::ONE) * dec!(100))
}

/// Square root via Newton's method, for non-negative input.
/// Returns the best approximation if the iteration cap is hit first.
fn decimal_sqrt(value: Decimal) -> Decimal {
    if value == Decimal::ZERO {
        return Decimal::ZERO;
    }

    let epsilon = dec!(0.0000000001);
    let mut x = value;
    let mut last_x = Decimal::ZERO;

    for _ in 0..100 {
        let next_x = (x + value / x) / dec!(2);
        if (next_x - last_x).abs() < epsilon {
            return next_x;
        }
        last_x = x;
        x = next_x;
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_price_move_means_no_loss() {
        assert_eq!(impermanent_loss(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn doubling_loses_about_five_point_seven_percent() {
        let loss = impermanent_loss(dec!(100)).unwrap();
        assert!((loss - dec!(-5.719)).abs() < dec!(0.01), "got {loss}");
    }

    #[test]
    fn quarter_move_loses_under_one_percent() {
        let loss = impermanent_loss(dec!(25)).unwrap();
        assert!((loss - dec!(-0.619)).abs() < dec!(0.01), "got {loss}");
    }

    #[test]
    fn loss_is_symmetric_for_reciprocal_moves() {
        // +100% (ratio 2) and -50% (ratio 1/2) are the same relative move.
        let up = impermanent_loss(dec!(100)).unwrap();
        let down = impermanent_loss(dec!(-50)).unwrap();
        assert!((up - down).abs() < dec!(0.0001), "up {up}, down {down}");
    }

    #[test]
    fn raw_percent_moves_are_not_mirror_images() {
        // -99% is a 100x move down; +99% is not even a 2x move up.
        let down = impermanent_loss(dec!(-99)).unwrap();
        let up = impermanent_loss(dec!(99)).unwrap();
        assert!(down < dec!(-70), "got {down}");
        assert!(up > dec!(-6), "got {up}");
    }

    #[test]
    fn any_nonzero_move_is_a_loss() {
        for change in [dec!(-90), dec!(-10), dec!(0.5), dec!(10), dec!(400)] {
            let loss = impermanent_loss(change).unwrap();
            assert!(loss < Decimal::ZERO, "change {change} gave {loss}");
        }
    }

    #[test]
    fn total_collapse_is_rejected() {
        assert!(matches!(
            impermanent_loss(dec!(-100)),
            Err(LossError::InvalidPriceRatio { .. })
        ));
        assert!(matches!(
            impermanent_loss(dec!(-250)),
            Err(LossError::InvalidPriceRatio { .. })
        ));
    }
}
