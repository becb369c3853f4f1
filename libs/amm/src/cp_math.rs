//! Constant-product swap math with exact integer arithmetic
//!
//! Amounts are `u128` base units and every division floors, which keeps
//! the post-trade product `(reserve_in + in) * (reserve_out - out)` at or
//! above the pre-trade product: rounding residue and the fee both accrue
//! to the pool, never to the trader.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Basis-point denominator shared by fees and slippage tolerances.
pub const BPS_SCALE: u128 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("insufficient liquidity: both pool reserves must be positive")]
    InsufficientLiquidity,

    #[error("swap input amount must be positive")]
    ZeroInput,

    #[error("basis-point parameter out of range: {bps} > 10000")]
    BpsOutOfRange { bps: u16 },

    #[error("amount arithmetic overflowed 128 bits")]
    AmountOverflow,
}

/// `floor(a * b / d)`; `None` on product overflow. `d` must be non-zero.
pub(crate) fn mul_div_floor(a: u128, b: u128, d: u128) -> Option<u128> {
    a.checked_mul(b).map(|product| product / d)
}

/// Constant-product math functions over raw reserve snapshots.
pub struct CpMath;

impl CpMath {
    /// Output amount for a swap against `x * y = k` reserves.
    ///
    /// The fee is taken off the input leg first, then the invariant is
    /// solved:
    /// `effective_in = amount_in * (10000 - fee_bps) / 10000` and
    /// `amount_out = effective_in * reserve_out / (reserve_in + effective_in)`,
    /// both floored. The result is always strictly below `reserve_out`.
    pub fn amount_out(
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
        fee_bps: u16,
    ) -> Result<u128, QuoteError> {
        if fee_bps as u128 > BPS_SCALE {
            return Err(QuoteError::BpsOutOfRange { bps: fee_bps });
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(QuoteError::InsufficientLiquidity);
        }
        if amount_in == 0 {
            return Err(QuoteError::ZeroInput);
        }

        let effective_in = amount_in
            .checked_mul(BPS_SCALE - fee_bps as u128)
            .ok_or(QuoteError::AmountOverflow)?
            / BPS_SCALE;

        let numerator = effective_in
            .checked_mul(reserve_out)
            .ok_or(QuoteError::AmountOverflow)?;
        let denominator = reserve_in
            .checked_add(effective_in)
            .ok_or(QuoteError::AmountOverflow)?;

        Ok(numerator / denominator)
    }

    /// Percentage degradation of the effective rate versus the spot rate
    /// for a fee-free trade of `amount_in`.
    ///
    /// For `x * y = k` the ratio of effective to spot rate collapses to
    /// `reserve_in / (reserve_in + amount_in)`, so the impact is computed
    /// directly from that closed form at basis-point resolution. Fees are
    /// excluded: they are a constant toll, not price movement. Zero input
    /// has zero impact, and impact never decreases as the trade grows.
    pub fn price_impact_pct(
        reserve_in: u128,
        reserve_out: u128,
        amount_in: u128,
    ) -> Result<Decimal, QuoteError> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(QuoteError::InsufficientLiquidity);
        }
        if amount_in == 0 {
            return Ok(Decimal::ZERO);
        }

        let depth = reserve_in
            .checked_add(amount_in)
            .ok_or(QuoteError::AmountOverflow)?;
        let impact_bps = mul_div_floor(amount_in, BPS_SCALE, depth)
            .ok_or(QuoteError::AmountOverflow)?;

        // impact_bps <= 10000, comfortably within Decimal range.
        let bps = Decimal::from_u128(impact_bps).ok_or(QuoteError::AmountOverflow)?;
        Ok(bps / dec!(100))
    }

    /// Spot exchange rate `reserve_out / reserve_in` before any trade.
    pub fn spot_rate(reserve_in: u128, reserve_out: u128) -> Result<Decimal, QuoteError> {
        if reserve_in == 0 {
            return Err(QuoteError::InsufficientLiquidity);
        }
        let num = Decimal::from_u128(reserve_out).ok_or(QuoteError::AmountOverflow)?;
        let den = Decimal::from_u128(reserve_in).ok_or(QuoteError::AmountOverflow)?;
        Ok(num / den)
    }

    /// Slippage-adjusted minimum acceptable output, floored.
    pub fn min_amount_out(amount_out: u128, slippage_bps: u16) -> Result<u128, QuoteError> {
        if slippage_bps as u128 > BPS_SCALE {
            return Err(QuoteError::BpsOutOfRange { bps: slippage_bps });
        }
        mul_div_floor(amount_out, BPS_SCALE - slippage_bps as u128, BPS_SCALE)
            .ok_or(QuoteError::AmountOverflow)
    }

    /// Amount of asset A that matches a deposit of `amount_b` at the
    /// current reserve ratio, for balanced liquidity provision.
    pub fn paired_deposit_amount(
        amount_b: u128,
        reserve_a: u128,
        reserve_b: u128,
    ) -> Result<u128, QuoteError> {
        if reserve_a == 0 || reserve_b == 0 {
            return Err(QuoteError::InsufficientLiquidity);
        }
        mul_div_floor(amount_b, reserve_a, reserve_b).ok_or(QuoteError::AmountOverflow)
    }
}
