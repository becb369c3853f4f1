//! Liquidity position safety math
//!
//! Bounds how much of a pooled position can be withdrawn without pushing
//! either pool reserve below its existential floor, and derives the
//! underlying amounts for a withdrawal at a given percentage. Also carries
//! the small pool-statistics helpers the dashboard layer renders (share of
//! pool, LP-supply estimate, fee APR).

use crate::cp_math::mul_div_floor;
use pezdex_types::{LiquidityPosition, PoolSnapshot};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiquidityError {
    #[error("no liquidity position: provider holds no pool tokens")]
    NoPosition,

    #[error("withdrawal of {requested}% exceeds the safe ceiling of {ceiling}%")]
    ExceedsSafeWithdrawal { requested: Decimal, ceiling: Decimal },

    #[error("withdrawal percentage must be positive, got {requested}")]
    InvalidPercent { requested: Decimal },

    #[error("amount arithmetic overflowed 128 bits")]
    AmountOverflow,
}

/// Underlying amounts released by burning part of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalAmounts {
    pub amount_a: u128,
    pub amount_b: u128,
    pub lp_burned: u128,
}

/// The provider's underlying `(asset_a, asset_b)` amounts at snapshot
/// time: `reserve * balance / total_supply`, floored.
pub fn underlying_amounts(
    position: &LiquidityPosition,
    pool: &PoolSnapshot,
) -> Result<(u128, u128), LiquidityError> {
    if position.lp_balance == 0 || position.lp_total_supply == 0 {
        return Err(LiquidityError::NoPosition);
    }
    let amount_a = mul_div_floor(pool.reserve_a, position.lp_balance, position.lp_total_supply)
        .ok_or(LiquidityError::AmountOverflow)?;
    let amount_b = mul_div_floor(pool.reserve_b, position.lp_balance, position.lp_total_supply)
        .ok_or(LiquidityError::AmountOverflow)?;
    Ok((amount_a, amount_b))
}

/// Highest percentage of the position that can be withdrawn while leaving
/// each underlying at or above its minimum-reserve floor.
///
/// The binding per-asset ceiling is floored to one decimal place, biasing
/// conservative. When even that ceiling is zero or negative (the floors
/// already swallow the whole position) the result falls back to `99.0%`:
/// a hard zero would leave small positions permanently locked, so the
/// ledger's purge rules are preferred over an unremovable stake. Callers
/// see the fallback logged at warn level.
pub fn max_removable_percent(
    position: &LiquidityPosition,
    pool: &PoolSnapshot,
) -> Result<Decimal, LiquidityError> {
    let (underlying_a, underlying_b) = underlying_amounts(position, pool)?;

    let ceiling_a = asset_ceiling_pct(underlying_a, position.min_reserve_a)?;
    let ceiling_b = asset_ceiling_pct(underlying_b, position.min_reserve_b)?;

    let raw = ceiling_a.min(ceiling_b).min(dec!(100));
    let floored = (raw * dec!(10)).floor() / dec!(10);

    if floored <= Decimal::ZERO {
        warn!(
            %ceiling_a,
            %ceiling_b,
            "minimum-reserve floors swallow the position; falling back to 99% ceiling"
        );
        return Ok(dec!(99.0));
    }

    debug!(%floored, "computed safe withdrawal ceiling");
    Ok(floored)
}

/// Percentage of `underlying` that can leave before `min_reserve` is
/// violated; unconstrained (100%) when the asset has no stake.
fn asset_ceiling_pct(underlying: u128, min_reserve: u128) -> Result<Decimal, LiquidityError> {
    if underlying == 0 {
        return Ok(dec!(100));
    }
    let held = Decimal::from_u128(underlying).ok_or(LiquidityError::AmountOverflow)?;
    let floor = Decimal::from_u128(min_reserve).ok_or(LiquidityError::AmountOverflow)?;
    Ok((held - floor) / held * dec!(100))
}

/// Underlying amounts and LP tokens burned for withdrawing `percent` of a
/// position. `percent` must be in `(0, max_removable_percent]`; the
/// ceiling is re-derived here so an unclamped caller cannot slip past it.
pub fn amounts_for_withdrawal(
    position: &LiquidityPosition,
    pool: &PoolSnapshot,
    percent: Decimal,
) -> Result<WithdrawalAmounts, LiquidityError> {
    if percent <= Decimal::ZERO {
        return Err(LiquidityError::InvalidPercent { requested: percent });
    }
    let ceiling = max_removable_percent(position, pool)?;
    if percent > ceiling {
        return Err(LiquidityError::ExceedsSafeWithdrawal {
            requested: percent,
            ceiling,
        });
    }

    let (underlying_a, underlying_b) = underlying_amounts(position, pool)?;
    Ok(WithdrawalAmounts {
        amount_a: apply_pct_floor(underlying_a, percent)?,
        amount_b: apply_pct_floor(underlying_b, percent)?,
        lp_burned: apply_pct_floor(position.lp_balance, percent)?,
    })
}

/// `floor(amount * percent / 100)` through `Decimal`, back into base units.
fn apply_pct_floor(amount: u128, percent: Decimal) -> Result<u128, LiquidityError> {
    let scaled = Decimal::from_u128(amount).ok_or(LiquidityError::AmountOverflow)? * percent
        / dec!(100);
    scaled.floor().to_u128().ok_or(LiquidityError::AmountOverflow)
}

/// Provider's share of the pool as a percentage with two-decimal
/// resolution (basis-point integer division underneath).
pub fn share_of_pool_pct(position: &LiquidityPosition) -> Result<Decimal, LiquidityError> {
    if position.lp_balance == 0 || position.lp_total_supply == 0 {
        return Err(LiquidityError::NoPosition);
    }
    let share_bps = mul_div_floor(position.lp_balance, 10_000, position.lp_total_supply)
        .ok_or(LiquidityError::AmountOverflow)?;
    let bps = Decimal::from_u128(share_bps).ok_or(LiquidityError::AmountOverflow)?;
    Ok(bps / dec!(100))
}

/// Geometric-mean estimate of a pool's LP-token supply, for ledgers that
/// do not expose it directly: `isqrt(reserve_a * reserve_b)`.
pub fn estimated_lp_supply(reserve_a: u128, reserve_b: u128) -> Result<u128, LiquidityError> {
    let product = reserve_a
        .checked_mul(reserve_b)
        .ok_or(LiquidityError::AmountOverflow)?;
    Ok(isqrt(product))
}

/// Newton's method integer square root: largest `x` with `x * x <= value`.
fn isqrt(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    let mut x = value;
    let mut next = (x + 1) / 2;
    while next < x {
        x = next;
        next = (x + value / x) / 2;
    }
    x
}

/// Annualized fee yield from a 24-hour fee sample: `fees / liquidity *
/// 365`, as a percentage. Zero liquidity reports zero rather than erroring,
/// matching how an empty pool renders on a dashboard.
pub fn pool_apr_pct(fees_24h: u128, total_liquidity: u128) -> Result<Decimal, LiquidityError> {
    if total_liquidity == 0 {
        return Ok(Decimal::ZERO);
    }
    let fees = Decimal::from_u128(fees_24h).ok_or(LiquidityError::AmountOverflow)?;
    let liquidity = Decimal::from_u128(total_liquidity).ok_or(LiquidityError::AmountOverflow)?;
    Ok(fees / liquidity * dec!(365) * dec!(100))
}
