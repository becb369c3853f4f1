//! Route planning across the wrap boundary
//!
//! Expands a logical `(from_symbol, to_symbol)` trade into the ordered
//! operations the ledger accepts. Pools only ever hold `Direct` and
//! `Wrapped` assets, so a leg naming a `Native` asset is substituted with
//! its wrapped counterpart and a `Wrap`/`Unwrap` step is recorded at that
//! end. The plan universe is closed: at most one wrap, exactly one swap,
//! at most one unwrap.
//!
//! ## Minimum-output policy
//!
//! Plans are composed as one atomic batch, and a trailing [`RouteStep::Unwrap`]
//! carries the swap's slippage-adjusted **minimum** output, not its
//! realized output. If the swap realizes more than the minimum, the
//! surplus stays in wrapped form and remains spendable; nothing is
//! forfeited. The alternative (unwrapping the realized output) cannot be
//! expressed ahead of submission without a second transaction, which would
//! lose atomicity on partial failure.

use pezdex_amm::{CpMath, QuoteError};
use pezdex_types::{AssetId, AssetInfo, AssetRegistry, PoolSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown asset symbol {symbol:?}")]
    UnknownSymbol { symbol: String },

    #[error("swap from {from_symbol:?} to {to_symbol:?} resolves to a single pool asset")]
    SameAssetSwap {
        from_symbol: String,
        to_symbol: String,
    },

    #[error("no pool exists for assets {asset_a} and {asset_b}")]
    NoPoolForPair { asset_a: AssetId, asset_b: AssetId },

    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// One elementary ledger operation within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStep {
    /// Convert a native asset into its pool-tradable wrapped form, 1:1.
    Wrap {
        native: AssetId,
        wrapped: AssetId,
        amount: u128,
    },
    /// The single pool trade of the route.
    Swap {
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: u128,
        min_amount_out: u128,
    },
    /// Convert wrapped output back to its native asset, 1:1.
    Unwrap {
        wrapped: AssetId,
        native: AssetId,
        amount: u128,
    },
}

/// Ordered operation chain realizing one logical trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub steps: Vec<RouteStep>,
}

impl RoutePlan {
    /// The plan's single pool trade.
    pub fn swap_step(&self) -> Option<&RouteStep> {
        self.steps
            .iter()
            .find(|step| matches!(step, RouteStep::Swap { .. }))
    }

    pub fn has_wrap(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, RouteStep::Wrap { .. }))
    }

    pub fn has_unwrap(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, RouteStep::Unwrap { .. }))
    }
}

/// Deterministic single-pool route planner.
pub struct RoutePlanner;

impl RoutePlanner {
    /// Plan the operation chain for swapping `amount_in` of `from_symbol`
    /// into `to_symbol`.
    ///
    /// `slippage_bps` sets the minimum-output bound carried by the swap
    /// step and, per the module policy, by a trailing unwrap.
    pub fn plan(
        registry: &AssetRegistry,
        pools: &PoolSet,
        from_symbol: &str,
        to_symbol: &str,
        amount_in: u128,
        slippage_bps: u16,
    ) -> Result<RoutePlan, RouteError> {
        let (from, to, pool_from, pool_to) =
            resolve_pool_pair(registry, from_symbol, to_symbol)?;

        let pool = pools
            .get(pool_from.id, pool_to.id)
            .ok_or(RouteError::NoPoolForPair {
                asset_a: pool_from.id,
                asset_b: pool_to.id,
            })?;
        let (reserve_in, reserve_out) =
            pool.oriented(pool_from.id)
                .ok_or(RouteError::NoPoolForPair {
                    asset_a: pool_from.id,
                    asset_b: pool_to.id,
                })?;

        let amount_out = CpMath::amount_out(amount_in, reserve_in, reserve_out, pool.fee_bps)?;
        let min_amount_out = CpMath::min_amount_out(amount_out, slippage_bps)?;

        let mut steps = Vec::with_capacity(3);
        if from.id != pool_from.id {
            steps.push(RouteStep::Wrap {
                native: from.id,
                wrapped: pool_from.id,
                amount: amount_in,
            });
        }
        steps.push(RouteStep::Swap {
            asset_in: pool_from.id,
            asset_out: pool_to.id,
            amount_in,
            min_amount_out,
        });
        if to.id != pool_to.id {
            steps.push(RouteStep::Unwrap {
                wrapped: pool_to.id,
                native: to.id,
                amount: min_amount_out,
            });
        }

        debug!(
            from = %from.symbol,
            to = %to.symbol,
            amount_in,
            min_amount_out,
            steps = steps.len(),
            "planned swap route"
        );
        Ok(RoutePlan { steps })
    }
}

/// Resolve both legs to their pool-facing assets, rejecting degenerate
/// trades. Returns `(logical_from, logical_to, pool_from, pool_to)`.
pub(crate) fn resolve_pool_pair<'a>(
    registry: &'a AssetRegistry,
    from_symbol: &str,
    to_symbol: &str,
) -> Result<(&'a AssetInfo, &'a AssetInfo, &'a AssetInfo, &'a AssetInfo), RouteError> {
    let from = lookup(registry, from_symbol)?;
    let to = lookup(registry, to_symbol)?;

    let pool_from = registry
        .pool_facing(from)
        .ok_or_else(|| unknown(from_symbol))?;
    let pool_to = registry.pool_facing(to).ok_or_else(|| unknown(to_symbol))?;

    if pool_from.id == pool_to.id {
        return Err(RouteError::SameAssetSwap {
            from_symbol: from_symbol.to_string(),
            to_symbol: to_symbol.to_string(),
        });
    }

    debug_assert!(pool_from.is_pool_facing() && pool_to.is_pool_facing());
    Ok((from, to, pool_from, pool_to))
}

fn lookup<'a>(registry: &'a AssetRegistry, symbol: &str) -> Result<&'a AssetInfo, RouteError> {
    registry.by_symbol(symbol).ok_or_else(|| unknown(symbol))
}

fn unknown(symbol: &str) -> RouteError {
    RouteError::UnknownSymbol {
        symbol: symbol.to_string(),
    }
}

impl RouteStep {
    /// Short operation name for logs and UI labels.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteStep::Wrap { .. } => "wrap",
            RouteStep::Swap { .. } => "swap",
            RouteStep::Unwrap { .. } => "unwrap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pezdex_types::BridgeRole;

    #[test]
    fn wrap_role_shapes_are_the_only_branching() {
        // The planner consults roles, never concrete symbols; a fresh
        // wrapped pair plans identically to the fixture pairs used in the
        // integration tests.
        let registry = AssetRegistry::new(vec![
            AssetInfo::new(10, "DOT", 10, BridgeRole::Native { wrapped: 11 }),
            AssetInfo::new(11, "wDOT", 10, BridgeRole::Wrapped { native: 10 }),
            AssetInfo::new(12, "USDK", 6, BridgeRole::Direct),
        ])
        .unwrap();
        let mut pools = PoolSet::new();
        pools.insert(pezdex_types::PoolSnapshot::new(11, 12, 1_000_000, 2_000_000, 30));

        let plan = RoutePlanner::plan(&registry, &pools, "DOT", "USDK", 1_000, 0).unwrap();
        assert_eq!(plan.steps.len(), 2);
        assert!(plan.has_wrap());
        assert!(!plan.has_unwrap());
    }
}
