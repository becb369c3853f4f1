//! Engine facade
//!
//! The surface the host application calls: quote a trade from decimal
//! input, expand it into a route plan, bound a withdrawal, estimate
//! impermanent loss. The engine owns only the asset registry and its
//! configuration; reserves and positions arrive as snapshots on every
//! call, so a stale quote can always be superseded by re-calling with the
//! latest snapshot.

use crate::config::EngineConfig;
use crate::planner::{resolve_pool_pair, RouteError, RoutePlan, RoutePlanner};
use pezdex_amm::{
    amounts_for_withdrawal, impermanent_loss, max_removable_percent, CpMath, LiquidityError,
    LossError, QuoteError, WithdrawalAmounts,
};
use pezdex_types::{
    to_base_units, to_decimal_string, AmountError, AssetRegistry, LiquidityPosition, PoolSet,
    PoolSnapshot,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Any failure the engine surface can report. All variants are local,
/// synchronous, and recoverable by adjusting the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Liquidity(#[from] LiquidityError),

    #[error(transparent)]
    Loss(#[from] LossError),
}

/// Immutable result of one quote call. Superseded quotes are discarded,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Input amount, base units of the from-asset.
    pub amount_in: u128,
    /// Expected output, base units of the to-asset.
    pub amount_out: u128,
    /// Slippage-adjusted minimum acceptable output.
    pub min_amount_out: u128,
    /// Spot-versus-effective rate degradation, percent.
    pub price_impact_pct: Decimal,
    /// Pre-trade exchange rate of the pool pair.
    pub spot_rate: Decimal,
}

/// Stateless computation facade over a validated asset registry.
pub struct SwapEngine {
    registry: AssetRegistry,
    config: EngineConfig,
}

impl SwapEngine {
    pub fn new(registry: AssetRegistry, config: EngineConfig) -> Result<Self, crate::ConfigError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Price a prospective swap from a user-entered decimal amount.
    ///
    /// The amount is parsed at the from-asset's precision, both legs are
    /// resolved to their pool-facing assets, and the pool snapshot in
    /// `pools` is priced with the constant-product formula.
    pub fn quote(
        &self,
        pools: &PoolSet,
        from_symbol: &str,
        to_symbol: &str,
        amount_in: &str,
    ) -> Result<SwapQuote, EngineError> {
        let (from, _, pool_from, pool_to) =
            resolve_pool_pair(&self.registry, from_symbol, to_symbol)?;
        let amount_in = to_base_units(amount_in, from.decimals)?;

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
        let quote = SwapQuote {
            amount_in,
            amount_out,
            min_amount_out: CpMath::min_amount_out(amount_out, self.config.slippage_bps)?,
            price_impact_pct: CpMath::price_impact_pct(reserve_in, reserve_out, amount_in)?,
            spot_rate: CpMath::spot_rate(reserve_in, reserve_out)?,
        };

        debug!(
            from = from_symbol,
            to = to_symbol,
            amount_in = quote.amount_in,
            amount_out = quote.amount_out,
            impact = %quote.price_impact_pct,
            "quoted swap"
        );
        Ok(quote)
    }

    /// Expand a trade into its wrap/swap/unwrap operation chain.
    pub fn plan(
        &self,
        pools: &PoolSet,
        from_symbol: &str,
        to_symbol: &str,
        amount_in: u128,
    ) -> Result<RoutePlan, EngineError> {
        Ok(RoutePlanner::plan(
            &self.registry,
            pools,
            from_symbol,
            to_symbol,
            amount_in,
            self.config.slippage_bps,
        )?)
    }

    /// Safe withdrawal ceiling for a position, percent.
    pub fn max_withdraw_percent(
        &self,
        position: &LiquidityPosition,
        pool: &PoolSnapshot,
    ) -> Result<Decimal, EngineError> {
        Ok(max_removable_percent(position, pool)?)
    }

    /// Underlying amounts released by withdrawing `percent` of a position.
    pub fn withdrawal_amounts(
        &self,
        position: &LiquidityPosition,
        pool: &PoolSnapshot,
        percent: Decimal,
    ) -> Result<WithdrawalAmounts, EngineError> {
        Ok(amounts_for_withdrawal(position, pool, percent)?)
    }

    /// Impermanent loss for a hypothetical price move, percent.
    pub fn estimate_loss(&self, price_change_pct: Decimal) -> Result<Decimal, EngineError> {
        Ok(impermanent_loss(price_change_pct)?)
    }

    /// Render base units for display at the configured digit count.
    pub fn format_amount(&self, amount: u128, decimals: u8) -> String {
        to_decimal_string(amount, decimals, self.config.display_digits)
    }
}
