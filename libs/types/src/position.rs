//! Liquidity position snapshots

use serde::{Deserialize, Serialize};

/// One provider's stake in one pool, as reported by the chain client.
///
/// Amounts are base units. `min_reserve_a`/`min_reserve_b` are the ledger's
/// existential thresholds for the pooled assets: the smallest balance the
/// pool account may hold without being purged. The safety calculator in
/// `pezdex-amm` uses them to bound withdrawals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPosition {
    /// Provider's liquidity-token balance.
    pub lp_balance: u128,
    /// Pool's total liquidity-token supply at snapshot time.
    pub lp_total_supply: u128,
    /// Minimum-reserve floor for the pool's first asset.
    pub min_reserve_a: u128,
    /// Minimum-reserve floor for the pool's second asset.
    pub min_reserve_b: u128,
}

impl LiquidityPosition {
    pub fn new(
        lp_balance: u128,
        lp_total_supply: u128,
        min_reserve_a: u128,
        min_reserve_b: u128,
    ) -> Self {
        Self {
            lp_balance,
            lp_total_supply,
            min_reserve_a,
            min_reserve_b,
        }
    }
}
