//! Pool reserve snapshots
//!
//! A [`PoolSnapshot`] is a read-only view of one constant-product pool as
//! reported by the chain client: the unordered asset pair, current reserves
//! in base units, and the fee tier. [`PoolSet`] indexes snapshots by
//! unordered pair so lookups work regardless of which side the caller
//! names first.

use crate::asset::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserve snapshot for a single two-asset pool.
///
/// A pool is only meaningful while both reserves are positive; either
/// reserve at zero means the pool does not exist for quoting purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub asset_a: AssetId,
    pub asset_b: AssetId,
    /// Reserve of `asset_a`, base units.
    pub reserve_a: u128,
    /// Reserve of `asset_b`, base units.
    pub reserve_b: u128,
    /// Swap fee in basis points (30 = 0.3%).
    pub fee_bps: u16,
    /// Id of the pool's liquidity token.
    pub lp_token: AssetId,
}

impl PoolSnapshot {
    pub fn new(
        asset_a: AssetId,
        asset_b: AssetId,
        reserve_a: u128,
        reserve_b: u128,
        fee_bps: u16,
    ) -> Self {
        Self {
            asset_a,
            asset_b,
            reserve_a,
            reserve_b,
            fee_bps,
            lp_token: Self::lp_token_for(asset_a, asset_b),
        }
    }

    /// Liquidity-token id the ledger derives for a pair (low id in the high
    /// half-word).
    pub fn lp_token_for(asset_a: AssetId, asset_b: AssetId) -> AssetId {
        let (lo, hi) = if asset_a <= asset_b {
            (asset_a, asset_b)
        } else {
            (asset_b, asset_a)
        };
        (lo << 16) | hi
    }

    pub fn contains(&self, asset: AssetId) -> bool {
        self.asset_a == asset || self.asset_b == asset
    }

    /// Both reserves positive; pools that fail this are skipped by quoting.
    pub fn is_live(&self) -> bool {
        self.reserve_a > 0 && self.reserve_b > 0
    }

    /// Reserves as `(reserve_in, reserve_out)` for a trade entering the
    /// pool with `asset_in`. `None` when the asset is not in this pool.
    pub fn oriented(&self, asset_in: AssetId) -> Option<(u128, u128)> {
        if asset_in == self.asset_a {
            Some((self.reserve_a, self.reserve_b))
        } else if asset_in == self.asset_b {
            Some((self.reserve_b, self.reserve_a))
        } else {
            None
        }
    }
}

/// Snapshot collection keyed by unordered asset pair.
#[derive(Debug, Clone, Default)]
pub struct PoolSet {
    pools: HashMap<(AssetId, AssetId), PoolSnapshot>,
}

impl PoolSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: AssetId, b: AssetId) -> (AssetId, AssetId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Insert or refresh a snapshot; returns the superseded one, if any.
    pub fn insert(&mut self, pool: PoolSnapshot) -> Option<PoolSnapshot> {
        self.pools.insert(Self::key(pool.asset_a, pool.asset_b), pool)
    }

    pub fn get(&self, a: AssetId, b: AssetId) -> Option<&PoolSnapshot> {
        self.pools.get(&Self::key(a, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoolSnapshot> {
        self.pools.values()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
