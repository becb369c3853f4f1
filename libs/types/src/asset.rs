//! Asset registry with bridging roles
//!
//! Every tradable symbol is described by an [`AssetInfo`]: its ledger id,
//! decimal precision, and [`BridgeRole`]. A `Native` asset cannot sit in a
//! pool itself and trades through its `Wrapped` counterpart; a `Direct`
//! asset trades as-is. The registry validates the pairing up front so the
//! planner never has to special-case individual tokens.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Ledger-assigned asset identifier.
pub type AssetId = u32;

/// How a symbol participates in pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeRole {
    /// Tradable only via its wrapped counterpart; never a pool participant.
    Native { wrapped: AssetId },
    /// The on-pool representation of a native asset.
    Wrapped { native: AssetId },
    /// Tradable as-is.
    Direct,
}

/// One registry entry: identity, precision, and bridging role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub id: AssetId,
    pub symbol: String,
    /// Decimal precision of the base unit (e.g. 6 or 12).
    pub decimals: u8,
    pub role: BridgeRole,
}

impl AssetInfo {
    pub fn new(id: AssetId, symbol: impl Into<String>, decimals: u8, role: BridgeRole) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            decimals,
            role,
        }
    }

    /// True when this asset may appear in a pool.
    pub fn is_pool_facing(&self) -> bool {
        !matches!(self.role, BridgeRole::Native { .. })
    }
}

/// Registry construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate asset id {id}")]
    DuplicateId { id: AssetId },

    #[error("duplicate asset symbol {symbol}")]
    DuplicateSymbol { symbol: String },

    #[error("asset {id} references counterpart {counterpart} which is not registered")]
    MissingCounterpart { id: AssetId, counterpart: AssetId },

    #[error("assets {native} and {wrapped} do not form a mutual native/wrapped pair")]
    UnpairedBridge { native: AssetId, wrapped: AssetId },

    #[error("native asset {native} and wrapped asset {wrapped} disagree on precision")]
    BridgePrecisionMismatch { native: AssetId, wrapped: AssetId },
}

/// Validated symbol/id lookup table.
///
/// Construction enforces the bridging invariant: every `Native` asset has
/// exactly one `Wrapped` counterpart pointing back at it (and vice versa),
/// and the pair shares one precision, since wrapping is 1:1 in base units.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    by_id: HashMap<AssetId, AssetInfo>,
    by_symbol: HashMap<String, AssetId>,
}

impl AssetRegistry {
    pub fn new(assets: Vec<AssetInfo>) -> Result<Self, RegistryError> {
        let mut by_id: HashMap<AssetId, AssetInfo> = HashMap::with_capacity(assets.len());
        let mut by_symbol: HashMap<String, AssetId> = HashMap::with_capacity(assets.len());

        for asset in assets {
            if by_id.contains_key(&asset.id) {
                return Err(RegistryError::DuplicateId { id: asset.id });
            }
            if by_symbol.contains_key(&asset.symbol) {
                return Err(RegistryError::DuplicateSymbol {
                    symbol: asset.symbol.clone(),
                });
            }
            by_symbol.insert(asset.symbol.clone(), asset.id);
            by_id.insert(asset.id, asset);
        }

        for asset in by_id.values() {
            match asset.role {
                BridgeRole::Native { wrapped } => {
                    let counterpart =
                        by_id
                            .get(&wrapped)
                            .ok_or(RegistryError::MissingCounterpart {
                                id: asset.id,
                                counterpart: wrapped,
                            })?;
                    if counterpart.role != (BridgeRole::Wrapped { native: asset.id }) {
                        return Err(RegistryError::UnpairedBridge {
                            native: asset.id,
                            wrapped,
                        });
                    }
                    if counterpart.decimals != asset.decimals {
                        return Err(RegistryError::BridgePrecisionMismatch {
                            native: asset.id,
                            wrapped,
                        });
                    }
                }
                BridgeRole::Wrapped { native } => {
                    let counterpart =
                        by_id
                            .get(&native)
                            .ok_or(RegistryError::MissingCounterpart {
                                id: asset.id,
                                counterpart: native,
                            })?;
                    if counterpart.role != (BridgeRole::Native { wrapped: asset.id }) {
                        return Err(RegistryError::UnpairedBridge {
                            native,
                            wrapped: asset.id,
                        });
                    }
                }
                BridgeRole::Direct => {}
            }
        }

        Ok(Self { by_id, by_symbol })
    }

    pub fn by_id(&self, id: AssetId) -> Option<&AssetInfo> {
        self.by_id.get(&id)
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&AssetInfo> {
        self.by_symbol.get(symbol).and_then(|id| self.by_id.get(id))
    }

    /// The asset that stands in for `asset` inside pools: a native asset's
    /// wrapped counterpart, otherwise the asset itself.
    ///
    /// Returns `None` only for a counterpart id missing from the registry,
    /// which `new` rules out; callers can treat `None` as an unknown asset.
    pub fn pool_facing<'a>(&'a self, asset: &'a AssetInfo) -> Option<&'a AssetInfo> {
        match asset.role {
            BridgeRole::Native { wrapped } => self.by_id(wrapped),
            _ => Some(asset),
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hez() -> AssetInfo {
        AssetInfo::new(1, "HEZ", 12, BridgeRole::Native { wrapped: 2 })
    }

    fn whez() -> AssetInfo {
        AssetInfo::new(2, "wHEZ", 12, BridgeRole::Wrapped { native: 1 })
    }

    fn pez() -> AssetInfo {
        AssetInfo::new(3, "PEZ", 12, BridgeRole::Direct)
    }

    #[test]
    fn valid_registry_resolves_both_directions() {
        let registry = AssetRegistry::new(vec![hez(), whez(), pez()]).unwrap();

        assert_eq!(registry.by_symbol("HEZ").unwrap().id, 1);
        assert_eq!(registry.by_id(3).unwrap().symbol, "PEZ");

        let native = registry.by_symbol("HEZ").unwrap();
        assert_eq!(registry.pool_facing(native).unwrap().id, 2);

        let direct = registry.by_symbol("PEZ").unwrap();
        assert_eq!(registry.pool_facing(direct).unwrap().id, 3);
    }

    #[test]
    fn rejects_duplicate_symbol() {
        let dup = AssetInfo::new(9, "PEZ", 12, BridgeRole::Direct);
        let err = AssetRegistry::new(vec![pez(), dup]).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateSymbol {
                symbol: "PEZ".into()
            }
        );
    }

    #[test]
    fn rejects_native_without_registered_counterpart() {
        let err = AssetRegistry::new(vec![hez(), pez()]).unwrap_err();
        assert_eq!(
            err,
            RegistryError::MissingCounterpart {
                id: 1,
                counterpart: 2
            }
        );
    }

    #[test]
    fn rejects_one_sided_pairing() {
        // wHEZ claims a different native than the one pointing at it.
        let stray = AssetInfo::new(2, "wHEZ", 12, BridgeRole::Wrapped { native: 3 });
        let err = AssetRegistry::new(vec![hez(), stray, pez()]).unwrap_err();
        assert!(matches!(err, RegistryError::UnpairedBridge { .. }));
    }

    #[test]
    fn rejects_precision_mismatch_across_wrap() {
        let coarse = AssetInfo::new(2, "wHEZ", 6, BridgeRole::Wrapped { native: 1 });
        let err = AssetRegistry::new(vec![hez(), coarse]).unwrap_err();
        assert_eq!(
            err,
            RegistryError::BridgePrecisionMismatch {
                native: 1,
                wrapped: 2
            }
        );
    }
}
