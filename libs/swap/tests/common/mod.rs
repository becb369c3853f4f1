//! Shared fixtures mirroring the ledger this engine was built against:
//! native HEZ bridged through wHEZ, with PEZ and USDT trading directly.
#![allow(dead_code)]

use pezdex_types::{AssetInfo, AssetRegistry, BridgeRole, PoolSet, PoolSnapshot};

pub const HEZ: u32 = 1;
pub const WHEZ: u32 = 2;
pub const PEZ: u32 = 3;
pub const USDT: u32 = 4;

pub fn registry() -> AssetRegistry {
    AssetRegistry::new(vec![
        AssetInfo::new(HEZ, "HEZ", 12, BridgeRole::Native { wrapped: WHEZ }),
        AssetInfo::new(WHEZ, "wHEZ", 12, BridgeRole::Wrapped { native: HEZ }),
        AssetInfo::new(PEZ, "PEZ", 12, BridgeRole::Direct),
        AssetInfo::new(USDT, "USDT", 6, BridgeRole::Direct),
    ])
    .expect("fixture registry is valid")
}

/// wHEZ/PEZ at 1:2 and PEZ/USDT pools, both 0.3% fee.
pub fn pools() -> PoolSet {
    let mut set = PoolSet::new();
    set.insert(PoolSnapshot::new(
        WHEZ,
        PEZ,
        1_000_000_000_000_000,
        2_000_000_000_000_000,
        30,
    ));
    set.insert(PoolSnapshot::new(
        PEZ,
        USDT,
        5_000_000_000_000_000,
        10_000_000_000,
        30,
    ));
    set
}
