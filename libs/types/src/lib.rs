//! # Pezdex Unified Types Library
//!
//! Shared type definitions for the pezdex swap engine: the asset registry,
//! pool and position snapshots consumed from the chain client, and the
//! precision boundary between human-entered decimal strings and integer
//! base-unit amounts.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: all financial amounts are stored as `u128` base
//!   units; decimal conversion happens exactly once, at the user-input and
//!   display boundary ([`precision`]).
//! - **Snapshots, Not State**: pool reserves, LP positions, and the asset
//!   registry are plain values handed in by the caller. The engine never
//!   owns chain state and never mutates a snapshot.
//! - **Data-Driven Bridging**: which symbols trade through a wrapped
//!   counterpart is encoded in [`asset::BridgeRole`], not in per-token
//!   branching logic.

pub mod asset;
pub mod pool;
pub mod position;
pub mod precision;

pub use asset::{AssetId, AssetInfo, AssetRegistry, BridgeRole, RegistryError};
pub use pool::{PoolSet, PoolSnapshot};
pub use position::LiquidityPosition;
pub use precision::{to_base_units, to_decimal_string, AmountError, DEFAULT_DISPLAY_DIGITS};
