//! # Pezdex AMM Library - Constant-Product Mathematics Engine
//!
//! ## Purpose
//!
//! Pure mathematical core for the pezdex swap engine: constant-product
//! pricing, liquidity-withdrawal safety bounds, and impermanent-loss
//! estimation. All trade amounts are integer base units (`u128`) with
//! flooring division throughout, so a quote can never promise more than
//! the pool will pay out; percentages and rates are reported as `Decimal`.
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve and position snapshots from `pezdex-types`,
//!   trade parameters from the route planner and session layer
//! - **Output Destinations**: swap engine facade, route planner, UI-facing
//!   withdrawal and loss estimators
//! - **Precision**: native base-unit precision preserved end to end; no
//!   floating point anywhere in the financial path
//!
//! Every function here is synchronous, side-effect-free, and safe to call
//! concurrently; errors are always recoverable by adjusting the input.

pub mod cp_math;
pub mod il;
pub mod liquidity;

pub use cp_math::{CpMath, QuoteError};
pub use il::{impermanent_loss, LossError};
pub use liquidity::{
    amounts_for_withdrawal, estimated_lp_supply, max_removable_percent, pool_apr_pct,
    share_of_pool_pct, underlying_amounts, LiquidityError, WithdrawalAmounts,
};

/// Common types for AMM calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
