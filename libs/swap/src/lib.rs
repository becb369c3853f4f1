//! # Pezdex Swap Library - Route Planning and Trade Sessions
//!
//! ## Purpose
//!
//! The decision layer of the pezdex engine: expands a logical
//! symbol-to-symbol trade into the chain of elementary operations the
//! ledger actually accepts (wrap, swap, unwrap), and drives one trade's
//! lifecycle from quoting through confirmation to settlement. Pricing
//! itself lives in `pezdex-amm`; this crate decides *what* to submit and
//! *when* submission is allowed.
//!
//! ## Integration Points
//!
//! - **Input Sources**: asset registry and reserve snapshots from
//!   `pezdex-types`, quotes from `pezdex-amm`, user input events from the
//!   host application
//! - **Output Destinations**: route plans handed to the wallet/submission
//!   collaborator, session phase changes rendered by the UI
//! - **State Dependencies**: none beyond the explicit [`SwapSession`]
//!   value; every computation takes its snapshots as arguments
//!
//! ## Architecture Role
//!
//! ```text
//! User Input → [SwapEngine::quote] → [RoutePlanner::plan] → [SwapSession]
//!      ↓              ↓                      ↓                   ↓
//! Symbols/Amount  Constant-Product     Wrap/Swap/Unwrap    Phase Tracking
//! Decimal Entry   Pricing + Impact     Operation Chain     Confirm Gate
//! ```
//!
//! Submission itself (signing, broadcast, inclusion) belongs to the host's
//! wallet collaborator; the session only records its reported outcome.

pub mod config;
pub mod engine;
pub mod planner;
pub mod session;

pub use config::{ConfigError, EngineConfig};
pub use engine::{EngineError, SwapEngine, SwapQuote};
pub use planner::{RouteError, RoutePlan, RoutePlanner, RouteStep};
pub use session::{FailureReason, SessionError, SessionPhase, SwapInput, SwapSession};
