//! Swap session state machine
//!
//! One short-lived session per active trade, driven by the host's event
//! loop: `Idle -> Quoting -> Confirming -> Submitting -> Settled | Failed`.
//! Quoting is synchronous, so "in-flight" quotes are simply superseded by
//! the next input event (last write wins). Confirmation re-quotes against
//! the freshest snapshot so a stale minimum-output bound is never handed
//! to the wallet. Once a trade is submitting, it cannot be cancelled:
//! signing and broadcast are the point of no return.

use crate::engine::{EngineError, SwapEngine, SwapQuote};
use crate::planner::RoutePlan;
use pezdex_types::PoolSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Lifecycle phase of a swap session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Quoting,
    Confirming,
    Submitting,
    Settled,
    Failed,
}

/// The input tuple a quote is derived from. Any change supersedes the
/// current quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapInput {
    pub from_symbol: String,
    pub to_symbol: String,
    /// User-entered decimal amount of the from-asset.
    pub amount_in: String,
}

/// Why a submitted trade did not settle, as reported by the wallet
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FailureReason {
    #[error("dispatch failed: {detail}")]
    Dispatch { detail: String },

    #[error("confirmation timed out")]
    Timeout,

    #[error("user rejected signing")]
    SigningRejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("event {event:?} is not valid in phase {from:?}")]
    InvalidTransition {
        from: SessionPhase,
        event: &'static str,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Mutable state for one trade attempt.
///
/// Holds the current phase plus the quote and plan backing it. Engine
/// failures while quoting keep the session in `Quoting` with the error
/// recorded; only collaborator-reported outcomes reach the terminal
/// phases.
#[derive(Debug, Default)]
pub struct SwapSession {
    phase: SessionPhase,
    input: Option<SwapInput>,
    quote: Option<SwapQuote>,
    plan: Option<RoutePlan>,
    last_error: Option<EngineError>,
    failure: Option<FailureReason>,
}

impl SwapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn input(&self) -> Option<&SwapInput> {
        self.input.as_ref()
    }

    pub fn quote(&self) -> Option<&SwapQuote> {
        self.quote.as_ref()
    }

    pub fn plan(&self) -> Option<&RoutePlan> {
        self.plan.as_ref()
    }

    /// Most recent recoverable quoting error, if the current input does
    /// not quote cleanly.
    pub fn last_error(&self) -> Option<&EngineError> {
        self.last_error.as_ref()
    }

    /// Terminal failure reported by the wallet collaborator.
    pub fn failure(&self) -> Option<&FailureReason> {
        self.failure.as_ref()
    }

    /// Apply an input change and quote it against the given snapshot.
    ///
    /// Valid in `Idle` and `Quoting`. The previous quote and plan are
    /// discarded before the new computation runs, so whatever the caller
    /// observes afterwards always reflects the latest input.
    pub fn update_input(
        &mut self,
        engine: &SwapEngine,
        pools: &PoolSet,
        input: SwapInput,
    ) -> Result<SwapQuote, SessionError> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Quoting => {}
            from => {
                return Err(SessionError::InvalidTransition {
                    from,
                    event: "update_input",
                })
            }
        }

        self.phase = SessionPhase::Quoting;
        self.quote = None;
        self.plan = None;
        self.last_error = None;

        let outcome = self.requote(engine, pools, &input);
        self.input = Some(input);
        outcome
    }

    /// Move a successfully quoted trade into review.
    pub fn begin_review(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Quoting || self.quote.is_none() || self.plan.is_none() {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                event: "begin_review",
            });
        }
        self.phase = SessionPhase::Confirming;
        Ok(())
    }

    /// Confirm the reviewed trade and hand its plan to the caller for
    /// submission.
    ///
    /// Reserves may have moved since review, so the trade is re-quoted
    /// against `pools` and the refreshed plan is what gets submitted. A
    /// re-quote failure keeps the session in `Confirming` for the user to
    /// cancel or retry.
    pub fn confirm(
        &mut self,
        engine: &SwapEngine,
        pools: &PoolSet,
    ) -> Result<RoutePlan, SessionError> {
        if self.phase != SessionPhase::Confirming {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                event: "confirm",
            });
        }
        let input = match self.input.clone() {
            Some(input) => input,
            None => {
                return Err(SessionError::InvalidTransition {
                    from: self.phase,
                    event: "confirm",
                })
            }
        };

        self.requote(engine, pools, &input)?;
        let plan = match self.plan.clone() {
            Some(plan) => plan,
            None => {
                return Err(SessionError::InvalidTransition {
                    from: self.phase,
                    event: "confirm",
                })
            }
        };

        self.phase = SessionPhase::Submitting;
        info!(
            from = %input.from_symbol,
            to = %input.to_symbol,
            steps = plan.steps.len(),
            "trade confirmed; handing plan to wallet"
        );
        Ok(plan)
    }

    /// Record collaborator-reported inclusion.
    pub fn record_settled(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Submitting {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                event: "record_settled",
            });
        }
        self.phase = SessionPhase::Settled;
        info!("trade settled");
        Ok(())
    }

    /// Record a collaborator-reported dispatch failure, timeout, or
    /// signing rejection.
    pub fn record_failure(&mut self, reason: FailureReason) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Submitting {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                event: "record_failure",
            });
        }
        warn!(%reason, "trade failed");
        self.phase = SessionPhase::Failed;
        self.failure = Some(reason);
        Ok(())
    }

    /// User-initiated cancel: allowed from every phase except
    /// `Submitting`, which cannot be recalled once the wallet has it.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.clear("cancel")
    }

    /// Explicit return to `Idle` from a terminal phase (or anywhere short
    /// of submission) to start a new trade.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.clear("reset")
    }

    fn clear(&mut self, event: &'static str) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Submitting {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                event,
            });
        }
        *self = Self::default();
        Ok(())
    }

    /// Quote-and-plan for `input`, storing either the results or the
    /// recoverable error on the session.
    fn requote(
        &mut self,
        engine: &SwapEngine,
        pools: &PoolSet,
        input: &SwapInput,
    ) -> Result<SwapQuote, SessionError> {
        let attempt = engine
            .quote(pools, &input.from_symbol, &input.to_symbol, &input.amount_in)
            .and_then(|quote| {
                let plan = engine.plan(
                    pools,
                    &input.from_symbol,
                    &input.to_symbol,
                    quote.amount_in,
                )?;
                Ok((quote, plan))
            });

        match attempt {
            Ok((quote, plan)) => {
                self.quote = Some(quote.clone());
                self.plan = Some(plan);
                self.last_error = None;
                Ok(quote)
            }
            Err(error) => {
                self.quote = None;
                self.plan = None;
                self.last_error = Some(error.clone());
                Err(SessionError::Engine(error))
            }
        }
    }
}
