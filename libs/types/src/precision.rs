//! Decimal string <-> base unit conversion
//!
//! The one place where human-entered decimal strings meet integer base
//! units. Everything past this boundary works in `u128` base units so the
//! constant-product math never touches floating point or loses precision.
//!
//! ## Rules
//!
//! - Parsing truncates excess fractional digits toward zero, never rounds.
//! - Display truncates toward zero as well, so a rendered balance never
//!   exceeds what the user actually holds.
//! - Round trip never inflates: `to_base_units(to_decimal_string(x, p, p), p) <= x`.

use thiserror::Error;

/// Fractional digits shown by default in balance displays.
pub const DEFAULT_DISPLAY_DIGITS: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: &'static str },

    #[error("amount does not fit in 128-bit base units")]
    AmountOverflow,
}

/// Parse a non-negative decimal string into base units at `precision`
/// fractional digits.
///
/// Fractional digits beyond `precision` are truncated (the user cannot
/// spend value the asset cannot represent). Signs, exponents, and anything
/// but ASCII digits around a single optional point are rejected.
pub fn to_base_units(input: &str, precision: u8) -> Result<u128, AmountError> {
    let invalid = |reason: &'static str| AmountError::InvalidAmount {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty string"));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };

    if frac_part.contains('.') {
        return Err(invalid("more than one decimal point"));
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid("no digits"));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("expected only digits and one decimal point"));
    }

    let scale = 10u128
        .checked_pow(u32::from(precision))
        .ok_or(AmountError::AmountOverflow)?;

    let int_units = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse::<u128>()
            .map_err(|_| AmountError::AmountOverflow)?
    };

    // Truncate, never round: digits past the asset's precision are dropped.
    let kept = &frac_part[..frac_part.len().min(precision as usize)];
    let frac_units = if kept.is_empty() {
        0
    } else {
        let digits = kept
            .parse::<u128>()
            .map_err(|_| AmountError::AmountOverflow)?;
        let pad = 10u128
            .checked_pow((precision as usize - kept.len()) as u32)
            .ok_or(AmountError::AmountOverflow)?;
        digits
            .checked_mul(pad)
            .ok_or(AmountError::AmountOverflow)?
    };

    int_units
        .checked_mul(scale)
        .and_then(|units| units.checked_add(frac_units))
        .ok_or(AmountError::AmountOverflow)
}

/// Render base units as a decimal string with exactly `display_digits`
/// fractional digits (none when zero), flooring toward zero.
///
/// Never fails: the split is done on the digit string itself, so any
/// `u128` at any precision formats cleanly.
pub fn to_decimal_string(amount: u128, precision: u8, display_digits: u8) -> String {
    let digits = amount.to_string();
    let precision = precision as usize;

    let (int_part, frac_part) = if digits.len() > precision {
        let split = digits.len() - precision;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{digits:0>precision$}"))
    };

    if display_digits == 0 {
        return int_part;
    }

    let mut shown = frac_part;
    shown.truncate(display_digits as usize);
    let width = display_digits as usize;
    format!("{int_part}.{shown:0<width$}")
}
