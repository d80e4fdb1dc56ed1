//! Error taxonomy for the cycle bot
//!
//! Decode and pricing failures are fatal to the current iteration only; the
//! run loop catches them at the iteration boundary and keeps going.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Malformed or unexpected bonding curve account bytes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("account data too short: {got} bytes, expected at least {expected}")]
    TooShort { got: usize, expected: usize },

    #[error("unexpected account discriminator: {0:02x?}")]
    BadDiscriminator([u8; 8]),
}

/// Curve state under which the pricing formula is undefined
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurveStateError {
    #[error("virtual reserves are zero, price is undefined")]
    ZeroReserves,

    #[error("bonding curve is complete, trades no longer price through the curve")]
    CurveComplete,
}

/// Transaction submission failures, expiry surfaced distinctly
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("transaction expired before landing: {0}")]
    Expired(String),

    #[error("transaction submission rejected: {0}")]
    Rejected(String),
}

/// Per-iteration failure of the trade cycle
#[derive(Debug, Error)]
pub enum TradeError {
    #[error("bonding curve account {0} not found")]
    CurveUnavailable(Pubkey),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Curve(#[from] CurveStateError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error("rpc request failed: {0}")]
    Rpc(anyhow::Error),
}

impl From<anyhow::Error> for TradeError {
    fn from(err: anyhow::Error) -> Self {
        TradeError::Rpc(err)
    }
}
