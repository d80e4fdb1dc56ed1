//! Bonding curve cycle trader
//!
//! This library provides:
//! - Fixed-layout decoding of the PumpFun bonding curve account and the
//!   constant product buy quote over it
//! - Raw buy/sell instruction builders with priority fee attachment
//! - A chain client abstraction over the Solana RPC endpoint
//! - The trade cycle controller: buy on a fixed cadence, liquidate every
//!   holding after a configured number of successful buys, forever

pub mod bonding_curve;
pub mod chain_client;
pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod trade_cycle;
pub mod wallet;

// Re-export main types for convenience
pub use bonding_curve::{BondingCurveAccount, BONDING_CURVE_ACCOUNT_LEN};
pub use chain_client::{ChainClient, RpcChainClient, TokenHolding};
pub use config::BotConfig;
pub use error::{CurveStateError, DecodeError, SubmitError, TradeError};
pub use instructions::CurveAccounts;
pub use trade_cycle::{CycleOutcome, CyclePhase, LiquidationReport, TradeCycleController};
