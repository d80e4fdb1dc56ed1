//! Environment-driven bot configuration
//!
//! Every trading constant observed in production (spend size, buy threshold,
//! pacing, priority fees, sell safety margin) is overridable here rather than
//! hardcoded at the call sites.

use anyhow::{anyhow, Context, Result};
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::*;

/// Runtime configuration for the cycle bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// HTTP RPC endpoint (SOLANA_RPC_NODE_1)
    pub rpc_endpoint: String,
    /// Mint of the token traded against its bonding curve (TARGET_MINT)
    pub target_mint: Pubkey,
    /// Wallet file path, used when WALLET_PRIVATE_KEY is unset
    pub wallet_file: PathBuf,
    /// Lamports spent on every buy iteration
    pub spend_lamports: u64,
    /// Successful buys before a full liquidation pass
    pub buy_threshold: u32,
    /// Delay between loop iterations
    pub pacing: Duration,
    /// Compute unit price for buy transactions (micro-lamports)
    pub buy_priority_fee: u64,
    /// Compute unit price for sell transactions (micro-lamports)
    pub sell_priority_fee: u64,
    /// Lamports allowed above the spend as the buy max_sol_cost
    pub max_sol_cost_padding: u64,
    /// Base units withheld from each full-balance sell
    pub sell_safety_margin: u64,
    /// Abort the liquidation pass on the first per-account failure
    pub strict_liquidation: bool,
}

impl BotConfig {
    /// Load configuration from environment variables (.env honored)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let rpc_endpoint = env::var("SOLANA_RPC_NODE_1")
            .unwrap_or_else(|_| DEFAULT_RPC_ENDPOINT.to_string());

        let target_mint = env::var("TARGET_MINT")
            .map_err(|_| anyhow!("TARGET_MINT environment variable required"))?;
        let target_mint = Pubkey::from_str(&target_mint)
            .with_context(|| format!("TARGET_MINT is not a valid pubkey: {}", target_mint))?;

        let wallet_file =
            PathBuf::from(env::var("WALLET_FILE").unwrap_or_else(|_| DEFAULT_WALLET_FILE.into()));

        Ok(Self {
            rpc_endpoint,
            target_mint,
            wallet_file,
            spend_lamports: env_u64("SPEND_LAMPORTS", DEFAULT_SPEND_LAMPORTS)?,
            buy_threshold: env_u32("BUY_THRESHOLD", DEFAULT_BUY_THRESHOLD)?,
            pacing: Duration::from_millis(env_u64("PACING_MS", DEFAULT_PACING_MS)?),
            buy_priority_fee: env_u64("BUY_PRIORITY_FEE", DEFAULT_BUY_PRIORITY_FEE)?,
            sell_priority_fee: env_u64("SELL_PRIORITY_FEE", DEFAULT_SELL_PRIORITY_FEE)?,
            max_sol_cost_padding: env_u64(
                "MAX_SOL_COST_PADDING",
                DEFAULT_MAX_SOL_COST_PADDING,
            )?,
            sell_safety_margin: env_u64("SELL_SAFETY_MARGIN", DEFAULT_SELL_SAFETY_MARGIN)?,
            strict_liquidation: env::var("STRICT_LIQUIDATION")
                .map(|v| v.parse::<bool>().unwrap_or(false))
                .unwrap_or(false),
        })
        .and_then(Self::validate)
    }

    fn validate(self) -> Result<Self> {
        if self.spend_lamports == 0 {
            return Err(anyhow!("SPEND_LAMPORTS must be positive"));
        }
        if self.buy_threshold == 0 {
            return Err(anyhow!("BUY_THRESHOLD must be positive"));
        }
        Ok(self)
    }

    /// Fixed test configuration, no environment access
    #[cfg(test)]
    pub fn for_tests(target_mint: Pubkey) -> Self {
        Self {
            rpc_endpoint: DEFAULT_RPC_ENDPOINT.to_string(),
            target_mint,
            wallet_file: PathBuf::from(DEFAULT_WALLET_FILE),
            spend_lamports: DEFAULT_SPEND_LAMPORTS,
            buy_threshold: DEFAULT_BUY_THRESHOLD,
            pacing: Duration::from_millis(0),
            buy_priority_fee: DEFAULT_BUY_PRIORITY_FEE,
            sell_priority_fee: DEFAULT_SELL_PRIORITY_FEE,
            max_sol_cost_padding: DEFAULT_MAX_SOL_COST_PADDING,
            sell_safety_margin: DEFAULT_SELL_SAFETY_MARGIN,
            strict_liquidation: false,
        }
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{} must be an unsigned integer, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

fn env_u32(name: &str, default: u32) -> Result<u32> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("{} must be an unsigned integer, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
