/// Global constants for the bonding curve cycle bot
///
/// This module centralizes program addresses, PDA seeds, instruction
/// discriminators and trading policy defaults so they are never duplicated
/// across modules.

// ============================================================================
// SOLANA BLOCKCHAIN CONSTANTS
// ============================================================================

/// 1 SOL = 1 billion lamports
pub const SOL_DECIMALS: u64 = 1_000_000_000;

/// Convert lamports to SOL (floating point, display only)
pub const fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / SOL_DECIMALS as f64
}

// ============================================================================
// PUMPFUN PROGRAM CONSTANTS
// ============================================================================

/// PumpFun bonding curve program ID
pub const PUMPFUN_PROGRAM_ID: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";

/// Protocol fee recipient account
pub const PUMPFUN_FEE_RECIPIENT: &str = "CebN5WGQ4jvEPvsVU4EoHEpgzq1VV7AbicfhtW4xC9iM";

/// Event authority PDA used by the program's CPI event log
pub const PUMPFUN_EVENT_AUTHORITY: &str = "Ce6TQqeHC9p8KetsN6JsjHK7UTZk7nasjjnr7XxXp9F1";

/// Associated Token Program ID (well-known constant)
pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

/// Seed for the per-mint bonding curve PDA
pub const BONDING_CURVE_SEED: &[u8] = b"bonding-curve";

/// Seed for the program-wide global config PDA
pub const GLOBAL_SEED: &[u8] = b"global";

/// Anchor account discriminator for the BondingCurve account
pub const BONDING_CURVE_DISCRIMINATOR: [u8; 8] = [0x17, 0xb7, 0xf8, 0x37, 0x60, 0xd8, 0xac, 0x60];

/// Anchor instruction discriminator for `buy`
pub const BUY_IX_DISCRIMINATOR: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];

/// Anchor instruction discriminator for `sell`
pub const SELL_IX_DISCRIMINATOR: [u8; 8] = [51, 230, 133, 164, 1, 127, 131, 173];

// ============================================================================
// TRADING POLICY DEFAULTS (overridable via environment, see config.rs)
// ============================================================================

/// SOL spent per buy iteration (0.020 SOL)
pub const DEFAULT_SPEND_LAMPORTS: u64 = 20_000_000;

/// Successful buys before a full liquidation pass
pub const DEFAULT_BUY_THRESHOLD: u32 = 2;

/// Pacing delay between loop iterations
pub const DEFAULT_PACING_MS: u64 = 2_500;

/// Compute unit price attached to buy transactions (micro-lamports)
pub const DEFAULT_BUY_PRIORITY_FEE: u64 = 400_000;

/// Compute unit price attached to sell transactions (micro-lamports)
pub const DEFAULT_SELL_PRIORITY_FEE: u64 = 600_000;

/// Extra lamports allowed above the quoted spend (max_sol_cost padding)
pub const DEFAULT_MAX_SOL_COST_PADDING: u64 = 20_000;

/// Base units withheld from each full-balance sell
pub const DEFAULT_SELL_SAFETY_MARGIN: u64 = 1_000;

/// Default wallet file path (base64-encoded secret key, JSON)
pub const DEFAULT_WALLET_FILE: &str = "wallet.json";

/// Default RPC endpoint when SOLANA_RPC_NODE_1 is unset
pub const DEFAULT_RPC_ENDPOINT: &str = "https://api.mainnet-beta.solana.com";
