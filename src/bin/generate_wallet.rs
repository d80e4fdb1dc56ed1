use anyhow::Result;
use pump_cycle_bot::constants::DEFAULT_WALLET_FILE;
use pump_cycle_bot::wallet;
use solana_sdk::signer::Signer;
use std::path::PathBuf;

/// One-shot keypair generator: writes the base64 wallet file the bot reads
/// at startup and prints the public key to fund.
fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WALLET_FILE));

    let keypair = wallet::generate_wallet(&path)?;
    println!("Wallet written to {}", path.display());
    println!("Wallet public key: {}", keypair.pubkey());
    Ok(())
}
