//! Wallet file handling
//!
//! The bot signs with a single keypair persisted as a JSON wallet file
//! holding the base64-encoded 64-byte secret key. A base58
//! `WALLET_PRIVATE_KEY` environment variable is accepted as an alternative
//! for deployments that avoid key files.

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
struct WalletFile {
    #[serde(rename = "privateKey")]
    private_key: String,
}

/// Load a keypair from a base64 wallet file
pub fn load_wallet(path: &Path) -> Result<Keypair> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read wallet file {}", path.display()))?;
    let wallet: WalletFile =
        serde_json::from_str(&raw).context("wallet file is not valid JSON")?;

    let secret = BASE64
        .decode(&wallet.private_key)
        .context("wallet privateKey is not valid base64")?;
    keypair_from_secret(&secret)
}

/// Load a keypair from a base58-encoded private key string
pub fn keypair_from_base58(private_key: &str) -> Result<Keypair> {
    let secret = bs58::decode(private_key)
        .into_vec()
        .map_err(|e| anyhow!("failed to decode base58 private key: {}", e))?;
    keypair_from_secret(&secret)
}

/// Resolve the signing wallet: WALLET_PRIVATE_KEY env first, file second
pub fn resolve_wallet(path: &Path) -> Result<Keypair> {
    if let Ok(key) = std::env::var("WALLET_PRIVATE_KEY") {
        let wallet = keypair_from_base58(&key)?;
        info!("Wallet loaded from environment: {}", wallet.pubkey());
        return Ok(wallet);
    }

    let wallet = load_wallet(path)?;
    info!(
        "Wallet loaded from {}: {}",
        path.display(),
        wallet.pubkey()
    );
    Ok(wallet)
}

/// Generate a fresh keypair and persist it as a base64 wallet file
pub fn generate_wallet(path: &Path) -> Result<Keypair> {
    let wallet = Keypair::new();
    let contents = serde_json::to_string(&WalletFile {
        private_key: BASE64.encode(wallet.to_bytes()),
    })?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write wallet file {}", path.display()))?;
    Ok(wallet)
}

fn keypair_from_secret(secret: &[u8]) -> Result<Keypair> {
    if secret.len() != 64 {
        return Err(anyhow!(
            "invalid private key length: expected 64 bytes, got {}",
            secret.len()
        ));
    }
    Keypair::from_bytes(secret).map_err(|e| anyhow!("failed to build keypair from bytes: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_wallet_round_trips_through_file() {
        let dir = std::env::temp_dir().join(format!("cycle-bot-wallet-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("wallet.json");

        let generated = generate_wallet(&path).unwrap();
        let loaded = load_wallet(&path).unwrap();
        assert_eq!(generated.pubkey(), loaded.pubkey());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn keypair_from_base58_round_trips() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        let decoded = keypair_from_base58(&encoded).unwrap();
        assert_eq!(keypair.pubkey(), decoded.pubkey());
    }

    #[test]
    fn rejects_short_secret() {
        assert!(keypair_from_secret(&[0u8; 32]).is_err());
    }
}
