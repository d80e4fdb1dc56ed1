//! Chain client collaborator
//!
//! The trade cycle controller talks to the chain only through the
//! `ChainClient` trait so the sequencing logic stays testable without RPC.
//! `RpcChainClient` is the production implementation: nonblocking Solana RPC
//! at confirmed commitment, versioned (v0) transactions, skip-preflight
//! submission.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::config::{
    RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcSendTransactionConfig,
};
use solana_rpc_client_api::filter::{Memcmp, RpcFilterType};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::{v0, VersionedMessage};
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::{Transaction, TransactionError, VersionedTransaction};
use tracing::{info, warn};

use crate::error::SubmitError;
use crate::instructions;

/// SPL token account size, used to filter getProgramAccounts
const TOKEN_ACCOUNT_LEN: u64 = 165;
/// Byte offset of the owner field inside an SPL token account
const TOKEN_ACCOUNT_OWNER_OFFSET: usize = 32;

/// One SPL token account held by the wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenHolding {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

/// Minimal chain contract the controller depends on
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Public key of the signing wallet
    fn payer(&self) -> Pubkey;

    /// Raw account bytes, `None` when the account does not exist
    async fn get_account_bytes(&self, address: &Pubkey) -> Result<Option<Vec<u8>>>;

    /// Idempotent: returns the wallet's associated token account for `mint`,
    /// creating it on chain first if absent
    async fn ensure_token_account(&self, mint: &Pubkey) -> Result<Pubkey>;

    /// Every SPL token account owned by the wallet
    async fn token_holdings(&self) -> Result<Vec<TokenHolding>>;

    /// Sign and submit one atomic transaction, fire-and-forget
    async fn submit(&self, instructions: &[Instruction]) -> Result<Signature, SubmitError>;
}

/// Production chain client over a Solana RPC endpoint
pub struct RpcChainClient {
    rpc: RpcClient,
    wallet: Keypair,
    commitment: CommitmentConfig,
}

impl RpcChainClient {
    pub fn new(rpc_endpoint: String, wallet: Keypair) -> Self {
        let commitment = CommitmentConfig::confirmed();
        Self {
            rpc: RpcClient::new_with_commitment(rpc_endpoint, commitment),
            wallet,
            commitment,
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    fn payer(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    async fn get_account_bytes(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await
            .with_context(|| format!("failed to fetch account {}", address))?;
        Ok(response.value.map(|account| account.data))
    }

    async fn ensure_token_account(&self, mint: &Pubkey) -> Result<Pubkey> {
        let owner = self.wallet.pubkey();
        let ata = instructions::ata_address(&owner, mint);

        if self.get_account_bytes(&ata).await?.is_some() {
            info!("Associated token account already exists: {}", ata);
            return Ok(ata);
        }

        info!("Creating associated token account {} for mint {}", ata, mint);
        let create_ix = instructions::build_create_ata_instruction(&owner, &owner, mint);
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .context("failed to fetch blockhash for ATA creation")?;
        let transaction = Transaction::new_signed_with_payer(
            &[create_ix],
            Some(&owner),
            &[&self.wallet],
            blockhash,
        );

        match self.rpc.send_and_confirm_transaction(&transaction).await {
            Ok(signature) => {
                info!("Associated token account created: {} ({})", ata, signature);
                Ok(ata)
            }
            Err(e) => {
                // another transaction may have created it first
                if self.get_account_bytes(&ata).await?.is_some() {
                    warn!("ATA creation raced but account exists: {}", ata);
                    Ok(ata)
                } else {
                    Err(anyhow!("failed to create associated token account: {}", e))
                }
            }
        }
    }

    async fn token_holdings(&self) -> Result<Vec<TokenHolding>> {
        let owner = self.wallet.pubkey();
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![
                RpcFilterType::DataSize(TOKEN_ACCOUNT_LEN),
                RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                    TOKEN_ACCOUNT_OWNER_OFFSET,
                    owner.as_ref(),
                )),
            ]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..Default::default()
            },
            ..Default::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(&spl_token::id(), config)
            .await
            .context("failed to enumerate token accounts")?;

        let mut holdings = Vec::with_capacity(accounts.len());
        for (address, account) in accounts {
            let token_account = spl_token::state::Account::unpack(&account.data)
                .with_context(|| format!("malformed token account {}", address))?;
            holdings.push(TokenHolding {
                address,
                mint: token_account.mint,
                amount: token_account.amount,
            });
        }
        Ok(holdings)
    }

    async fn submit(&self, ix: &[Instruction]) -> Result<Signature, SubmitError> {
        let payer = self.wallet.pubkey();
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| SubmitError::Rejected(format!("failed to fetch blockhash: {}", e)))?;

        let message = v0::Message::try_compile(&payer, ix, &[], blockhash)
            .map_err(|e| SubmitError::Rejected(format!("failed to compile message: {}", e)))?;
        let transaction =
            VersionedTransaction::try_new(VersionedMessage::V0(message), &[&self.wallet])
                .map_err(|e| SubmitError::Rejected(format!("failed to sign: {}", e)))?;

        self.rpc
            .send_transaction_with_config(
                &transaction,
                RpcSendTransactionConfig {
                    skip_preflight: true,
                    ..Default::default()
                },
            )
            .await
            .map_err(classify_submit_error)
    }
}

/// Map RPC client errors onto the submit taxonomy, surfacing expiry distinctly
fn classify_submit_error(err: ClientError) -> SubmitError {
    if matches!(
        err.get_transaction_error(),
        Some(TransactionError::BlockhashNotFound)
    ) {
        return SubmitError::Expired(err.to_string());
    }

    let message = err.to_string();
    if message.contains("BlockhashNotFound") || message.contains("block height exceeded") {
        SubmitError::Expired(message)
    } else {
        SubmitError::Rejected(message)
    }
}
