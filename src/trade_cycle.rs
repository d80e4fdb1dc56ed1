//! Trade cycle controller
//!
//! Drives the indefinite buy/sell cycle: fetch the bonding curve, quote a
//! fixed spend, submit one buy transaction per iteration, and after a
//! configured number of successful buys liquidate every token balance the
//! wallet holds. Two logical phases, `Buying` and `Liquidating`, plus the
//! buy counter; no other state survives an iteration.
//!
//! Retry policy is intentionally unbounded with no backoff: every
//! per-iteration failure is logged at the loop boundary and the loop
//! continues at the fixed pacing interval.

use anyhow::{anyhow, Context, Result};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use tracing::{error, info, warn};

use crate::bonding_curve::BondingCurveAccount;
use crate::chain_client::ChainClient;
use crate::config::BotConfig;
use crate::constants::lamports_to_sol;
use crate::error::TradeError;
use crate::instructions::{
    self, build_buy_instruction, build_sell_instruction, priority_fee_instruction, CurveAccounts,
};

/// Logical phase of the cycle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Buying,
    Liquidating,
}

/// Aggregated result of one liquidation pass
#[derive(Debug, Default)]
pub struct LiquidationReport {
    /// Signatures of submitted sell transactions
    pub submitted: Vec<Signature>,
    /// Accounts skipped for zero (or sub-margin) balances
    pub skipped: u32,
    /// Per-account failures that did not stop the pass
    pub failures: Vec<(Pubkey, TradeError)>,
}

/// Observable result of one loop iteration
#[derive(Debug)]
pub enum CycleOutcome {
    /// Buy submitted, threshold not yet reached
    Bought(Signature),
    /// Buy submitted and a full liquidation pass completed
    Liquidated(Signature, LiquidationReport),
    /// Buy submitted but the liquidation pass aborted; the counter is kept
    /// so the pass is retried after the next successful buy
    LiquidationFailed(Signature, TradeError),
    /// The iteration failed; the loop logs and continues
    Failed(TradeError),
}

/// Sequences account resolution, pricing, transaction construction and
/// submission over an injected chain client
pub struct TradeCycleController<C: ChainClient> {
    client: C,
    config: BotConfig,
    curve: CurveAccounts,
    associated_user: Pubkey,
    phase: CyclePhase,
    successful_buys: u32,
}

impl<C: ChainClient> TradeCycleController<C> {
    /// Resolve protocol accounts and prepare the wallet's token account.
    ///
    /// Fails fast when the target mint or the program's global config
    /// account is missing; those are setup errors, not iteration errors.
    pub async fn initialize(client: C, config: BotConfig) -> Result<Self> {
        let mint = config.target_mint;

        client
            .get_account_bytes(&mint)
            .await?
            .ok_or_else(|| anyhow!("target mint {} not found on chain", mint))?;

        let curve = CurveAccounts::derive(mint);
        client
            .get_account_bytes(&curve.global)
            .await?
            .ok_or_else(|| anyhow!("global account {} not found", curve.global))?;

        let associated_user = client
            .ensure_token_account(&mint)
            .await
            .context("failed to prepare the wallet's associated token account")?;

        info!("Trading wallet: {}", client.payer());
        info!("Bonding curve: {}", curve.bonding_curve);
        info!("Associated bonding curve: {}", curve.associated_bonding_curve);
        info!("Associated user: {}", associated_user);

        Ok(Self {
            client,
            config,
            curve,
            associated_user,
            phase: CyclePhase::Buying,
            successful_buys: 0,
        })
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn successful_buys(&self) -> u32 {
        self.successful_buys
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// One buy: fetch curve state, quote the fixed spend, submit the buy
    /// plus priority fee as a single atomic transaction. Fire-and-forget,
    /// no confirmation wait.
    pub async fn run_buy_iteration(&self) -> Result<Signature, TradeError> {
        let spend = self.config.spend_lamports;

        let bytes = self
            .client
            .get_account_bytes(&self.curve.bonding_curve)
            .await?
            .ok_or(TradeError::CurveUnavailable(self.curve.bonding_curve))?;
        let account = BondingCurveAccount::decode(&bytes)?;

        let token_amount = account.buy_quote(spend)?;
        let max_sol_cost = spend + self.config.max_sol_cost_padding;
        info!(
            "Buying {} tokens for {} SOL (max cost {} lamports)",
            token_amount,
            lamports_to_sol(spend),
            max_sol_cost
        );

        let ix = [
            build_buy_instruction(
                &self.curve,
                &self.client.payer(),
                &self.associated_user,
                token_amount,
                max_sol_cost,
            ),
            priority_fee_instruction(self.config.buy_priority_fee),
        ];

        let signature = self.client.submit(&ix).await?;
        info!("Buy submitted: {}", signature);
        Ok(signature)
    }

    /// Sell the full balance (minus the safety margin) of every token
    /// account the wallet holds, each as an independent transaction.
    ///
    /// Per-account failures are collected and do not stop the pass unless
    /// `strict_liquidation` is set.
    pub async fn liquidate_all(&self) -> Result<LiquidationReport, TradeError> {
        let holdings = self.client.token_holdings().await?;
        let mut report = LiquidationReport::default();

        if holdings.is_empty() {
            info!("No token accounts found to sell");
            return Ok(report);
        }

        for holding in holdings {
            let amount = holding.amount.saturating_sub(self.config.sell_safety_margin);
            if holding.amount == 0 || amount == 0 {
                info!(
                    "Skipping token account {} (balance {})",
                    holding.address, holding.amount
                );
                report.skipped += 1;
                continue;
            }

            let ix = [
                build_sell_instruction(
                    &self.curve,
                    &self.client.payer(),
                    &instructions::ata_address(&self.client.payer(), &holding.mint),
                    amount,
                    0,
                ),
                priority_fee_instruction(self.config.sell_priority_fee),
            ];

            match self.client.submit(&ix).await {
                Ok(signature) => {
                    info!(
                        "Sell submitted for {} ({} units): {}",
                        holding.address, amount, signature
                    );
                    report.submitted.push(signature);
                }
                Err(e) => {
                    warn!("Sell failed for {}: {}", holding.address, e);
                    if self.config.strict_liquidation {
                        return Err(e.into());
                    }
                    report.failures.push((holding.address, e.into()));
                }
            }
        }

        Ok(report)
    }

    /// One full loop iteration: buy, and liquidate when the threshold is
    /// reached. The counter only resets after a completed liquidation pass,
    /// so a failed pass is retried after the next successful buy.
    pub async fn step(&mut self) -> CycleOutcome {
        let buy_signature = match self.run_buy_iteration().await {
            Ok(signature) => signature,
            Err(e) => return CycleOutcome::Failed(e),
        };

        self.successful_buys += 1;
        info!("Number of successful buys: {}", self.successful_buys);

        if self.successful_buys < self.config.buy_threshold {
            return CycleOutcome::Bought(buy_signature);
        }

        self.phase = CyclePhase::Liquidating;
        let result = self.liquidate_all().await;
        self.phase = CyclePhase::Buying;

        match result {
            Ok(report) => {
                info!(
                    "Liquidation pass done: {} sold, {} skipped, {} failed",
                    report.submitted.len(),
                    report.skipped,
                    report.failures.len()
                );
                self.successful_buys = 0;
                CycleOutcome::Liquidated(buy_signature, report)
            }
            Err(e) => CycleOutcome::LiquidationFailed(buy_signature, e),
        }
    }

    /// Run forever. Every failure is logged and the loop continues; only
    /// process termination stops it.
    pub async fn run(&mut self) -> ! {
        info!(
            "Cycle started: spend {} SOL, threshold {} buys, pacing {:?}",
            lamports_to_sol(self.config.spend_lamports),
            self.config.buy_threshold,
            self.config.pacing
        );

        loop {
            match self.step().await {
                CycleOutcome::Bought(signature) => {
                    info!("Iteration complete: {}", signature);
                }
                CycleOutcome::Liquidated(signature, _) => {
                    info!("Iteration complete with liquidation: {}", signature);
                }
                CycleOutcome::LiquidationFailed(signature, e) => {
                    error!("Buy {} landed but liquidation aborted: {}", signature, e);
                }
                CycleOutcome::Failed(e) => {
                    error!("Iteration failed: {}", e);
                }
            }

            tokio::time::sleep(self.config.pacing).await;
        }
    }
}
