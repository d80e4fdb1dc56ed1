use anyhow::Result;
use pump_cycle_bot::{wallet, BotConfig, RpcChainClient, TradeCycleController};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("Starting bonding curve cycle bot");

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    info!("Configuration loaded:");
    info!("  RPC endpoint: {}", config.rpc_endpoint);
    info!("  Target mint: {}", config.target_mint);
    info!("  Spend per buy: {} lamports", config.spend_lamports);
    info!("  Buy threshold: {}", config.buy_threshold);
    info!("  Pacing: {:?}", config.pacing);

    let keypair = wallet::resolve_wallet(&config.wallet_file)?;
    let client = RpcChainClient::new(config.rpc_endpoint.clone(), keypair);

    let mut controller = match TradeCycleController::initialize(client, config).await {
        Ok(controller) => controller,
        Err(e) => {
            error!("Setup failed: {}", e);
            return Err(e);
        }
    };

    // Runs until the process is terminated
    controller.run().await
}
