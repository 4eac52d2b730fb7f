//! tokengate binary: wire the engine and run until signalled.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use tokengate::chain::{ChainClient, ChainQuery};
use tokengate::config::loader::load_config;
use tokengate::identity::BindingStore;
use tokengate::lifecycle::{shutdown_on_signal, Shutdown};
use tokengate::observability::{logging, metrics};
use tokengate::platform::{ChannelId, LoggingPlatform, RoleId, RolePlatform};
use tokengate::reconcile::Reconciler;
use tokengate::verify::{ProofPolicy, VerificationWorkflow};

#[derive(Debug, Parser)]
#[command(name = "tokengate", version, about = "NFT-gated role verification engine")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "tokengate.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!(config = %args.config.display(), "tokengate v0.1.0 starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let contract = config.verification.contract_address.parse()?;
    let client = ChainClient::new(config.chain.clone(), contract).await?;
    if !client.is_healthy().await {
        tracing::warn!("chain unreachable at startup, continuing degraded");
    }
    let chain: Arc<dyn ChainQuery> = Arc::new(client);

    let store = BindingStore::new();
    let platform: Arc<dyn RolePlatform> = Arc::new(LoggingPlatform);
    let policy = ProofPolicy::from_config(&config.verification);

    let workflow = VerificationWorkflow::new(
        chain.clone(),
        store.clone(),
        platform.clone(),
        policy,
    );
    tracing::info!(?workflow, "verification workflow ready, awaiting platform submissions");

    let prompt_channel = ChannelId(config.verification.prompt_channel_id);
    if let Err(err) = platform
        .announce(prompt_channel, "Click the button below to start NFT verification")
        .await
    {
        tracing::warn!(error = %err, "failed to announce entry prompt");
    }

    let shutdown = Shutdown::new();
    let reconciler = Reconciler::new(
        chain,
        store,
        platform,
        &config.reconciler,
        RoleId(config.verification.role_id),
    );
    let reconciler_task = tokio::spawn(reconciler.run(shutdown.subscribe()));

    shutdown_on_signal(&shutdown).await;
    let _ = reconciler_task.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
