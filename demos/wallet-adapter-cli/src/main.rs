use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wallet_adapter_base::{
    BaseWalletAdapter, NotifyExt, SolanaWalletAdapter, TokenBalances, TracingNotifier,
};
use wallet_adapter_connection_reqwest::ReqwestConnectionFactory;
use wallet_adapter_types::{ChainConfig, SOLANA_DEVNET_TOKEN};
use wallet_adapter_unsafe_burner::UnsafeBurnerWallet;

#[derive(Debug, Parser)]
#[command(name = "wallet-adapter-cli", about = "Drive a Solana wallet adapter from the shell")]
struct Cli {
    /// RPC endpoint; defaults to devnet.
    #[arg(long, env = "SOLANA_RPC_URL")]
    rpc_url: Option<String>,

    /// Per-request timeout in seconds. No timeout when unset.
    #[arg(long, env = "SOLANA_RPC_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Hex keypair to use instead of a fresh burner keypair, as printed by
    /// `private-key`.
    #[arg(long, env = "SOLANA_KEYPAIR_HEX", hide_env_values = true)]
    keypair_hex: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the wallet address
    Address,
    /// Print the wallet balance in SOL
    Balance {
        #[arg(long, default_value = SOLANA_DEVNET_TOKEN)]
        token: String,
    },
    /// Sign a UTF-8 message
    Sign { message: String },
    /// Transfer SOL to another address
    Send { amount: f64, destination: String },
    /// Print the exported private key
    PrivateKey,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let chain_config = match &cli.rpc_url {
        Some(url) => ChainConfig::devnet().with_rpc_target(url),
        None => ChainConfig::devnet(),
    };
    let connections = match cli.timeout_secs {
        Some(secs) => ReqwestConnectionFactory::with_timeout(Duration::from_secs(secs))?,
        None => ReqwestConnectionFactory::new(),
    };

    let wallet = match &cli.keypair_hex {
        Some(keypair_hex) => UnsafeBurnerWallet::from_hex(keypair_hex, chain_config, &connections)?,
        None => UnsafeBurnerWallet::new(chain_config, &connections)?,
    };
    let adapter = SolanaWalletAdapter::new(Arc::new(wallet), Arc::new(connections));

    let balances = TokenBalances::new();
    let mut events = adapter.event_emitter().subscribe();

    let notifier = TracingNotifier;
    let output = match cli.command {
        Command::Address => adapter
            .get_address()
            .await
            .notify_err(&notifier)?
            .to_string(),
        Command::Balance { token } => adapter.get_balance(&token).await.notify_err(&notifier)?,
        Command::Sign { message } => adapter
            .sign_message(&message)
            .await
            .notify_err(&notifier)?
            .to_string(),
        // transfer failures are returned to the shell without a notification
        Command::Send {
            amount,
            destination,
        } => adapter
            .send_transaction(amount, &destination)
            .await?
            .to_string(),
        Command::PrivateKey => {
            let key = adapter.get_private_key().await.notify_err(&notifier)?;
            println!("{}", key.as_str());
            return Ok(());
        }
    };

    while let Ok(event) = events.try_recv() {
        balances.apply(&event);
    }
    for (token, balance) in balances.snapshot() {
        tracing::info!(%token, %balance, "balance updated");
    }

    println!("{output}");

    Ok(())
}
