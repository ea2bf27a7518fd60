use std::str::FromStr;
use std::sync::Arc;

use solana_sdk::{commitment_config::CommitmentLevel, pubkey::Pubkey, signature::Signature};
use wallet_adapter_connection_common::{Connection, ConnectionFactory};
use wallet_adapter_types::{format_sol, sol_to_lamports, ChainConfig};
use zeroize::Zeroizing;

use crate::events::{BalanceUpdate, WalletAdapterEvent, WalletAdapterEventEmitter};
use crate::provider::WalletProvider;
use crate::session::SolanaWallet;
use crate::transaction::TransactionEnvelope;
use crate::{Result, WalletError};

/// The wallet operations exposed to application code.
#[async_trait::async_trait(?Send)]
pub trait BaseWalletAdapter {
    fn event_emitter(&self) -> WalletAdapterEventEmitter;

    /// Address of the wallet's first account.
    async fn get_address(&self) -> Result<Pubkey>;

    /// SOL balance of the first account, formatted for display. Published as
    /// a [`WalletAdapterEvent::BalanceUpdated`] under `token_id`.
    async fn get_balance(&self, token_id: &str) -> Result<String>;

    /// Signs the UTF-8 bytes of `message`.
    async fn sign_message(&self, message: &str) -> Result<Signature>;

    /// Transfers `amount` SOL from the first account to `destination`.
    async fn send_transaction(&self, amount: f64, destination: &str) -> Result<Signature>;

    async fn get_private_key(&self) -> Result<Zeroizing<String>>;
}

pub struct SolanaWalletAdapter<P: WalletProvider + ?Sized> {
    provider: Arc<P>,
    connections: Arc<dyn ConnectionFactory>,
    event_emitter: WalletAdapterEventEmitter,
}

impl<P: WalletProvider + ?Sized> Clone for SolanaWalletAdapter<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            connections: self.connections.clone(),
            event_emitter: self.event_emitter.clone(),
        }
    }
}

impl<P: WalletProvider + ?Sized> std::fmt::Debug for SolanaWalletAdapter<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaWalletAdapter")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

impl<P: WalletProvider + ?Sized> SolanaWalletAdapter<P> {
    pub fn new(provider: Arc<P>, connections: Arc<dyn ConnectionFactory>) -> Self {
        Self {
            provider,
            connections,
            event_emitter: WalletAdapterEventEmitter::new(),
        }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    fn session(&self) -> SolanaWallet<'_, P> {
        SolanaWallet::new(self.provider.as_ref())
    }

    fn connect(&self, config: &ChainConfig) -> Result<Box<dyn Connection>> {
        tracing::debug!(chain_id = %config.chain_id, rpc_target = %config.rpc_target, "connect");

        self.connections
            .connect(&config.rpc_target)
            .map_err(WalletError::Connection)
    }
}

#[async_trait::async_trait(?Send)]
impl<P: WalletProvider + ?Sized> BaseWalletAdapter for SolanaWalletAdapter<P> {
    fn event_emitter(&self) -> WalletAdapterEventEmitter {
        self.event_emitter.clone()
    }

    async fn get_address(&self) -> Result<Pubkey> {
        self.session().first_account().await
    }

    async fn get_balance(&self, token_id: &str) -> Result<String> {
        let session = self.session();

        let config = session.provider_config().await?;
        let connection = self.connect(&config)?;
        let account = session.first_account().await?;

        let lamports = connection
            .get_balance(&account, Some(CommitmentLevel::Finalized))
            .await
            .map_err(WalletError::Connection)?;
        let balance = format_sol(lamports);

        tracing::debug!(%account, lamports, token_id, "balance");

        self.event_emitter
            .emit(WalletAdapterEvent::BalanceUpdated(BalanceUpdate {
                token_id: token_id.to_string(),
                balance: balance.clone(),
            }));

        Ok(balance)
    }

    async fn sign_message(&self, message: &str) -> Result<Signature> {
        self.session().sign_message(message.as_bytes()).await
    }

    async fn send_transaction(&self, amount: f64, destination: &str) -> Result<Signature> {
        let to = Pubkey::from_str(destination)
            .map_err(|err| WalletError::invalid_address(destination, err))?;
        let lamports = sol_to_lamports(amount)?;

        let session = self.session();
        let from = session.first_account().await?;

        let config = session.provider_config().await?;
        let connection = self.connect(&config)?;

        let latest = connection
            .get_latest_blockhash(Some(CommitmentLevel::Finalized))
            .await
            .map_err(WalletError::Connection)?;

        let envelope = TransactionEnvelope::transfer(&from, &to, lamports, &latest);
        let signature = session.sign_and_send_transaction(envelope).await?;

        tracing::info!(%signature, %from, %to, lamports, "transfer sent");

        self.event_emitter.emit(WalletAdapterEvent::TransactionSent {
            signature,
            from,
            to,
            lamports,
        });

        Ok(signature)
    }

    async fn get_private_key(&self) -> Result<Zeroizing<String>> {
        self.session().private_key().await
    }
}
