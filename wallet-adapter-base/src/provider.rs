use anyhow::Result;
use solana_sdk::signature::Signature;

use crate::transaction::TransactionEnvelope;

/// The capabilities this crate needs from an embedded wallet provider's
/// session handle.
#[async_trait::async_trait(?Send)]
pub trait WalletProvider: std::fmt::Debug {
    /// Base58 addresses of the accounts the provider exposes.
    async fn request_accounts(&self) -> Result<Vec<String>>;

    /// Provider specific request, e.g. `solana_provider_config`.
    async fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value>;

    async fn sign_message(&self, message: &[u8]) -> Result<Signature>;

    async fn sign_and_send_transaction(&self, envelope: TransactionEnvelope) -> Result<Signature>;
}
