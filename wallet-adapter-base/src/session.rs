use std::str::FromStr;

use serde_json::json;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use wallet_adapter_types::ChainConfig;
use zeroize::Zeroizing;

use crate::provider::WalletProvider;
use crate::transaction::TransactionEnvelope;
use crate::{Result, WalletError};

pub const METHOD_REQUEST_ACCOUNTS: &str = "requestAccounts";
pub const METHOD_PROVIDER_CONFIG: &str = "solana_provider_config";
pub const METHOD_PRIVATE_KEY: &str = "solanaPrivateKey";

/// Short-lived view over a provider for the duration of one adapter call.
#[derive(Debug)]
pub struct SolanaWallet<'a, P: WalletProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: WalletProvider + ?Sized> SolanaWallet<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    pub async fn request_accounts(&self) -> Result<Vec<String>> {
        self.provider
            .request_accounts()
            .await
            .map_err(|source| WalletError::ProviderRequest {
                method: METHOD_REQUEST_ACCOUNTS,
                source,
            })
    }

    /// The account every operation signs and pays with.
    pub async fn first_account(&self) -> Result<Pubkey> {
        let accounts = self.request_accounts().await?;

        if accounts.len() > 1 {
            tracing::debug!(
                count = accounts.len(),
                "provider reported several accounts, using the first"
            );
        }

        let address = accounts.first().ok_or(WalletError::NoAccounts)?;

        Pubkey::from_str(address).map_err(|err| WalletError::invalid_address(address, err))
    }

    pub async fn provider_config(&self) -> Result<ChainConfig> {
        let value = self.request(METHOD_PROVIDER_CONFIG).await?;

        serde_json::from_value(value).map_err(|err| WalletError::UnexpectedResponse {
            method: METHOD_PROVIDER_CONFIG,
            reason: err.to_string(),
        })
    }

    pub async fn private_key(&self) -> Result<Zeroizing<String>> {
        let value = self.request(METHOD_PRIVATE_KEY).await?;

        match value {
            serde_json::Value::String(key) => Ok(Zeroizing::new(key)),
            other => Err(WalletError::UnexpectedResponse {
                method: METHOD_PRIVATE_KEY,
                reason: format!("expected a string, got {}", json_type(&other)),
            }),
        }
    }

    pub async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        self.provider
            .sign_message(message)
            .await
            .map_err(WalletError::Signing)
    }

    pub async fn sign_and_send_transaction(
        &self,
        envelope: TransactionEnvelope,
    ) -> Result<Signature> {
        self.provider
            .sign_and_send_transaction(envelope)
            .await
            .map_err(|err| match err.downcast::<WalletError>() {
                Ok(err) => err,
                Err(err) => WalletError::SendTransaction(err),
            })
    }

    async fn request(&self, method: &'static str) -> Result<serde_json::Value> {
        self.provider
            .request(method, json!([]))
            .await
            .map_err(|source| WalletError::ProviderRequest { method, source })
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a bool",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
