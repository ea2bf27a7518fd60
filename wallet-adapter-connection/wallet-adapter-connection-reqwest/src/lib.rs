use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use base64::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use solana_sdk::{commitment_config::CommitmentLevel, pubkey::Pubkey, signature::Signature};
use wallet_adapter_connection_common::{
    Connection, ConnectionFactory, GetBalance, GetLatestBlockhash, RpcRequest, RpcResponse,
};
use wallet_adapter_types::{BlockhashWithExpiry, SendOptions};

#[derive(Debug, Clone)]
pub struct ReqwestConnection {
    url: String,
    client: reqwest::Client,
}

impl ReqwestConnection {
    pub fn new(url: String) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: String, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn devnet() -> Self {
        Self::new("https://api.devnet.solana.com".to_string())
    }

    pub fn mainnet() -> Self {
        Self::new("https://api.mainnet-beta.solana.com".to_string())
    }

    pub fn testnet() -> Self {
        Self::new("https://api.testnet.solana.com".to_string())
    }

    async fn call<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned + Serialize,
    {
        let req = RpcRequest::new(method, params);

        let resp: RpcResponse<R> = self
            .client
            .post(self.url())
            .json(&req)
            .header("Content-Type", "application/json")
            .send()
            .await
            .with_context(|| format!("{method} request to {} failed", self.url))?
            .json()
            .await
            .with_context(|| format!("{method} response is not valid json-rpc"))?;

        tracing::debug!(method = %method, "resp: {}", serde_json::to_string(&resp)?);

        resp.into_result().with_context(|| format!("{method} failed"))
    }
}

#[async_trait::async_trait(?Send)]
impl Connection for ReqwestConnection {
    async fn get_balance(
        &self,
        public_key: &Pubkey,
        commitment: Option<CommitmentLevel>,
    ) -> Result<u64> {
        let params = match commitment {
            Some(commitment) => json!([public_key.to_string(), { "commitment": commitment }]),
            None => json!([public_key.to_string()]),
        };

        let resp: GetBalance = self.call("getBalance", params).await?;

        Ok(resp.value)
    }

    async fn get_latest_blockhash(
        &self,
        commitment: Option<CommitmentLevel>,
    ) -> Result<BlockhashWithExpiry> {
        let params = json!([{"commitment": commitment.unwrap_or(CommitmentLevel::Finalized)}]);

        let resp: GetLatestBlockhash = self.call("getLatestBlockhash", params).await?;

        resp.value.try_into()
    }

    async fn send_raw_transaction(
        &self,
        raw_transaction: Vec<u8>,
        options: Option<&SendOptions>,
    ) -> Result<Signature> {
        let tx_base64 = BASE64_STANDARD.encode(&raw_transaction);

        let req_options = match options {
            Some(options) => json!({
                "skipPreflight": options.skip_preflight,
                "preflightCommitment": options.preflight_commitment,
                "maxRetries": options.max_retries,
                "minContextSlot": options.min_context_slot,
                "encoding": "base64"
            }),
            None => json!({
                "encoding": "base64"
            }),
        };

        let signature: String = self
            .call("sendTransaction", json!([tx_base64, req_options]))
            .await?;

        tracing::info!(%signature, "transaction submitted");

        Signature::from_str(&signature).with_context(|| format!("invalid signature {signature}"))
    }
}

/// Opens a [`ReqwestConnection`] per rpc target, sharing one http client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestConnectionFactory {
    client: reqwest::Client,
}

impl ReqwestConnectionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("unable to build http client")?;

        Ok(Self { client })
    }
}

impl ConnectionFactory for ReqwestConnectionFactory {
    fn connect(&self, rpc_target: &str) -> Result<Box<dyn Connection>> {
        let url = reqwest::Url::parse(rpc_target)
            .with_context(|| format!("invalid rpc target {rpc_target}"))?;

        Ok(Box::new(ReqwestConnection::with_client(
            url.to_string(),
            self.client.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use mockito::{Matcher, Server};
    use solana_sdk::hash::Hash;

    use super::*;

    #[tokio::test]
    async fn get_balance_returns_lamports() -> Result<()> {
        let mut server = Server::new_async().await;
        let owner = Pubkey::new_unique();

        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "method": "getBalance",
                "params": [owner.to_string(), { "commitment": "finalized" }],
            })))
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":2500000000},"id":1}"#)
            .create_async()
            .await;

        let connection = ReqwestConnection::new(server.url());
        let balance = connection
            .get_balance(&owner, Some(CommitmentLevel::Finalized))
            .await?;

        assert_eq!(balance, 2_500_000_000);
        mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn get_latest_blockhash_defaults_to_finalized() -> Result<()> {
        let mut server = Server::new_async().await;
        let blockhash = Hash::new_unique();

        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "method": "getLatestBlockhash",
                "params": [{ "commitment": "finalized" }],
            })))
            .with_status(200)
            .with_body(
                json!({
                    "jsonrpc": "2.0",
                    "result": {
                        "context": { "slot": 7 },
                        "value": { "blockhash": blockhash.to_string(), "lastValidBlockHeight": 150 }
                    },
                    "id": 1
                })
                .to_string(),
            )
            .create_async()
            .await;

        let connection = ReqwestConnection::new(server.url());
        let latest = connection.get_latest_blockhash(None).await?;

        assert_eq!(latest.blockhash, blockhash);
        assert_eq!(latest.last_valid_block_height, 150);
        mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn send_raw_transaction_posts_base64() -> Result<()> {
        let mut server = Server::new_async().await;
        let signature = Signature::new_unique();

        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "method": "sendTransaction",
                "params": ["AQID", { "encoding": "base64", "skipPreflight": true, "minContextSlot": 77 }],
            })))
            .with_status(200)
            .with_body(json!({ "jsonrpc": "2.0", "result": signature.to_string(), "id": 1 }).to_string())
            .create_async()
            .await;

        let connection = ReqwestConnection::new(server.url());
        let options = SendOptions {
            skip_preflight: Some(true),
            min_context_slot: Some(77),
            ..Default::default()
        };
        let sent = connection
            .send_raw_transaction(vec![1, 2, 3], Some(&options))
            .await?;

        assert_eq!(sent, signature);
        mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn rpc_error_is_reported() -> Result<()> {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid param: WrongSize"},"id":1}"#)
            .create_async()
            .await;

        let connection = ReqwestConnection::new(server.url());
        let err = connection
            .get_balance(&Pubkey::new_unique(), None)
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("Invalid param: WrongSize"));

        Ok(())
    }

    #[test]
    fn cluster_presets_point_at_public_endpoints() {
        assert_eq!(ReqwestConnection::devnet().url(), "https://api.devnet.solana.com");
        assert_eq!(ReqwestConnection::testnet().url(), "https://api.testnet.solana.com");
        assert_eq!(
            ReqwestConnection::mainnet().url(),
            "https://api.mainnet-beta.solana.com"
        );
    }

    async fn slow_balance_server(delay: Duration) -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_chunked_body(move |w| {
                std::thread::sleep(delay);
                w.write_all(br#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":42},"id":1}"#)
            })
            .create_async()
            .await;

        (server, mock)
    }

    #[tokio::test]
    async fn factory_timeout_applies_to_its_connections() -> Result<()> {
        let (server, _mock) = slow_balance_server(Duration::from_millis(500)).await;

        let impatient = ReqwestConnectionFactory::with_timeout(Duration::from_millis(50))?;
        let connection = impatient.connect(&server.url())?;
        assert!(connection.get_balance(&Pubkey::new_unique(), None).await.is_err());

        let patient = ReqwestConnectionFactory::with_timeout(Duration::from_secs(10))?;
        let connection = patient.connect(&server.url())?;
        assert_eq!(connection.get_balance(&Pubkey::new_unique(), None).await?, 42);

        Ok(())
    }

    #[test]
    fn factory_rejects_invalid_rpc_target() {
        let factory = ReqwestConnectionFactory::new();

        assert!(factory.connect("not a url").is_err());
        assert!(factory.connect("https://api.devnet.solana.com").is_ok());
    }
}
