use anyhow::{anyhow, Context as _, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::{commitment_config::CommitmentLevel, pubkey::Pubkey, signature::Signature};
use wallet_adapter_types::{BlockhashWithExpiry, SendOptions};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub slot: u64,
}

/// Responses of the form `{ "context": { "slot": .. }, "value": .. }`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithContext<T> {
    pub context: Context,
    pub value: T,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

pub type GetLatestBlockhash = WithContext<LatestBlockhash>;
pub type GetBalance = WithContext<u64>;

impl TryFrom<LatestBlockhash> for BlockhashWithExpiry {
    type Error = anyhow::Error;

    fn try_from(value: LatestBlockhash) -> Result<Self> {
        Ok(Self {
            blockhash: value
                .blockhash
                .parse()
                .with_context(|| format!("invalid blockhash {}", value.blockhash))?,
            last_valid_block_height: value.last_valid_block_height,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T> {
    pub jsonrpc: String,
    pub result: Option<T>,
    pub error: Option<RpcError>,
    pub id: u64,
}

impl<T> RpcResponse<T> {
    pub fn into_result(self) -> Result<T> {
        if let Some(err) = self.error {
            return Err(anyhow!("rpc error {}: {}", err.code, err.message));
        }

        self.result.context("no result")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcRequest<T> {
    pub jsonrpc: String,
    pub method: String,
    pub params: T,
    pub id: u64,
}

impl<T> RpcRequest<T> {
    pub fn new(method: impl ToString, params: T) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        }
    }
}

#[async_trait::async_trait(?Send)]
pub trait Connection {
    async fn get_balance(
        &self,
        public_key: &Pubkey,
        commitment: Option<CommitmentLevel>,
    ) -> Result<u64>;

    async fn get_latest_blockhash(
        &self,
        commitment: Option<CommitmentLevel>,
    ) -> Result<BlockhashWithExpiry>;

    async fn send_raw_transaction(
        &self,
        raw_transaction: Vec<u8>,
        options: Option<&SendOptions>,
    ) -> Result<Signature>;
}

/// Opens connections to the RPC endpoint a chain config points at.
pub trait ConnectionFactory {
    fn connect(&self, rpc_target: &str) -> Result<Box<dyn Connection>>;
}
