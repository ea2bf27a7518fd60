use anyhow::{bail, Context, Result};
use solana_sdk::{
    signature::{Keypair, Signature},
    signer::Signer,
};
use wallet_adapter_base::{
    TransactionEnvelope, WalletProvider, METHOD_PRIVATE_KEY, METHOD_PROVIDER_CONFIG,
};
use wallet_adapter_connection_common::{Connection, ConnectionFactory};
use wallet_adapter_types::{ChainConfig, SendOptions};

pub struct UnsafeBurnerWallet {
    /**
     * Storing a keypair locally like this is not safe because any application using this adapter could retrieve the
     * secret key, and because the keypair will be lost as soon as the wallet is dropped.
     */
    keypair: Keypair,
    chain_config: ChainConfig,
    connection: Box<dyn Connection>,
    send_options: SendOptions,
}

impl std::fmt::Debug for UnsafeBurnerWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsafeBurnerWallet")
            .field("public_key", &self.keypair.pubkey())
            .field("chain_config", &self.chain_config)
            .finish_non_exhaustive()
    }
}

impl UnsafeBurnerWallet {
    /// A wallet with a freshly generated keypair.
    pub fn new(chain_config: ChainConfig, connections: &dyn ConnectionFactory) -> Result<Self> {
        Self::with_keypair(Keypair::new(), chain_config, connections)
    }

    pub fn with_keypair(
        keypair: Keypair,
        chain_config: ChainConfig,
        connections: &dyn ConnectionFactory,
    ) -> Result<Self> {
        let connection = connections
            .connect(&chain_config.rpc_target)
            .context("unable to open burner wallet connection")?;

        Ok(Self {
            keypair,
            chain_config,
            connection,
            send_options: SendOptions::default(),
        })
    }

    /// Restores a wallet from the hex keypair it answers `solanaPrivateKey` with.
    pub fn from_hex(
        keypair_hex: &str,
        chain_config: ChainConfig,
        connections: &dyn ConnectionFactory,
    ) -> Result<Self> {
        let bytes = hex::decode(keypair_hex.trim()).context("keypair is not valid hex")?;
        let keypair = Keypair::from_bytes(&bytes).context("keypair must be 64 bytes")?;

        Self::with_keypair(keypair, chain_config, connections)
    }

    pub fn with_send_options(mut self, send_options: SendOptions) -> Self {
        self.send_options = send_options;
        self
    }

    pub fn chain_config(&self) -> &ChainConfig {
        &self.chain_config
    }
}

#[async_trait::async_trait(?Send)]
impl WalletProvider for UnsafeBurnerWallet {
    async fn request_accounts(&self) -> Result<Vec<String>> {
        Ok(vec![self.keypair.pubkey().to_string()])
    }

    async fn request(&self, method: &str, _params: serde_json::Value) -> Result<serde_json::Value> {
        match method {
            METHOD_PROVIDER_CONFIG => Ok(serde_json::to_value(&self.chain_config)?),
            METHOD_PRIVATE_KEY => Ok(hex::encode(self.keypair.to_bytes()).into()),
            _ => bail!("unsupported method: {method}"),
        }
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        Ok(self.keypair.sign_message(message))
    }

    async fn sign_and_send_transaction(&self, envelope: TransactionEnvelope) -> Result<Signature> {
        let last_valid_block_height = envelope.last_valid_block_height;
        let (signature, raw_tx) = envelope.sign_and_serialize(&self.keypair)?;

        tracing::debug!(%signature, last_valid_block_height, "submitting transaction");

        self.connection
            .send_raw_transaction(raw_tx, Some(&self.send_options))
            .await
    }
}
