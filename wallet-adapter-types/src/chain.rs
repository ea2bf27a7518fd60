use serde::{Deserialize, Serialize};

/// Namespace of a chain config. Unknown namespaces keep the provider's
/// string so the config serializes back unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChainNamespace {
    Eip155,
    #[default]
    Solana,
    Other(String),
}

impl From<String> for ChainNamespace {
    fn from(namespace: String) -> Self {
        match namespace.as_str() {
            "eip155" => Self::Eip155,
            "solana" => Self::Solana,
            _ => Self::Other(namespace),
        }
    }
}

impl From<ChainNamespace> for String {
    fn from(namespace: ChainNamespace) -> Self {
        match namespace {
            ChainNamespace::Eip155 => "eip155".to_string(),
            ChainNamespace::Solana => "solana".to_string(),
            ChainNamespace::Other(namespace) => namespace,
        }
    }
}

/// Chain description answered by the wallet provider for
/// `solana_provider_config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    #[serde(default)]
    pub chain_namespace: ChainNamespace,
    pub chain_id: String,
    pub rpc_target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_explorer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl ChainConfig {
    fn solana(chain_id: &str, rpc_target: &str, display_name: &str, cluster: &str) -> Self {
        let block_explorer_url = if cluster.is_empty() {
            "https://explorer.solana.com".to_string()
        } else {
            format!("https://explorer.solana.com?cluster={cluster}")
        };

        Self {
            chain_namespace: ChainNamespace::Solana,
            chain_id: chain_id.to_string(),
            rpc_target: rpc_target.to_string(),
            ws_target: None,
            display_name: Some(display_name.to_string()),
            block_explorer_url: Some(block_explorer_url),
            ticker: Some("SOL".to_string()),
            ticker_name: Some("Solana".to_string()),
            decimals: Some(9),
            logo: None,
        }
    }

    pub fn mainnet() -> Self {
        Self::solana("0x1", "https://api.mainnet-beta.solana.com", "Solana Mainnet", "")
    }

    pub fn testnet() -> Self {
        Self::solana("0x2", "https://api.testnet.solana.com", "Solana Testnet", "testnet")
    }

    pub fn devnet() -> Self {
        Self::solana("0x3", "https://api.devnet.solana.com", "Solana Devnet", "devnet")
    }

    /// Same chain, different RPC endpoint.
    pub fn with_rpc_target(mut self, rpc_target: impl ToString) -> Self {
        self.rpc_target = rpc_target.to_string();
        self
    }
}
