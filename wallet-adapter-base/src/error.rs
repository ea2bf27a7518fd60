use wallet_adapter_types::InvalidAmount;

pub type Result<T> = std::result::Result<T, WalletError>;

/// Coarse classification of a [`WalletError`], for callers that pick a
/// notification or retry policy per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum WalletErrorKind {
    NoAccounts,
    InvalidAddress,
    InvalidAmount,
    ProviderRequest,
    UnexpectedResponse,
    Connection,
    Signing,
    SendTransaction,
    Serialization,
}

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("wallet reported no accounts")]
    NoAccounts,
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error(transparent)]
    InvalidAmount(#[from] InvalidAmount),
    #[error("provider request {method} failed: {source:#}")]
    ProviderRequest {
        method: &'static str,
        source: anyhow::Error,
    },
    #[error("unexpected response to {method}: {reason}")]
    UnexpectedResponse {
        method: &'static str,
        reason: String,
    },
    #[error("rpc connection failed: {0:#}")]
    Connection(anyhow::Error),
    #[error("signing failed: {0:#}")]
    Signing(anyhow::Error),
    #[error("send transaction failed: {0:#}")]
    SendTransaction(anyhow::Error),
    #[error("serialization failed: {0}")]
    Serialization(#[from] bincode::Error),
}

impl WalletError {
    pub fn kind(&self) -> WalletErrorKind {
        match self {
            Self::NoAccounts => WalletErrorKind::NoAccounts,
            Self::InvalidAddress { .. } => WalletErrorKind::InvalidAddress,
            Self::InvalidAmount(_) => WalletErrorKind::InvalidAmount,
            Self::ProviderRequest { .. } => WalletErrorKind::ProviderRequest,
            Self::UnexpectedResponse { .. } => WalletErrorKind::UnexpectedResponse,
            Self::Connection(_) => WalletErrorKind::Connection,
            Self::Signing(_) => WalletErrorKind::Signing,
            Self::SendTransaction(_) => WalletErrorKind::SendTransaction,
            Self::Serialization(_) => WalletErrorKind::Serialization,
        }
    }

    pub(crate) fn invalid_address(address: &str, reason: impl ToString) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}
