//! Solana wallet operations over an embedded wallet provider.

mod adapter;
mod balances;
mod error;
mod events;
mod notification;
mod provider;
mod session;
mod transaction;

pub use adapter::{BaseWalletAdapter, SolanaWalletAdapter};
pub use balances::TokenBalances;
pub use error::{Result, WalletError, WalletErrorKind};
pub use events::{BalanceUpdate, WalletAdapterEvent, WalletAdapterEventEmitter};
pub use notification::{Notifier, NotifyExt, TracingNotifier};
pub use provider::WalletProvider;
pub use session::{
    SolanaWallet, METHOD_PRIVATE_KEY, METHOD_PROVIDER_CONFIG, METHOD_REQUEST_ACCOUNTS,
};
pub use transaction::TransactionEnvelope;
