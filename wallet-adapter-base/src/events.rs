use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceUpdate {
    pub token_id: String,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletAdapterEvent {
    BalanceUpdated(BalanceUpdate),
    TransactionSent {
        signature: Signature,
        from: Pubkey,
        to: Pubkey,
        lamports: u64,
    },
}

/// Fan-out of adapter events. Every subscriber sees every event emitted
/// after it subscribed.
#[derive(Debug, Clone)]
pub struct WalletAdapterEventEmitter {
    tx: broadcast::Sender<WalletAdapterEvent>,
}

impl Default for WalletAdapterEventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletAdapterEventEmitter {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Returns how many subscribers received the event.
    pub fn emit(&self, event: WalletAdapterEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                tracing::trace!(?event, "no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WalletAdapterEvent> {
        self.tx.subscribe()
    }
}
