use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast::{self, error::RecvError};

use crate::events::WalletAdapterEvent;

/// Latest known balance string per token id, fed by adapter events.
#[derive(Debug, Clone, Default)]
pub struct TokenBalances {
    balances: Arc<RwLock<HashMap<String, String>>>,
}

impl TokenBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, token_id: &str) -> Option<String> {
        self.balances
            .read()
            .ok()
            .and_then(|balances| balances.get(token_id).cloned())
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.balances
            .read()
            .map(|balances| balances.clone())
            .unwrap_or_default()
    }

    /// Records balance updates; other events are ignored.
    pub fn apply(&self, event: &WalletAdapterEvent) {
        let WalletAdapterEvent::BalanceUpdated(update) = event else {
            return;
        };

        match self.balances.write() {
            Ok(mut balances) => {
                balances.insert(update.token_id.clone(), update.balance.clone());
            }
            Err(err) => tracing::warn!("balance map poisoned: {err}"),
        }
    }

    /// Applies events until every sender is dropped.
    pub async fn follow(&self, mut rx: broadcast::Receiver<WalletAdapterEvent>) {
        loop {
            match rx.recv().await {
                Ok(event) => self.apply(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "balance subscriber lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}
