mod chain;
mod units;

pub use chain::{ChainConfig, ChainNamespace};
pub use units::{format_sol, lamports_to_sol, sol_to_lamports, InvalidAmount, LAMPORTS_PER_SOL};

use serde::{Deserialize, Serialize};
use solana_sdk::{commitment_config::CommitmentLevel, hash::Hash};

/// Token id under which the devnet SOL balance is published.
pub const SOLANA_DEVNET_TOKEN: &str = "solana-devnet";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOptions {
    /** disable transaction verification step */
    pub skip_preflight: Option<bool>,
    /** preflight commitment level */
    pub preflight_commitment: Option<CommitmentLevel>,
    /** Maximum number of times for the RPC node to retry sending the transaction to the leader. */
    pub max_retries: Option<u32>,
    /** The minimum slot that the request can be evaluated at */
    pub min_context_slot: Option<u64>,
}

/// A blockhash together with the last block height at which a transaction
/// referencing it is still accepted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockhashWithExpiry {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}
