use anyhow::anyhow;
use solana_sdk::{
    message::Message, pubkey::Pubkey, signature::Signature, signer::Signer, system_instruction,
    transaction::Transaction,
};
use wallet_adapter_types::BlockhashWithExpiry;

use crate::WalletError;

/// An unsigned legacy transaction plus the block height after which its
/// blockhash expires.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEnvelope {
    pub transaction: Transaction,
    pub last_valid_block_height: u64,
}

impl TransactionEnvelope {
    pub fn new(message: Message, last_valid_block_height: u64) -> Self {
        Self {
            transaction: Transaction::new_unsigned(message),
            last_valid_block_height,
        }
    }

    /// A single system-program transfer, paid for by `from`.
    pub fn transfer(
        from: &Pubkey,
        to: &Pubkey,
        lamports: u64,
        latest: &BlockhashWithExpiry,
    ) -> Self {
        let instruction = system_instruction::transfer(from, to, lamports);
        let message = Message::new_with_blockhash(&[instruction], Some(from), &latest.blockhash);

        Self::new(message, latest.last_valid_block_height)
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.transaction.message.account_keys.first()
    }

    /// Signs as `signer` against the envelope's own blockhash and returns the
    /// fee payer signature together with the wire encoding of the transaction.
    pub fn sign_and_serialize<S: Signer>(self, signer: &S) -> crate::Result<(Signature, Vec<u8>)> {
        let mut tx = self.transaction;
        let blockhash = tx.message.recent_blockhash;

        tx.try_partial_sign(&[signer], blockhash)
            .map_err(|err| WalletError::Signing(anyhow!("unable to sign transaction: {err}")))?;

        let signature = tx
            .signatures
            .first()
            .copied()
            .ok_or_else(|| WalletError::Signing(anyhow!("transaction has no signature slot")))?;

        Ok((signature, bincode::serialize(&tx)?))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use solana_sdk::{
        hash::Hash, signature::Keypair, system_instruction::SystemInstruction, system_program,
    };

    use super::*;

    #[test]
    fn transfer_carries_blockhash_payer_and_lamports() -> Result<()> {
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();
        let latest = BlockhashWithExpiry {
            blockhash: Hash::new_unique(),
            last_valid_block_height: 321,
        };

        let envelope = TransactionEnvelope::transfer(&from, &to, 1_250_000_000, &latest);
        let message = &envelope.transaction.message;

        assert_eq!(envelope.fee_payer(), Some(&from));
        assert_eq!(envelope.last_valid_block_height, 321);
        assert_eq!(message.recent_blockhash, latest.blockhash);
        assert_eq!(message.header.num_required_signatures, 1);
        assert_eq!(message.instructions.len(), 1);

        let ix = &message.instructions[0];
        assert_eq!(ix.program_id(&message.account_keys), &system_program::id());
        assert_eq!(
            bincode::deserialize::<SystemInstruction>(&ix.data)?,
            SystemInstruction::Transfer {
                lamports: 1_250_000_000
            }
        );

        let accounts: Vec<Pubkey> = ix
            .accounts
            .iter()
            .map(|&i| message.account_keys[i as usize])
            .collect();
        assert_eq!(accounts, vec![from, to]);

        Ok(())
    }

    #[test]
    fn signed_transfer_serializes_with_payer_signature_first() -> Result<()> {
        let payer = Keypair::new();
        let latest = BlockhashWithExpiry {
            blockhash: Hash::new_unique(),
            last_valid_block_height: 9,
        };

        let envelope =
            TransactionEnvelope::transfer(&payer.pubkey(), &Pubkey::new_unique(), 1, &latest);
        let (signature, bytes) = envelope.sign_and_serialize(&payer)?;

        // compact-u16 signature count, then the 64 byte payer signature
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..65], signature.as_ref());

        let tx: Transaction = bincode::deserialize(&bytes)?;
        tx.verify()?;
        assert_eq!(tx.message.recent_blockhash, latest.blockhash);

        Ok(())
    }

    #[test]
    fn signing_as_a_stranger_is_a_signing_error() {
        let envelope = TransactionEnvelope::transfer(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            1,
            &BlockhashWithExpiry::default(),
        );

        let err = envelope.sign_and_serialize(&Keypair::new()).unwrap_err();

        assert_eq!(err.kind(), crate::WalletErrorKind::Signing);
    }
}
