use solana_program::pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DuelError {
    #[error("account data too short: expected {expected} bytes, got {actual}")]
    AccountDataTooShort { expected: usize, actual: usize },

    #[error("account discriminator does not match the player account")]
    InvalidAccountDiscriminator,

    #[error("account is owned by {0}, not the duel program")]
    InvalidAccountOwner(Pubkey),

    #[error("unknown instruction: {0}")]
    UnknownInstruction(String),
}
