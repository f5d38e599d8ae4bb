use duel_api::error::DuelError;
use solana_client::client_error::ClientError as RpcError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("PRIVATE_KEY is missing")]
    MissingSigningKey,

    #[error("PRIVATE_KEY is not a base58 encoded keypair")]
    InvalidSigningKey,

    #[error("invalid value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("invalid public key: {0:?}")]
    InvalidPublicKey(String),

    #[error("public key and username must not be empty")]
    EmptyCredentials,

    #[error("player account {0} is not initialized")]
    AccountNotFound(Pubkey),

    #[error("signer {signer} cannot initialize the player account of {wallet}")]
    SignerMismatch { signer: Pubkey, wallet: Pubkey },

    #[error("backend responded with status {0}")]
    BackendStatus(u16),

    #[error("transaction failed: {0}")]
    Transaction(String),

    #[error(transparent)]
    Backend(#[from] reqwest::Error),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Account(#[from] DuelError),
}
