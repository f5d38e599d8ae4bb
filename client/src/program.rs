use std::future::Future;

use duel_api::{
    consts::{CLUSTER, EXPLORER_URL},
    error::DuelError,
    instruction::DuelInstruction,
    state::{player_pda, Player},
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_program,
    transaction::Transaction,
};
use tracing::{error, info};

use crate::{config::Config, error::ClientError};

/// What callers need from the duel program: read a record, submit an instruction.
pub trait ProgramClient: Send + Sync {
    /// The account paying for (and signing) submitted transactions.
    fn payer(&self) -> Pubkey;

    /// Fetches the player record of `wallet`. A missing account is `Ok(None)`.
    fn fetch_player(
        &self,
        wallet: Pubkey,
    ) -> impl Future<Output = Result<Option<Player>, ClientError>> + Send;

    /// Submits `instruction` for the player record of `wallet` and waits for confirmation.
    fn invoke(
        &self,
        instruction: DuelInstruction,
        wallet: Pubkey,
    ) -> impl Future<Output = Result<Signature, ClientError>> + Send;
}

/// [`ProgramClient`] over a Solana RPC node.
///
/// The signer is either the user's wallet ([`RpcProgramClient::with_signer`]) or a
/// keypair owned by the server ([`RpcProgramClient::from_config`]).
pub struct RpcProgramClient<S> {
    rpc: RpcClient,
    signer: S,
}

impl<S: Signer> RpcProgramClient<S> {
    pub fn new(rpc: RpcClient, signer: S) -> Self {
        Self { rpc, signer }
    }

    pub fn with_signer(rpc_url: impl ToString, signer: S) -> Self {
        let rpc = RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());
        Self::new(rpc, signer)
    }

    async fn submit_transaction(&self, instructions: &[Instruction]) -> Result<Signature, ClientError> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let payer = self.signer.pubkey();
        let transaction =
            Transaction::new_signed_with_payer(instructions, Some(&payer), &[&self.signer], blockhash);

        match self.rpc.send_and_confirm_transaction(&transaction).await {
            Ok(signature) => {
                info!("Transaction confirmed: {}", explorer_url(&signature));
                Ok(signature)
            }
            Err(e) => {
                error!("Error submitting transaction: {:?}", e);
                match e.get_transaction_error() {
                    Some(err) => Err(ClientError::Transaction(err.to_string())),
                    None => Err(e.into()),
                }
            }
        }
    }
}

impl RpcProgramClient<Keypair> {
    /// Builds the server flavor, signing with `PRIVATE_KEY`.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let keypair = config.keypair()?;
        Ok(Self::with_signer(&config.rpc_url, keypair))
    }
}

impl<S: Signer + Send + Sync> ProgramClient for RpcProgramClient<S> {
    fn payer(&self) -> Pubkey {
        self.signer.pubkey()
    }

    async fn fetch_player(&self, wallet: Pubkey) -> Result<Option<Player>, ClientError> {
        let address = player_pda(wallet).0;
        let account = self
            .rpc
            .get_account_with_commitment(&address, self.rpc.commitment())
            .await?
            .value;
        let Some(account) = account else {
            return Ok(None);
        };
        // Lamports sent to the address before initializePlayer leave a system account behind.
        if account.owner == system_program::ID && account.data.is_empty() {
            return Ok(None);
        }
        if account.owner != duel_api::ID {
            return Err(DuelError::InvalidAccountOwner(account.owner).into());
        }
        Ok(Some(Player::try_from_bytes(&account.data)?))
    }

    async fn invoke(&self, instruction: DuelInstruction, wallet: Pubkey) -> Result<Signature, ClientError> {
        // The player PDA of initializePlayer is seeded by its signer.
        if instruction == DuelInstruction::InitializePlayer && wallet != self.payer() {
            return Err(ClientError::SignerMismatch {
                signer: self.payer(),
                wallet,
            });
        }
        let ix = duel_api::sdk::build(instruction, wallet);
        self.submit_transaction(&[ix]).await
    }
}

pub fn explorer_url(signature: &Signature) -> String {
    format!("{}/{}?cluster={}", EXPLORER_URL, signature, CLUSTER)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::{json, Value};
    use solana_client::rpc_request::RpcRequest;

    use super::*;

    fn account_info(owner: &Pubkey, data: &[u8]) -> Value {
        json!({
            "context": { "slot": 1 },
            "value": {
                "data": [bs58::encode(data).into_string(), "base58"],
                "executable": false,
                "lamports": 1_000_000,
                "owner": owner.to_string(),
                "rentEpoch": 0,
                "space": data.len(),
            }
        })
    }

    fn client_with_account(account: Value) -> RpcProgramClient<Keypair> {
        let mocks = HashMap::from([(RpcRequest::GetAccountInfo, account)]);
        let rpc = RpcClient::new_mock_with_mocks("succeeds".to_string(), mocks);
        RpcProgramClient::new(rpc, Keypair::new())
    }

    #[test]
    fn test_explorer_url() {
        let signature = Signature::default();
        assert_eq!(
            explorer_url(&signature),
            format!("https://solana.fm/tx/{}?cluster=devnet", signature)
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_account() {
        let client = client_with_account(json!({ "context": { "slot": 1 }, "value": null }));
        let player = client.fetch_player(Pubkey::new_unique()).await.unwrap();
        assert!(player.is_none());
    }

    #[tokio::test]
    async fn test_fetch_prefunded_address() {
        let client = client_with_account(account_info(&system_program::ID, &[]));
        let player = client.fetch_player(Pubkey::new_unique()).await.unwrap();
        assert!(player.is_none());
    }

    #[tokio::test]
    async fn test_fetch_player_record() {
        let record = Player { win: 7, loss: 2 };
        let client = client_with_account(account_info(&duel_api::ID, &record.to_bytes()));
        let player = client.fetch_player(Pubkey::new_unique()).await.unwrap();
        assert_eq!(player, Some(record));
    }

    #[tokio::test]
    async fn test_fetch_foreign_owner() {
        let owner = Pubkey::new_unique();
        let record = Player { win: 1, loss: 0 };
        let client = client_with_account(account_info(&owner, &record.to_bytes()));
        let result = client.fetch_player(Pubkey::new_unique()).await;
        assert!(matches!(
            result,
            Err(ClientError::Account(DuelError::InvalidAccountOwner(o))) if o == owner
        ));
    }

    #[tokio::test]
    async fn test_fetch_wrong_discriminator() {
        let mut data = Player { win: 1, loss: 0 }.to_bytes();
        data[0] ^= 0xff;
        let client = client_with_account(account_info(&duel_api::ID, &data));
        let result = client.fetch_player(Pubkey::new_unique()).await;
        assert!(matches!(
            result,
            Err(ClientError::Account(DuelError::InvalidAccountDiscriminator))
        ));
    }

    #[tokio::test]
    async fn test_invoke_confirms() {
        let rpc = RpcClient::new_mock("succeeds".to_string());
        let client = RpcProgramClient::new(rpc, Keypair::new());
        let wallet = client.payer();
        let signature = client.invoke(DuelInstruction::InitializePlayer, wallet).await.unwrap();
        assert_ne!(signature, Signature::default());

        let signature = client.invoke(DuelInstruction::WinIncrement, Pubkey::new_unique()).await.unwrap();
        assert_ne!(signature, Signature::default());
    }

    #[tokio::test]
    async fn test_invoke_rejected_by_program() {
        let rpc = RpcClient::new_mock("instruction_error".to_string());
        let client = RpcProgramClient::new(rpc, Keypair::new());
        let result = client.invoke(DuelInstruction::LossIncrement, Pubkey::new_unique()).await;
        assert!(matches!(result, Err(ClientError::Transaction(_))));
    }

    #[tokio::test]
    async fn test_initialize_requires_wallet_signer() {
        let client = RpcProgramClient::with_signer("http://127.0.0.1:1", Keypair::new());
        let wallet = Pubkey::new_unique();
        let result = client.invoke(DuelInstruction::InitializePlayer, wallet).await;
        assert!(matches!(
            result,
            Err(ClientError::SignerMismatch { wallet: w, .. }) if w == wallet
        ));
    }
}
