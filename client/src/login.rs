use duel_api::instruction::DuelInstruction;
use solana_sdk::signature::Signature;
use tracing::{error, info};

use crate::{
    backend::Backend, error::ClientError, payload::LoginRequest, program::explorer_url,
    program::ProgramClient,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The backend accepted the login and provisioning is disabled.
    LoggedIn,

    /// The wallet already has a player record.
    AlreadyInitialized,

    /// A player record was created by this login.
    Initialized(Signature),
}

/// Reports a wallet login to the backend and, optionally, makes sure the wallet
/// has a player record. The client must sign with the logging-in wallet.
#[derive(Debug, Clone, Copy)]
pub struct LoginFlow {
    pub auto_initialize: bool,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self {
            auto_initialize: true,
        }
    }
}

impl LoginFlow {
    pub fn new(auto_initialize: bool) -> Self {
        Self { auto_initialize }
    }

    pub async fn run<C, B>(
        &self,
        client: &C,
        backend: &B,
        request: &LoginRequest,
    ) -> Result<LoginOutcome, ClientError>
    where
        C: ProgramClient,
        B: Backend,
    {
        let wallet = request.validate()?;

        if let Err(e) = backend.login(request).await {
            error!("Login request failed: {}", e);
            return Err(e);
        }
        info!(%wallet, username = %request.username, "Login successful");

        if !self.auto_initialize {
            return Ok(LoginOutcome::LoggedIn);
        }

        if let Some(player) = client.fetch_player(wallet).await? {
            info!(%wallet, win = player.win, loss = player.loss, "Player data already exists");
            return Ok(LoginOutcome::AlreadyInitialized);
        }

        if client.payer() != wallet {
            return Err(ClientError::SignerMismatch {
                signer: client.payer(),
                wallet,
            });
        }
        let signature = client
            .invoke(DuelInstruction::InitializePlayer, wallet)
            .await?;
        info!(%wallet, "Player initialized: {}", explorer_url(&signature));
        Ok(LoginOutcome::Initialized(signature))
    }
}
