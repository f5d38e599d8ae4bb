use std::str::FromStr;

use duel_api::state::Player;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::error::ClientError;

/// A wallet paired with the username reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub public_key: String,
    pub username: String,
}

impl LoginRequest {
    pub fn new(public_key: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            username: username.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.public_key.trim().is_empty() && !self.username.trim().is_empty()
    }

    /// Checks both fields are present and returns the parsed wallet.
    pub fn validate(&self) -> Result<Pubkey, ClientError> {
        if !self.is_complete() {
            return Err(ClientError::EmptyCredentials);
        }
        parse_pubkey(&self.public_key)
    }
}

/// Body of the `duel-*` requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelRequest {
    pub public_key: String,
}

/// Win/loss counters of a player as plain numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsPayload {
    pub win: u64,
    pub loss: u64,
}

impl From<Player> for StatsPayload {
    fn from(player: Player) -> Self {
        Self {
            win: player.win,
            loss: player.loss,
        }
    }
}

pub fn parse_pubkey(s: &str) -> Result<Pubkey, ClientError> {
    Pubkey::from_str(s.trim()).map_err(|_| ClientError::InvalidPublicKey(s.to_string()))
}
