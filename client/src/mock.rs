//! In-memory stand-ins for the program and the backend.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};

use duel_api::{
    instruction::DuelInstruction,
    state::{player_pda, Player},
};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    backend::Backend,
    error::ClientError,
    payload::{LoginRequest, StatsPayload},
    program::ProgramClient,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps player records in a map and applies instructions the way the program does.
pub struct MemoryProgramClient {
    payer: Pubkey,
    players: Mutex<HashMap<Pubkey, Player>>,
    invocations: Mutex<Vec<(DuelInstruction, Pubkey)>>,
    fail_fetch: AtomicBool,
    fail_invoke: AtomicBool,
}

impl MemoryProgramClient {
    pub fn new(payer: Pubkey) -> Self {
        Self {
            payer,
            players: Mutex::new(HashMap::new()),
            invocations: Mutex::new(Vec::new()),
            fail_fetch: AtomicBool::new(false),
            fail_invoke: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, wallet: Pubkey, player: Player) {
        lock(&self.players).insert(wallet, player);
    }

    pub fn player(&self, wallet: Pubkey) -> Option<Player> {
        lock(&self.players).get(&wallet).copied()
    }

    /// Successfully applied instructions, in order.
    pub fn invocations(&self) -> Vec<(DuelInstruction, Pubkey)> {
        lock(&self.invocations).clone()
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_invokes(&self, fail: bool) {
        self.fail_invoke.store(fail, Ordering::SeqCst);
    }
}

impl ProgramClient for MemoryProgramClient {
    fn payer(&self) -> Pubkey {
        self.payer
    }

    async fn fetch_player(&self, wallet: Pubkey) -> Result<Option<Player>, ClientError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ClientError::Transaction("rpc unavailable".to_string()));
        }
        Ok(self.player(wallet))
    }

    async fn invoke(&self, instruction: DuelInstruction, wallet: Pubkey) -> Result<Signature, ClientError> {
        if self.fail_invoke.load(Ordering::SeqCst) {
            return Err(ClientError::Transaction("blockhash not found".to_string()));
        }
        {
            let mut players = lock(&self.players);
            match instruction {
                DuelInstruction::InitializePlayer => {
                    if wallet != self.payer {
                        return Err(ClientError::SignerMismatch {
                            signer: self.payer,
                            wallet,
                        });
                    }
                    if players.contains_key(&wallet) {
                        return Err(ClientError::Transaction(format!(
                            "account {} already in use",
                            player_pda(wallet).0
                        )));
                    }
                    players.insert(wallet, Player::default());
                }
                DuelInstruction::WinIncrement | DuelInstruction::LossIncrement => {
                    let player = players
                        .get_mut(&wallet)
                        .ok_or(ClientError::AccountNotFound(player_pda(wallet).0))?;
                    if instruction == DuelInstruction::WinIncrement {
                        player.win += 1;
                    } else {
                        player.loss += 1;
                    }
                }
            }
        }
        let mut invocations = lock(&self.invocations);
        invocations.push((instruction, wallet));
        let mut signature = [0u8; 64];
        signature[..8].copy_from_slice(&(invocations.len() as u64).to_le_bytes());
        Ok(Signature::from(signature))
    }
}

/// Records what it receives; either call can be made to fail.
#[derive(Default)]
pub struct RecordingBackend {
    logins: Mutex<Vec<LoginRequest>>,
    stats: Mutex<Vec<StatsPayload>>,
    reject_login: AtomicBool,
    fail_stats: AtomicBool,
}

impl RecordingBackend {
    pub fn logins(&self) -> Vec<LoginRequest> {
        lock(&self.logins).clone()
    }

    pub fn stats(&self) -> Vec<StatsPayload> {
        lock(&self.stats).clone()
    }

    /// Answer logins with 401.
    pub fn reject_logins(&self, reject: bool) {
        self.reject_login.store(reject, Ordering::SeqCst);
    }

    /// Answer stat updates with 503.
    pub fn fail_stats(&self, fail: bool) {
        self.fail_stats.store(fail, Ordering::SeqCst);
    }
}

impl Backend for RecordingBackend {
    async fn login(&self, request: &LoginRequest) -> Result<(), ClientError> {
        lock(&self.logins).push(request.clone());
        if self.reject_login.load(Ordering::SeqCst) {
            return Err(ClientError::BackendStatus(401));
        }
        Ok(())
    }

    async fn update_stats(&self, stats: &StatsPayload) -> Result<(), ClientError> {
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(ClientError::BackendStatus(503));
        }
        lock(&self.stats).push(*stats);
        Ok(())
    }
}
