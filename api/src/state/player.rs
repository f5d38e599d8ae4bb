use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{consts::DISCRIMINATOR_LEN, error::DuelError};

/// Duel record of a single wallet, stored at `player_pda(wallet)`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Player {
    /// The number of duels this wallet has won.
    pub win: u64,

    /// The number of duels this wallet has lost.
    pub loss: u64,
}

impl Player {
    /// First 8 bytes of `sha256("account:Player")`.
    pub const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [205, 222, 112, 7, 165, 155, 206, 218];

    /// Size of the account data, discriminator included.
    pub const SIZE: usize = DISCRIMINATOR_LEN + std::mem::size_of::<Player>();

    /// Parses raw account data. Trailing bytes past the record are ignored.
    pub fn try_from_bytes(data: &[u8]) -> Result<Player, DuelError> {
        if data.len() < Self::SIZE {
            return Err(DuelError::AccountDataTooShort {
                expected: Self::SIZE,
                actual: data.len(),
            });
        }
        let (discriminator, body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != Self::DISCRIMINATOR {
            return Err(DuelError::InvalidAccountDiscriminator);
        }
        Ok(bytemuck::pod_read_unaligned(
            &body[..std::mem::size_of::<Player>()],
        ))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::SIZE);
        data.extend_from_slice(&Self::DISCRIMINATOR);
        data.extend_from_slice(bytemuck::bytes_of(self));
        data
    }

    /// Total number of recorded duels.
    pub fn games(&self) -> u64 {
        self.win.saturating_add(self.loss)
    }
}
