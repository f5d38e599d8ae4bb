mod player;

pub use player::*;

use solana_program::pubkey::Pubkey;

use crate::consts::PLAYER;

/// Derives the address of the player record owned by `wallet`.
pub fn player_pda(wallet: Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PLAYER, wallet.as_ref()], &crate::ID)
}
