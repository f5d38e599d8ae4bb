use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::{instruction::DuelInstruction, state::player_pda};

/// Creates the player record of `signer`. The signer pays for the account and must sign.
pub fn initialize_player(signer: Pubkey) -> Instruction {
    let player_address = player_pda(signer).0;
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new(player_address, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: DuelInstruction::InitializePlayer.data(),
    }
}

pub fn win_increment(wallet: Pubkey) -> Instruction {
    increment(DuelInstruction::WinIncrement, wallet)
}

pub fn loss_increment(wallet: Pubkey) -> Instruction {
    increment(DuelInstruction::LossIncrement, wallet)
}

/// Builds `instruction` against the player record of `wallet`.
pub fn build(instruction: DuelInstruction, wallet: Pubkey) -> Instruction {
    match instruction {
        DuelInstruction::InitializePlayer => initialize_player(wallet),
        DuelInstruction::WinIncrement => win_increment(wallet),
        DuelInstruction::LossIncrement => loss_increment(wallet),
    }
}

fn increment(instruction: DuelInstruction, wallet: Pubkey) -> Instruction {
    let player_address = player_pda(wallet).0;
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(player_address, false),
            AccountMeta::new_readonly(wallet, false),
        ],
        data: instruction.data(),
    }
}
