use std::{fmt, str::FromStr};

use crate::{consts::DISCRIMINATOR_LEN, error::DuelError};

/// Instructions exposed by the duel program. None of them take arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DuelInstruction {
    InitializePlayer,
    WinIncrement,
    LossIncrement,
}

impl DuelInstruction {
    pub const ALL: [DuelInstruction; 3] = [
        DuelInstruction::InitializePlayer,
        DuelInstruction::WinIncrement,
        DuelInstruction::LossIncrement,
    ];

    /// First 8 bytes of `sha256("global:<snake_case name>")`.
    pub const fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            DuelInstruction::InitializePlayer => [79, 249, 88, 177, 220, 62, 56, 128],
            DuelInstruction::WinIncrement => [208, 31, 40, 121, 88, 26, 136, 248],
            DuelInstruction::LossIncrement => [121, 84, 103, 70, 81, 36, 158, 189],
        }
    }

    /// The camelCase name used by the IDL.
    pub const fn name(&self) -> &'static str {
        match self {
            DuelInstruction::InitializePlayer => "initializePlayer",
            DuelInstruction::WinIncrement => "winIncrement",
            DuelInstruction::LossIncrement => "lossIncrement",
        }
    }

    pub const fn snake_name(&self) -> &'static str {
        match self {
            DuelInstruction::InitializePlayer => "initialize_player",
            DuelInstruction::WinIncrement => "win_increment",
            DuelInstruction::LossIncrement => "loss_increment",
        }
    }

    pub fn data(&self) -> Vec<u8> {
        self.discriminator().to_vec()
    }
}

impl fmt::Display for DuelInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DuelInstruction {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ix| ix.name() == s || ix.snake_name() == s)
            .ok_or_else(|| DuelError::UnknownInstruction(s.to_string()))
    }
}
