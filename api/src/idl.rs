//! Static description of the duel program interface.
//!
//! Mirrors the program's published IDL closely enough to be served or printed
//! as JSON, and is the source the `sdk` builders are checked against.

use serde::Serialize;

use crate::{consts::PLAYER, instruction::DuelInstruction, state::Player};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Idl {
    pub address: &'static str,
    pub metadata: IdlMetadata,
    pub instructions: &'static [IdlInstruction],
    pub accounts: &'static [IdlAccount],
    pub types: &'static [IdlTypeDef],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdlMetadata {
    pub name: &'static str,
    pub version: &'static str,
    pub spec: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdlInstruction {
    pub name: &'static str,
    pub discriminator: [u8; 8],
    pub accounts: &'static [IdlAccountItem],
    pub args: &'static [IdlField],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdlAccountItem {
    pub name: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub writable: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub signer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pda: Option<IdlPda>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdlPda {
    pub seeds: &'static [IdlSeed],
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IdlSeed {
    Const { value: &'static [u8] },
    Account { path: &'static str },
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdlAccount {
    pub name: &'static str,
    pub discriminator: [u8; 8],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdlTypeDef {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: IdlTypeDefTy,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdlTypeDefTy {
    pub kind: &'static str,
    pub fields: &'static [IdlField],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdlField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: &'static str,
}

impl Idl {
    pub fn instruction(&self, instruction: DuelInstruction) -> Option<&IdlInstruction> {
        self.instructions
            .iter()
            .find(|ix| ix.name == instruction.name())
    }

    pub fn account(&self, name: &str) -> Option<&IdlAccount> {
        self.accounts.iter().find(|account| account.name == name)
    }
}

const SIGNER_PLAYER_SEEDS: IdlPda = IdlPda {
    seeds: &[
        IdlSeed::Const { value: PLAYER },
        IdlSeed::Account { path: "signer" },
    ],
};

const WALLET_PLAYER_SEEDS: IdlPda = IdlPda {
    seeds: &[
        IdlSeed::Const { value: PLAYER },
        IdlSeed::Account { path: "wallet" },
    ],
};

const fn account(name: &'static str, writable: bool, signer: bool) -> IdlAccountItem {
    IdlAccountItem {
        name,
        writable,
        signer,
        pda: None,
        address: None,
    }
}

const INCREMENT_ACCOUNTS: &[IdlAccountItem] = &[
    IdlAccountItem {
        pda: Some(WALLET_PLAYER_SEEDS),
        ..account("player", true, false)
    },
    account("wallet", false, false),
];

pub const IDL: Idl = Idl {
    address: "GsetEEa4YtiaFcQP4NnqM2vBtJrtbFjKBgfdszMK8ePC",
    metadata: IdlMetadata {
        name: "proofOfDuelProgram",
        version: "0.1.0",
        spec: "0.1.0",
    },
    instructions: &[
        IdlInstruction {
            name: DuelInstruction::InitializePlayer.name(),
            discriminator: DuelInstruction::InitializePlayer.discriminator(),
            accounts: &[
                account("signer", true, true),
                IdlAccountItem {
                    pda: Some(SIGNER_PLAYER_SEEDS),
                    ..account("player", true, false)
                },
                IdlAccountItem {
                    address: Some("11111111111111111111111111111111"),
                    ..account("systemProgram", false, false)
                },
            ],
            args: &[],
        },
        IdlInstruction {
            name: DuelInstruction::LossIncrement.name(),
            discriminator: DuelInstruction::LossIncrement.discriminator(),
            accounts: INCREMENT_ACCOUNTS,
            args: &[],
        },
        IdlInstruction {
            name: DuelInstruction::WinIncrement.name(),
            discriminator: DuelInstruction::WinIncrement.discriminator(),
            accounts: INCREMENT_ACCOUNTS,
            args: &[],
        },
    ],
    accounts: &[IdlAccount {
        name: "player",
        discriminator: Player::DISCRIMINATOR,
    }],
    types: &[IdlTypeDef {
        name: "player",
        ty: IdlTypeDefTy {
            kind: "struct",
            fields: &[
                IdlField {
                    name: "win",
                    ty: "u64",
                },
                IdlField {
                    name: "loss",
                    ty: "u64",
                },
            ],
        },
    }],
};
