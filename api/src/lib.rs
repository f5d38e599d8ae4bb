pub mod consts;
pub mod error;
pub mod idl;
pub mod instruction;
pub mod sdk;
pub mod state;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::error::*;
    pub use crate::instruction::*;
    pub use crate::state::*;
}

use solana_program::declare_id;

declare_id!("GsetEEa4YtiaFcQP4NnqM2vBtJrtbFjKBgfdszMK8ePC");
