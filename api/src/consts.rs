/// The seed of the player account PDA.
pub const PLAYER: &[u8] = b"player";

/// Length of the account and instruction discriminators.
pub const DISCRIMINATOR_LEN: usize = 8;

/// The cluster the program is deployed to.
pub const CLUSTER: &str = "devnet";

/// Base URL of the transaction explorer.
pub const EXPLORER_URL: &str = "https://solana.fm/tx";
