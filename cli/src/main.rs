use std::str::FromStr;

use anyhow::anyhow;
use duel_api::prelude::*;
use duel_client::prelude::*;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = Config::from_env()?;
    let command = std::env::var("COMMAND").map_err(|_| anyhow!("Missing COMMAND env var"))?;
    match command.as_str() {
        "keys" => keys()?,
        "idl" => log_idl()?,
        "player" => {
            let client = client(&config)?;
            log_player(&client).await?;
        }
        "init" => {
            let client = client(&config)?;
            init(&client).await?;
        }
        "win" => {
            let client = client(&config)?;
            record(&client, DuelInstruction::WinIncrement).await?;
        }
        "loss" => {
            let client = client(&config)?;
            record(&client, DuelInstruction::LossIncrement).await?;
        }
        "login" => {
            let client = client(&config)?;
            login(&client, &config).await?;
        }
        _ => return Err(anyhow!("Invalid command: {}", command)),
    };

    Ok(())
}

fn payer() -> Result<Keypair, anyhow::Error> {
    let path = std::env::var("KEYPAIR").map_err(|_| anyhow!("Missing KEYPAIR env var"))?;
    read_keypair_file(&path).map_err(|e| anyhow!("Failed to read keypair {}: {}", path, e))
}

fn client(config: &Config) -> Result<RpcProgramClient<Keypair>, anyhow::Error> {
    Ok(RpcProgramClient::with_signer(&config.rpc_url, payer()?))
}

/// The wallet to act on: `AUTHORITY`, or the signer itself.
fn authority(default: Option<Pubkey>) -> Result<Pubkey, anyhow::Error> {
    match std::env::var("AUTHORITY") {
        Ok(s) => Pubkey::from_str(&s).map_err(|_| anyhow!("Invalid AUTHORITY")),
        Err(_) => default.ok_or_else(|| anyhow!("Missing AUTHORITY or KEYPAIR env var")),
    }
}

fn keys() -> Result<(), anyhow::Error> {
    let signer = payer().ok().map(|keypair| keypair.pubkey());
    let wallet = authority(signer)?;
    let (player_address, bump) = player_pda(wallet);
    println!("Program: {}", duel_api::ID);
    println!("Wallet:  {}", wallet);
    println!("Player:  {} (bump {})", player_address, bump);
    Ok(())
}

fn log_idl() -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(&duel_api::idl::IDL)?);
    Ok(())
}

async fn log_player(client: &RpcProgramClient<Keypair>) -> Result<(), anyhow::Error> {
    let wallet = authority(Some(client.payer()))?;
    let player_address = player_pda(wallet).0;
    println!("Player");
    println!("  address: {}", player_address);
    println!("  wallet: {}", wallet);
    match client.fetch_player(wallet).await? {
        Some(player) => {
            println!("  win: {}", player.win);
            println!("  loss: {}", player.loss);
            println!("  games: {}", player.games());
        }
        None => println!("  not initialized"),
    }
    Ok(())
}

async fn init(client: &RpcProgramClient<Keypair>) -> Result<(), anyhow::Error> {
    let wallet = client.payer();
    if client.fetch_player(wallet).await?.is_some() {
        println!("Player {} already initialized", player_pda(wallet).0);
        return Ok(());
    }
    let sig = client
        .invoke(DuelInstruction::InitializePlayer, wallet)
        .await?;
    println!("Player initialized: {}", explorer_url(&sig));
    Ok(())
}

async fn record(
    client: &RpcProgramClient<Keypair>,
    instruction: DuelInstruction,
) -> Result<(), anyhow::Error> {
    let wallet = authority(Some(client.payer()))?;
    let sig = client.invoke(instruction, wallet).await?;
    println!("{} recorded for {}", instruction, wallet);
    println!("Transaction: {}", explorer_url(&sig));
    Ok(())
}

/// Logs the keypair's wallet in as `USERNAME`, provisioning its record if needed.
async fn login(client: &RpcProgramClient<Keypair>, config: &Config) -> Result<(), anyhow::Error> {
    let username = std::env::var("USERNAME").map_err(|_| anyhow!("Missing USERNAME env var"))?;
    let request = LoginRequest::new(client.payer().to_string(), username);
    let backend = HttpBackend::from_config(config);
    let outcome = LoginFlow::new(config.auto_initialize)
        .run(client, &backend, &request)
        .await?;
    match outcome {
        LoginOutcome::LoggedIn => println!("Logged in"),
        LoginOutcome::AlreadyInitialized => println!("Logged in, player already initialized"),
        LoginOutcome::Initialized(sig) => {
            println!("Logged in, player initialized: {}", explorer_url(&sig))
        }
    }
    Ok(())
}
