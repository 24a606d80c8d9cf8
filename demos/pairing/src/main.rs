use std::sync::Arc;

use tandem::prelude::*;
use tracing_subscriber::EnvFilter;

/// Number of simulated players when no argument is given.
const DEFAULT_PLAYERS: usize = 6;

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Joins `players` concurrently and returns their grants in spawn order.
async fn join_all(lobby: &Arc<Lobby>, players: usize) -> Vec<SessionGrant> {
    let handles: Vec<_> = (0..players)
        .map(|_| {
            let lobby = Arc::clone(lobby);
            tokio::spawn(async move { lobby.create_session().await })
        })
        .collect();

    let mut grants = Vec::with_capacity(players);
    for handle in handles {
        match handle.await {
            Ok(grant) => grants.push(grant),
            Err(e) => tracing::error!(error = %e, "join task failed"),
        }
    }
    grants
}

fn parse_players() -> Result<usize, String> {
    match std::env::args().nth(1) {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("player count {raw:?}: {e}")),
        None => Ok(DEFAULT_PLAYERS),
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let players = parse_players()?;
    let lobby = Arc::new(LobbyBuilder::from_env()?.build()?);

    let grants = join_all(&lobby, players).await;
    for grant in &grants {
        println!("{}", serde_json::to_string(grant)?);
    }

    for grant in &grants {
        match lobby.validate_session(&grant.token).await {
            Some(status) => println!("{}", serde_json::to_string(&status)?),
            None => tracing::warn!(room_id = %grant.room_id, "issued token did not validate"),
        }
    }

    tracing::info!(
        players,
        rooms = lobby.room_count().await,
        "matchmaking finished"
    );

    let revoked = lobby.expire_stale().await;
    tracing::info!(revoked, "shutdown sweep done");
    Ok(())
}
