use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use duel_api::{instruction::DuelInstruction, state::player_pda};
use duel_client::{
    backend::Backend,
    error::ClientError,
    payload::{parse_pubkey, DuelRequest, StatsPayload},
    program::{explorer_url, ProgramClient},
};
use tracing::{error, info};

use crate::error::ApiError;

pub struct AppState<C, B> {
    pub client: Arc<C>,
    pub backend: Arc<B>,
}

impl<C, B> AppState<C, B> {
    pub fn new(client: C, backend: B) -> Self {
        Self {
            client: Arc::new(client),
            backend: Arc::new(backend),
        }
    }
}

impl<C, B> Clone for AppState<C, B> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            backend: Arc::clone(&self.backend),
        }
    }
}

pub fn router<C, B>(state: AppState<C, B>) -> Router
where
    C: ProgramClient + 'static,
    B: Backend + 'static,
{
    let routes = Router::new()
        .route("/duel-info", post(duel_info::<C, B>))
        .route("/duel-win", post(duel_win::<C, B>))
        .route("/duel-loss", post(duel_loss::<C, B>));

    // The game client calls the same handlers under `/api`.
    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .with_state(state)
}

/// Reads the player's counters and forwards them to the stats backend.
async fn duel_info<C: ProgramClient, B: Backend>(
    State(state): State<AppState<C, B>>,
    Json(request): Json<DuelRequest>,
) -> Result<Json<StatsPayload>, ApiError> {
    let wallet = parse_pubkey(&request.public_key)?;
    let player = state
        .client
        .fetch_player(wallet)
        .await?
        .ok_or(ClientError::AccountNotFound(player_pda(wallet).0))?;
    let stats = StatsPayload::from(player);

    // The caller gets the stats whether or not forwarding works.
    match state.backend.update_stats(&stats).await {
        Ok(()) => info!(%wallet, "Stats updated successfully"),
        Err(e) => error!(%wallet, "Failed to update stats: {}", e),
    }

    Ok(Json(stats))
}

async fn duel_win<C: ProgramClient, B: Backend>(
    State(state): State<AppState<C, B>>,
    Json(request): Json<DuelRequest>,
) -> StatusCode {
    record(&state, &request, DuelInstruction::WinIncrement).await
}

async fn duel_loss<C: ProgramClient, B: Backend>(
    State(state): State<AppState<C, B>>,
    Json(request): Json<DuelRequest>,
) -> StatusCode {
    record(&state, &request, DuelInstruction::LossIncrement).await
}

async fn record<C: ProgramClient, B: Backend>(
    state: &AppState<C, B>,
    request: &DuelRequest,
    instruction: DuelInstruction,
) -> StatusCode {
    let wallet = match parse_pubkey(&request.public_key) {
        Ok(wallet) => wallet,
        Err(e) => {
            error!("Error submitting {}: {}", instruction, e);
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    match state.client.invoke(instruction, wallet).await {
        Ok(signature) => {
            info!(%wallet, "Transaction successful: {}", explorer_url(&signature));
            StatusCode::OK
        }
        Err(e) => {
            error!(%wallet, "Error submitting {}: {}", instruction, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use duel_api::state::Player;
    use duel_client::mock::{MemoryProgramClient, RecordingBackend};
    use http_body_util::BodyExt;
    use solana_sdk::pubkey::Pubkey;
    use tower::ServiceExt;

    use super::*;

    fn setup() -> (AppState<MemoryProgramClient, RecordingBackend>, Router) {
        let state = AppState::new(
            MemoryProgramClient::new(Pubkey::new_unique()),
            RecordingBackend::default(),
        );
        let app = router(state.clone());
        (state, app)
    }

    fn request(path: &str, public_key: &str) -> Request<Body> {
        Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "public_key": public_key }).to_string(),
            ))
            .unwrap()
    }

    async fn body(response: axum::response::Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn test_duel_info_returns_and_forwards_stats() {
        let (state, app) = setup();
        let wallet = Pubkey::new_unique();
        state.client.insert(wallet, Player { win: 3, loss: 5 });

        let response = app
            .oneshot(request("/duel-info", &wallet.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stats: StatsPayload = serde_json::from_slice(&body(response).await).unwrap();
        assert_eq!(stats, StatsPayload { win: 3, loss: 5 });
        assert_eq!(state.backend.stats(), vec![stats]);
    }

    #[tokio::test]
    async fn test_duel_info_ignores_forwarding_failure() {
        let (state, app) = setup();
        let wallet = Pubkey::new_unique();
        state.client.insert(wallet, Player { win: 1, loss: 0 });
        state.backend.fail_stats(true);

        let response = app
            .oneshot(request("/duel-info", &wallet.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stats: StatsPayload = serde_json::from_slice(&body(response).await).unwrap();
        assert_eq!(stats, StatsPayload { win: 1, loss: 0 });
        assert!(state.backend.stats().is_empty());
    }

    #[tokio::test]
    async fn test_duel_info_uninitialized_account() {
        let (state, app) = setup();

        let response = app
            .oneshot(request("/duel-info", "11111111111111111111111111111111"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body(response).await.is_empty());
        assert!(state.backend.stats().is_empty());
    }

    #[tokio::test]
    async fn test_duel_info_rpc_failure() {
        let (state, app) = setup();
        let wallet = Pubkey::new_unique();
        state.client.insert(wallet, Player::default());
        state.client.fail_fetches(true);

        let response = app
            .oneshot(request("/duel-info", &wallet.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_duel_win_increments() {
        let (state, app) = setup();
        let wallet = Pubkey::new_unique();
        state.client.insert(wallet, Player { win: 2, loss: 1 });

        let response = app
            .clone()
            .oneshot(request("/duel-win", &wallet.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.is_empty());
        assert_eq!(state.client.player(wallet), Some(Player { win: 3, loss: 1 }));

        // No deduplication: a repeated request counts again.
        let response = app
            .oneshot(request("/duel-win", &wallet.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.client.player(wallet), Some(Player { win: 4, loss: 1 }));
    }

    #[tokio::test]
    async fn test_duel_loss_increments() {
        let (state, app) = setup();
        let wallet = Pubkey::new_unique();
        state.client.insert(wallet, Player::default());

        let response = app
            .oneshot(request("/duel-loss", &wallet.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.client.player(wallet), Some(Player { win: 0, loss: 1 }));
        assert_eq!(
            state.client.invocations(),
            vec![(DuelInstruction::LossIncrement, wallet)]
        );
    }

    #[tokio::test]
    async fn test_duel_win_failure_is_bare_500() {
        let (state, app) = setup();
        let wallet = Pubkey::new_unique();
        state.client.insert(wallet, Player::default());
        state.client.fail_invokes(true);

        let response = app
            .oneshot(request("/duel-win", &wallet.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body(response).await.is_empty());
        assert_eq!(state.client.player(wallet), Some(Player::default()));
    }

    #[tokio::test]
    async fn test_duel_win_invalid_public_key() {
        let (state, app) = setup();

        let response = app
            .oneshot(request("/duel-win", "not-a-wallet"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body(response).await.is_empty());
        assert!(state.client.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_routes_under_api_prefix() {
        let (state, app) = setup();
        let wallet = Pubkey::new_unique();
        state.client.insert(wallet, Player { win: 4, loss: 1 });

        let response = app
            .clone()
            .oneshot(request("/api/duel-info", &wallet.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stats: StatsPayload = serde_json::from_slice(&body(response).await).unwrap();
        assert_eq!(stats, StatsPayload { win: 4, loss: 1 });

        for path in ["/api/duel-win", "/api/duel-loss"] {
            let response = app.clone().oneshot(request(path, &wallet.to_string())).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert_eq!(state.client.player(wallet), Some(Player { win: 5, loss: 2 }));
    }

    #[tokio::test]
    async fn test_concurrent_wins_are_not_lost() {
        let (state, app) = setup();
        let wallet = Pubkey::new_unique();
        state.client.insert(wallet, Player::default());

        let (a, b) = tokio::join!(
            app.clone().oneshot(request("/duel-win", &wallet.to_string())),
            app.clone().oneshot(request("/duel-win", &wallet.to_string())),
        );
        assert_eq!(a.unwrap().status(), StatusCode::OK);
        assert_eq!(b.unwrap().status(), StatusCode::OK);
        assert_eq!(state.client.player(wallet), Some(Player { win: 2, loss: 0 }));
    }
}
