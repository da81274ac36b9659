use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use sweeper_protocol::{
    API_PREFIX, CellRequest, Difficulty, GameId, GameStateView, Health, LeaderboardEntry,
    LeaderboardQuery, NewGameRequest, NewScore, ScoreRecord, ServiceInfo,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;

pub fn router(state: SharedState) -> Router {
    let api = Router::new()
        .route("/game/new", post(new_game))
        .route("/game/{game_id}", get(get_game))
        .route("/game/{game_id}/reveal", post(reveal_cell))
        .route("/game/{game_id}/flag", post(toggle_flag))
        .route("/leaderboard/scores", post(submit_score))
        .route("/leaderboard/{difficulty}", get(leaderboard));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .layer(cors_layer(&state.settings.cors_origins))
        .with_state(state)
}

/// Credentials are allowed, so request headers are mirrored back
/// instead of answering with a wildcard.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::list([Method::GET, Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::mirror_request())
}

async fn root(State(state): State<SharedState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        app: state.settings.app_name.clone(),
        version: state.settings.app_version.clone(),
        status: "ok".into(),
    })
}

async fn health() -> Json<Health> {
    Json(Health::healthy())
}

// Extractors are taken as `Result` so their rejections are answered with an
// `ErrorBody` like every other failure.
type JsonBody<T> = Result<Json<T>, JsonRejection>;
type GamePath = Result<Path<GameId>, PathRejection>;

async fn new_game(
    State(state): State<SharedState>,
    req: JsonBody<NewGameRequest>,
) -> ApiResult<Json<GameStateView>> {
    let Json(req) = req?;
    let view = state.games.create_game(req.difficulty, &req.player_name)?;
    Ok(Json(view))
}

async fn get_game(
    State(state): State<SharedState>,
    game_id: GamePath,
) -> ApiResult<Json<GameStateView>> {
    let Path(game_id) = game_id?;
    Ok(Json(state.games.get_game(&game_id)?))
}

async fn reveal_cell(
    State(state): State<SharedState>,
    game_id: GamePath,
    req: JsonBody<CellRequest>,
) -> ApiResult<Json<GameStateView>> {
    let (Path(game_id), Json(req)) = (game_id?, req?);
    Ok(Json(state.games.reveal_cell(&game_id, req.row, req.col)?))
}

async fn toggle_flag(
    State(state): State<SharedState>,
    game_id: GamePath,
    req: JsonBody<CellRequest>,
) -> ApiResult<Json<GameStateView>> {
    let (Path(game_id), Json(req)) = (game_id?, req?);
    Ok(Json(state.games.toggle_flag(&game_id, req.row, req.col)?))
}

async fn submit_score(
    State(state): State<SharedState>,
    score: JsonBody<NewScore>,
) -> ApiResult<Json<ScoreRecord>> {
    let Json(score) = score?;
    // file-backed stores write synchronously
    let record = tokio::task::spawn_blocking(move || state.scores.save(score))
        .await
        .map_err(|err| {
            log::error!("score task panicked: {}", err);
            ApiError::Task
        })??;
    log::info!(
        "score {} submitted by {} ({}, won: {})",
        record.id,
        record.player_name,
        record.difficulty,
        record.won
    );
    Ok(Json(record))
}

async fn leaderboard(
    State(state): State<SharedState>,
    difficulty: Result<Path<String>, PathRejection>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    let Path(difficulty) = difficulty?;
    let Query(query) = query?;
    let difficulty: Difficulty = difficulty.parse()?;
    if !query.is_valid() {
        return Err(ApiError::InvalidLimit);
    }
    Ok(Json(state.scores.leaderboard(difficulty, query.limit)?))
}
