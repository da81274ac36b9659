use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sweeper_core::{GameError, UnknownDifficulty};
use sweeper_protocol::{ErrorBody, MAX_LEADERBOARD_LIMIT};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    UnknownDifficulty(#[from] UnknownDifficulty),
    #[error("limit must be between 1 and {}", MAX_LEADERBOARD_LIMIT)]
    InvalidLimit,
    #[error("background task failed")]
    Task,
    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),
    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),
    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use GameError::*;

        match self {
            Self::Game(GameNotFound) => StatusCode::NOT_FOUND,
            Self::Game(GameFinished) => StatusCode::CONFLICT,
            Self::Game(
                InvalidConfiguration | OutOfBounds | InvalidPlayerName | InvalidScore(_),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Game(Storage(_)) | Self::Task => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UnknownDifficulty(_) | Self::InvalidLimit => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Json(rejection) => rejection.status(),
            Self::Query(rejection) => rejection.status(),
            Self::Path(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        } else {
            log::debug!("request rejected ({}): {}", status, self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_errors_map_to_status_codes() {
        assert_eq!(ApiError::from(GameError::GameNotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(GameError::GameFinished).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(GameError::OutOfBounds).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(GameError::Storage("disk full".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_come_from_the_inner_error() {
        assert_eq!(ApiError::from(GameError::GameNotFound).to_string(), "Game not found");
        assert_eq!(
            ApiError::InvalidLimit.to_string(),
            "limit must be between 1 and 50"
        );
    }
}
