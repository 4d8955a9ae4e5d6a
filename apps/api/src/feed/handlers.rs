use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::feed::aggregate::build_feed;
use crate::models::resume::ResumeFeed;
use crate::state::AppState;

/// Any method, any path — only reached once the jwt gate has passed.
pub async fn handle_get_feed(State(state): State<AppState>) -> Result<Json<ResumeFeed>, AppError> {
    let feed = build_feed(state.executor.as_ref()).await?;
    Ok(Json(feed))
}
