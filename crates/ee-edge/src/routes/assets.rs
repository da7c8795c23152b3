//! Tool images, served locally or fetched from the logo fallback.

use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;

use ee_common::EdgeError;

use crate::error::ApiError;
use crate::proxy::sanitize_asset_path;
use crate::state::AppState;

pub async fn tools_image(
    State(state): State<AppState>,
    Path(file): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let file = sanitize_asset_path(&file).ok_or(EdgeError::InvalidInput("invalid_asset_path"))?;

    let local = state.config.assets.local_image(file);
    if tokio::fs::metadata(&local).await.is_ok_and(|m| m.is_file()) {
        debug!(file = %file, "Serving local tool image");
        let response = ServeFile::new(local)
            .oneshot(request)
            .await
            .map_err(|e| EdgeError::Internal(e.to_string()))?;
        return Ok(response.into_response());
    }

    debug!(
        file = %file,
        origin = %state.assets.origin(),
        "Tool image missing locally, fetching fallback"
    );
    Ok(state.assets.fetch(file).await?)
}
