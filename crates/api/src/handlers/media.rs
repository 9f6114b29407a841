//! Handler listing the site's background images.

use std::io::ErrorKind;

use axum::extract::State;
use axum::Json;
use labsite_core::media::{is_background_image, public_url, BackgroundImages};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/background-images
///
/// Image files of the configured directory as public URLs, sorted by name.
/// A missing directory is a 404.
pub async fn background_images(
    State(state): State<AppState>,
) -> AppResult<Json<BackgroundImages>> {
    let dir = &state.config.background_image_dir;
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(
                "Background image directory does not exist".to_string(),
            ));
        }
        Err(err) => {
            return Err(AppError::InternalError(format!(
                "Failed to read {}: {err}",
                dir.display()
            )));
        }
    };

    let mut names = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(err) => {
                return Err(AppError::InternalError(format!(
                    "Failed to read {}: {err}",
                    dir.display()
                )));
            }
        };
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if let Some(name) = entry.file_name().to_str() {
            if is_file && is_background_image(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    Ok(Json(BackgroundImages {
        images: names.iter().map(|name| public_url(name)).collect(),
    }))
}
