//! Background image listing for the landing page.

use serde::{Deserialize, Serialize};

/// Public URL prefix under which background images are served.
pub const BACKGROUND_URL_PREFIX: &str = "/upload/background";

/// File extensions treated as background images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImages {
    pub images: Vec<String>,
}

/// Whether `file_name` has one of the accepted image extensions.
pub fn is_background_image(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        _ => false,
    }
}

/// Public URL for a background image file.
pub fn public_url(file_name: &str) -> String {
    format!("{BACKGROUND_URL_PREFIX}/{file_name}")
}
