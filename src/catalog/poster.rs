use image::DynamicImage;

use crate::catalog::client::CatalogClient;
use crate::catalog::error::CatalogError;

/// TMDB image CDN, sized for a terminal half-pane.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w342";

/// Absolute poster URL for a `poster_path` such as `/kqjL17yufvn9OVLyXYpvtyrFfak.jpg`.
pub fn poster_url(poster_path: &str) -> String {
    format!("{}/{}", IMAGE_BASE_URL, poster_path.trim_start_matches('/'))
}

/// Downloads and decodes a poster. The caller turns it into a render protocol.
pub fn fetch_poster(client: &CatalogClient, url: &str) -> Result<DynamicImage, CatalogError> {
    let bytes = client.fetch_bytes(url)?;
    Ok(image::load_from_memory(&bytes)?)
}
