//! Gallery manifest loading and normalization.
//!
//! A gallery is described by a `manifest.json` served next to the gallery
//! page. The file is written by the publishing tooling but is also edited by
//! hand, so its image list accepts two shapes per entry:
//!
//! ```json
//! {
//!   "title": "Margret River — Gallery",
//!   "zipName": "margret-river-lowlight.zip",
//!   "images": [
//!     "./full/001.jpg",
//!     { "url": "./full/002.jpg", "thumb": "./thumbs/002.jpg", "alt": "Dunes" }
//!   ]
//! }
//! ```
//!
//! Normalization reconciles both shapes into [`GalleryImage`] records, in
//! manifest order. Entries with a missing or empty `url` are dropped rather
//! than failing the whole gallery: a shorter gallery beats a broken page.

use crate::fetch::{FetchError, Fetcher};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use url::Url;

/// Manifest filename, resolved relative to the gallery base URL.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Heading shown when the manifest carries no title.
pub const DEFAULT_TITLE: &str = "Client Gallery";

/// Fallback folder link target.
pub const DEFAULT_OPEN_FOLDER: &str = "./full/";

/// Fallback archive filename.
pub const DEFAULT_ZIP_NAME: &str = "lowlight-gallery.zip";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest.json missing: {0}")]
    Fetch(#[from] FetchError),
    #[error("manifest.json is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Root gallery descriptor, loaded once per invocation.
///
/// Every field is optional; display fields fall back via the accessor
/// methods so callers never branch on `Option` themselves.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Manifest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub note: Option<String>,
    pub open_folder: Option<String>,
    pub zip_name: Option<String>,
    #[serde(deserialize_with = "images_or_empty")]
    pub images: Vec<RawImage>,
}

impl Manifest {
    pub fn title(&self) -> &str {
        non_empty(&self.title).unwrap_or(DEFAULT_TITLE)
    }

    pub fn subtitle(&self) -> &str {
        non_empty(&self.subtitle).unwrap_or("")
    }

    pub fn note(&self) -> &str {
        non_empty(&self.note).unwrap_or("")
    }

    pub fn open_folder(&self) -> &str {
        non_empty(&self.open_folder).unwrap_or(DEFAULT_OPEN_FOLDER)
    }

    pub fn zip_name(&self) -> &str {
        non_empty(&self.zip_name).unwrap_or(DEFAULT_ZIP_NAME)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// One raw entry from the manifest's `images` array.
///
/// The two accepted shapes are an explicit untagged union, resolved once
/// during normalization rather than re-checked at use sites.
/// `Other` swallows anything that is neither a string nor an object, keeping
/// the entry's position so synthetic filenames stay stable.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawImage {
    Path(String),
    Entry {
        url: Option<String>,
        thumb: Option<String>,
        filename: Option<String>,
        alt: Option<String>,
    },
    Other(serde_json::Value),
}

/// A non-array or missing `images` field is an empty gallery, not an error.
fn images_or_empty<'de, D>(deserializer: D) -> Result<Vec<RawImage>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(entries) => entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// Uniform image record derived from one valid raw entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    /// Full-resolution asset, relative to the gallery base. Never empty.
    pub url: String,
    /// Archive entry name and forced-download filename.
    pub filename: String,
    /// Tile preview; falls back to the full asset.
    pub thumb: String,
    /// Alt text; empty means the renderer substitutes the display label.
    pub alt: String,
}

/// Fetch and parse the gallery manifest.
///
/// The manifest URL is resolved against the gallery base so the same tool
/// works for galleries served from any subdirectory.
pub fn load(fetcher: &dyn Fetcher, base: &Url) -> Result<Manifest, ManifestError> {
    let manifest_url = base.join(MANIFEST_FILE).map_err(FetchError::from)?;
    let body = fetcher.fetch(&manifest_url)?;
    Ok(serde_json::from_slice(&body)?)
}

/// Normalize raw entries into gallery images, dropping invalid ones.
///
/// Total function: malformed entries are filtered, never raised. Manifest
/// order is preserved; nothing is deduplicated.
pub fn normalize(raw: &[RawImage]) -> Vec<GalleryImage> {
    raw.iter()
        .enumerate()
        .filter_map(|(idx, entry)| normalize_entry(entry, idx + 1))
        .collect()
}

fn normalize_entry(entry: &RawImage, position: usize) -> Option<GalleryImage> {
    match entry {
        RawImage::Path(url) if !url.is_empty() => Some(GalleryImage {
            url: url.clone(),
            filename: derive_filename(url, position),
            thumb: url.clone(),
            alt: String::new(),
        }),
        RawImage::Entry {
            url: Some(url),
            thumb,
            filename,
            alt,
        } if !url.is_empty() => Some(GalleryImage {
            url: url.clone(),
            filename: filename
                .clone()
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| derive_filename(url, position)),
            thumb: thumb
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| url.clone()),
            alt: alt.clone().unwrap_or_default(),
        }),
        _ => None,
    }
}

/// Derive a filename from the final path segment of `url`. A URL ending in
/// `/` yields a synthetic name from the entry's 1-based manifest position.
fn derive_filename(url: &str, position: usize) -> String {
    match url.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => format!("image-{position}.jpg"),
    }
}
