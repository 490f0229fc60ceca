//! Bulk archive assembly.
//!
//! Fetches every gallery image in manifest order and packs the bytes into an
//! in-memory zip. Fetches are strictly sequential — one outstanding request
//! at a time, so a bulk download never hammers the hosting origin — and
//! fail-fast: any single failure aborts the build and no archive is
//! produced. Clients either get the complete delivery or retry.
//!
//! [`DownloadTrigger`] models the page's download-all control: at most one
//! build runs at a time, a busy label while running, and a failure label
//! that reverts to idle after [`FAILURE_REVERT`].

use crate::fetch::{FetchError, Fetcher};
use crate::manifest::GalleryImage;
use std::io::{Cursor, Write};
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed fetching {url}: {source}")]
    Fetch { url: String, source: FetchError },
    #[error("cannot resolve image URL {url}: {source}")]
    Url {
        url: String,
        source: url::ParseError,
    },
    #[error("zip assembly failed: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetch all images and assemble the zip archive in memory.
///
/// Entries are keyed by each image's resolved filename. Colliding filenames
/// are not disambiguated: the later fetch replaces the earlier bytes, so
/// the archive never holds two entries under one name.
pub fn build(
    fetcher: &dyn Fetcher,
    base: &Url,
    images: &[GalleryImage],
) -> Result<Vec<u8>, ArchiveError> {
    let mut entries: Vec<(String, Vec<u8>)> = Vec::new();

    for image in images {
        let url = base.join(&image.url).map_err(|source| ArchiveError::Url {
            url: image.url.clone(),
            source,
        })?;
        let bytes = fetcher
            .fetch(&url)
            .map_err(|source| ArchiveError::Fetch {
                url: image.url.clone(),
                source,
            })?;

        match entries.iter_mut().find(|(name, _)| *name == image.filename) {
            Some(slot) => slot.1 = bytes,
            None => entries.push((image.filename.clone(), bytes)),
        }
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in &entries {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Idle label of the download-all control.
pub const IDLE_LABEL: &str = "Download all (ZIP)";

/// Label shown while a build is running.
pub const BUSY_LABEL: &str = "Preparing ZIP...";

/// Label shown after a failed build, until it reverts to idle.
pub const FAILED_LABEL: &str = "ZIP failed (too many/big files)";

/// How long the failure label stays up before reverting.
pub const FAILURE_REVERT: Duration = Duration::from_millis(2500);

/// State of the download-all control.
///
/// This is interaction-level mutual exclusion, not a concurrency primitive:
/// while a build is in flight [`begin`](Self::begin) refuses a second one.
/// Failure is transient — the label reverts after [`FAILURE_REVERT`] and the
/// user may retry at any point.
#[derive(Debug, Default)]
pub struct DownloadTrigger {
    state: TriggerState,
}

#[derive(Debug, Default)]
enum TriggerState {
    #[default]
    Idle,
    Busy,
    Failed {
        at: Instant,
    },
}

impl DownloadTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a build. Returns `false` if one is already running.
    pub fn begin(&mut self) -> bool {
        if matches!(self.state, TriggerState::Busy) {
            return false;
        }
        self.state = TriggerState::Busy;
        true
    }

    /// Build finished: revert to idle immediately.
    pub fn succeed(&mut self) {
        self.state = TriggerState::Idle;
    }

    /// Build failed: show the failure label from `now` on.
    pub fn fail(&mut self, now: Instant) {
        self.state = TriggerState::Failed { at: now };
    }

    /// Current label. A failure older than [`FAILURE_REVERT`] reads as idle.
    pub fn label(&self, now: Instant) -> &'static str {
        match self.state {
            TriggerState::Idle => IDLE_LABEL,
            TriggerState::Busy => BUSY_LABEL,
            TriggerState::Failed { at } => {
                if now.duration_since(at) < FAILURE_REVERT {
                    FAILED_LABEL
                } else {
                    IDLE_LABEL
                }
            }
        }
    }
}
