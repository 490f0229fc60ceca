//! CLI output formatting.
//!
//! Information-first: every image leads with its positional index and
//! archive filename, with the source URL as an indented context line. Each
//! command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! Margret River — Gallery (3 photos)
//!     001 001.jpg
//!         Source: ./full/001.jpg
//!     002 002.jpg
//!         Source: ./full/002.jpg
//!     003 dunes.jpg
//!         Source: ./full/003.jpg
//! Dropped 1 invalid entry
//! ```

use crate::manifest::{GalleryImage, Manifest};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format a byte count for display (B / KB / MB).
fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Gallery inventory: title, per-image lines, dropped-entry count.
///
/// `raw_count` is the manifest's entry count before normalization; the
/// difference is reported in aggregate since individual drops are silent.
pub fn format_check_output(
    manifest: &Manifest,
    images: &[GalleryImage],
    raw_count: usize,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} ({})",
        manifest.title(),
        count_noun(images.len(), "photo", "photos")
    ));

    for (idx, image) in images.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(idx + 1), image.filename));
        lines.push(format!("        Source: {}", image.url));
    }

    let dropped = raw_count.saturating_sub(images.len());
    if dropped > 0 {
        lines.push(format!("Dropped {}", count_noun(dropped, "invalid entry", "invalid entries")));
    }

    lines
}

/// Render summary: where the page went and how many tiles it holds.
pub fn format_render_output(
    manifest: &Manifest,
    images: &[GalleryImage],
    output_dir: &Path,
) -> Vec<String> {
    let mut lines = Vec::new();
    let target = output_dir.join("index.html");
    if images.is_empty() {
        lines.push(format!(
            "{} \u{2192} {} (empty gallery)",
            manifest.title(),
            target.display()
        ));
    } else {
        lines.push(format!(
            "{} \u{2192} {} ({})",
            manifest.title(),
            target.display(),
            count_noun(images.len(), "tile", "tiles")
        ));
    }
    lines
}

/// Archive summary: output path, entry count, compressed size.
pub fn format_archive_output(zip_path: &Path, images: usize, bytes: usize) -> Vec<String> {
    vec![format!(
        "{} \u{2192} {} ({})",
        count_noun(images, "photo", "photos"),
        zip_path.display(),
        format_bytes(bytes)
    )]
}

pub fn print_check_output(manifest: &Manifest, images: &[GalleryImage], raw_count: usize) {
    for line in format_check_output(manifest, images, raw_count) {
        println!("{}", line);
    }
}

pub fn print_render_output(manifest: &Manifest, images: &[GalleryImage], output_dir: &Path) {
    for line in format_render_output(manifest, images, output_dir) {
        println!("{}", line);
    }
}

pub fn print_archive_output(zip_path: &Path, images: usize, bytes: usize) {
    for line in format_archive_output(zip_path, images, bytes) {
        println!("{}", line);
    }
}
