//! Gallery page rendering.
//!
//! Produces the static HTML delivered to clients: a header with the
//! manifest's display strings, one tile per normalized image, and the two
//! page-level controls (open-folder link, download-all link pointing at the
//! published archive).
//!
//! Three page states, all distinguishable:
//!
//! - **Gallery**: tile grid, one tile per image with View and Download
//!   affordances and a `Photo NNN` label.
//! - **Empty**: the manifest loaded but lists no images — an explicit
//!   "No images yet." message instead of a bare grid.
//! - **Error**: the manifest could not be loaded — the message carries the
//!   underlying error text so a publisher can debug from the page alone.
//!
//! Rendering is a pure function of the manifest and image list; it runs
//! exactly once per invocation and is not designed for incremental updates.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/): compile-time
//! checked templates with auto-escaped interpolation.

use crate::manifest::{GalleryImage, Manifest};
use maud::{DOCTYPE, Markup, html};

const CSS: &str = include_str!("../static/style.css");

/// Message shown when the manifest lists no images.
pub const EMPTY_MESSAGE: &str = "No images yet.";

/// Format a 0-based image index as its display label, e.g. `Photo 007`.
pub fn human_index(index: usize) -> String {
    format!("Photo {:03}", index + 1)
}

/// Renders the base HTML document structure.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the full gallery page (or its empty state) from a loaded manifest.
pub fn gallery_page(manifest: &Manifest, images: &[GalleryImage]) -> Markup {
    let content = html! {
        header.gallery-header {
            h1 { (manifest.title()) }
            @if !manifest.subtitle().is_empty() {
                p.meta { (manifest.subtitle()) }
            }
            @if !manifest.note().is_empty() {
                p.note { (manifest.note()) }
            }
            div.gallery-actions {
                a.btn href=(manifest.open_folder()) { "Open folder" }
                a.btn.btn-primary href=(manifest.zip_name()) download=(manifest.zip_name()) {
                    "Download all (ZIP)"
                }
            }
        }
        main {
            @if images.is_empty() {
                p.empty { (EMPTY_MESSAGE) }
            } @else {
                div.grid {
                    @for (idx, image) in images.iter().enumerate() {
                        (tile(idx, image))
                    }
                }
            }
        }
    };

    base_document(manifest.title(), content)
}

/// Renders one tile: preview link plus the View/Download affordances.
fn tile(index: usize, image: &GalleryImage) -> Markup {
    let label = human_index(index);
    let alt = if image.alt.is_empty() {
        label.clone()
    } else {
        image.alt.clone()
    };

    html! {
        div.tile {
            a.preview href=(image.url) target="_blank" rel="noopener" {
                img src=(image.thumb) alt=(alt) loading="lazy" decoding="async";
            }
            div.tile-bar {
                div.chip { (label) }
                div.tile-actions {
                    a.btn-mini.btn-mini-ghost href=(image.url) target="_blank" rel="noopener" {
                        "View"
                    }
                    a.btn-mini href=(image.url) download=(image.filename) { "Download" }
                }
            }
        }
    }
}

/// Renders the page shown when the manifest itself cannot be loaded.
///
/// The cause text is embedded verbatim (escaped) so a failed gallery is
/// debuggable without server access.
pub fn error_page(cause: &str) -> Markup {
    let content = html! {
        main {
            p.empty { "Gallery not found: " (cause) }
        }
    };

    base_document("Gallery not found", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::normalize;

    fn test_manifest() -> Manifest {
        serde_json::from_str(
            r#"{
                "title": "Margret River — Gallery",
                "subtitle": "Delivered 2026-01-19 · Lowlight Studio",
                "note": "These are your final edits.",
                "zipName": "margret-river-lowlight.zip",
                "images": [
                    { "url": "./full/001.jpg", "thumb": "./thumbs/001.jpg" },
                    "./full/002.jpg"
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn human_index_zero_pads_to_three_digits() {
        assert_eq!(human_index(0), "Photo 001");
        assert_eq!(human_index(6), "Photo 007");
        assert_eq!(human_index(41), "Photo 042");
        assert_eq!(human_index(99), "Photo 100");
    }

    #[test]
    fn gallery_page_shows_header_strings() {
        let manifest = test_manifest();
        let images = normalize(&manifest.images);
        let html = gallery_page(&manifest, &images).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Margret River — Gallery"));
        assert!(html.contains("Delivered 2026-01-19"));
        assert!(html.contains("These are your final edits."));
    }

    #[test]
    fn gallery_page_renders_one_tile_per_image() {
        let manifest = test_manifest();
        let images = normalize(&manifest.images);
        let html = gallery_page(&manifest, &images).into_string();

        assert_eq!(html.matches("class=\"tile\"").count(), 2);
        assert!(html.contains("Photo 001"));
        assert!(html.contains("Photo 002"));
        assert!(!html.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn tile_has_view_and_download_affordances() {
        let manifest = test_manifest();
        let images = normalize(&manifest.images);
        let html = gallery_page(&manifest, &images).into_string();

        assert!(html.contains(r#"target="_blank" rel="noopener""#));
        assert!(html.contains(r#"download="001.jpg""#));
        assert!(html.contains(r#"src="./thumbs/001.jpg""#));
        // The string-shaped entry falls back to the full asset as thumb.
        assert!(html.contains(r#"src="./full/002.jpg""#));
    }

    #[test]
    fn tile_alt_falls_back_to_display_label() {
        let manifest = test_manifest();
        let images = normalize(&manifest.images);
        let html = gallery_page(&manifest, &images).into_string();
        assert!(html.contains(r#"alt="Photo 001""#));
    }

    #[test]
    fn download_all_links_to_archive_name() {
        let manifest = test_manifest();
        let images = normalize(&manifest.images);
        let html = gallery_page(&manifest, &images).into_string();

        assert!(html.contains(r#"href="margret-river-lowlight.zip""#));
        assert!(html.contains("Download all (ZIP)"));
    }

    #[test]
    fn empty_gallery_shows_message_and_no_grid() {
        let manifest: Manifest = serde_json::from_str(r#"{ "images": [] }"#).unwrap();
        let html = gallery_page(&manifest, &[]).into_string();

        assert!(html.contains(EMPTY_MESSAGE));
        assert!(!html.contains("class=\"grid\""));
        assert!(!html.contains("class=\"tile\""));
    }

    #[test]
    fn defaults_used_when_manifest_is_bare() {
        let manifest: Manifest = serde_json::from_str("{}").unwrap();
        let html = gallery_page(&manifest, &[]).into_string();

        assert!(html.contains("Client Gallery"));
        assert!(html.contains(r#"href="./full/""#));
        assert!(html.contains(r#"href="lowlight-gallery.zip""#));
    }

    #[test]
    fn error_page_includes_cause_text() {
        let html = error_page("manifest.json missing: https://x/manifest.json returned HTTP 404")
            .into_string();
        assert!(html.contains("Gallery not found"));
        assert!(html.contains("HTTP 404"));
    }

    #[test]
    fn error_page_escapes_cause() {
        let html = error_page("<script>alert('x')</script>").into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
