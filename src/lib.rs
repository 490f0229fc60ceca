//! # Lowlight Gallery
//!
//! Publishing tool for client photo deliveries. A gallery is a directory of
//! final images described by a `manifest.json`; this crate fetches that
//! manifest and produces the two client-facing artifacts:
//!
//! ```text
//! 1. Render    manifest  →  index.html              (tile grid with view/download links)
//! 2. Archive   manifest  →  <zipName>.zip           (every full-res image, one ZIP)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | HTTP retrieval behind the [`fetch::Fetcher`] trait seam, cache-busting headers |
//! | [`manifest`] | `manifest.json` loading and normalization of the two accepted entry shapes |
//! | [`render`] | Gallery/empty/error page rendering with Maud |
//! | [`archive`] | Sequential image fetching, in-memory ZIP assembly, trigger state |
//! | [`config`] | `config.toml` loading with defaults and validation |
//! | [`output`] | CLI output formatting — inventory and summary lines |
//!
//! # Design Decisions
//!
//! ## Sequential Fetching
//!
//! Archive builds fetch one image at a time. Client galleries live on small
//! static hosts; a burst of parallel full-resolution downloads is exactly
//! the load pattern that gets a shared host throttled. One request in
//! flight keeps the build well under any rate limit, and the bottleneck is
//! the client's downlink anyway.
//!
//! ## Fail-Fast Archives
//!
//! A partial delivery is worse than a failed one: a client who receives a
//! ZIP missing three photos will not notice until the shoot is long
//! archived. Any fetch failure aborts the whole build and nothing is
//! written.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed HTML
//! is a build error, interpolation is auto-escaped, and there is no
//! template directory to ship or get out of sync.
//!
//! ## Tolerant Manifests
//!
//! Manifests are hand-edited. An entry with a missing or empty `url` is
//! dropped rather than failing the page; a shorter gallery beats a hard
//! crash. The `check` command reports the drop count so publishers can
//! catch mistakes before clients do.

pub mod archive;
pub mod config;
pub mod fetch;
pub mod manifest;
pub mod output;
pub mod render;
