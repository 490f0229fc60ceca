use clap::{Parser, Subcommand};
use lowlight_gallery::archive::DownloadTrigger;
use lowlight_gallery::fetch::HttpFetcher;
use lowlight_gallery::{archive, config, fetch, manifest, output, render};
use std::path::PathBuf;
use std::time::Instant;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "lowlight-gallery")]
#[command(about = "Publish client photo galleries from a manifest.json")]
#[command(long_about = "\
Publish client photo galleries from a manifest.json

A gallery is a directory of delivered images served from a static host,
described by a manifest.json next to the gallery page:

  {
    \"title\": \"Margret River — Gallery\",
    \"subtitle\": \"Delivered 2026-01-19 · Lowlight Studio\",
    \"zipName\": \"margret-river-lowlight.zip\",
    \"openFolder\": \"./full/\",
    \"images\": [
      \"./full/001.jpg\",
      { \"url\": \"./full/002.jpg\", \"thumb\": \"./thumbs/002.jpg\", \"alt\": \"Dunes\" }
    ]
  }

Image entries are either a bare URL string or an object with url plus
optional thumb, filename, and alt. Entries without a usable url are
dropped; run 'check' to see the drop count before clients do.

The manifest is always fetched with caching disabled, so a re-published
gallery is picked up immediately.")]
#[command(version = version_string())]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the gallery page from the manifest
    Render {
        /// Gallery base URL (manifest.json is resolved against it)
        gallery: String,
        /// Output directory (defaults to config output.dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Fetch every image and build the delivery ZIP
    Archive {
        /// Gallery base URL (manifest.json is resolved against it)
        gallery: String,
        /// Output file (defaults to the manifest's zipName)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Fetch and validate the manifest without writing anything
    Check {
        /// Gallery base URL (manifest.json is resolved against it)
        gallery: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Render { gallery, output } => {
            let base = fetch::gallery_base(&gallery)?;
            let fetcher = HttpFetcher::new(&config.fetch)?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from(&config.output.dir));
            std::fs::create_dir_all(&output_dir)?;

            match manifest::load(&fetcher, &base) {
                Ok(manifest) => {
                    let images = manifest::normalize(&manifest.images);
                    let page = render::gallery_page(&manifest, &images);
                    std::fs::write(output_dir.join("index.html"), page.into_string())?;
                    output::print_render_output(&manifest, &images, &output_dir);
                }
                Err(err) => {
                    // Fatal to the gallery, but still leave a debuggable page
                    // behind before reporting failure.
                    let page = render::error_page(&err.to_string());
                    std::fs::write(output_dir.join("index.html"), page.into_string())?;
                    return Err(err.into());
                }
            }
        }
        Command::Archive { gallery, output } => {
            let base = fetch::gallery_base(&gallery)?;
            let fetcher = HttpFetcher::new(&config.fetch)?;
            let manifest = manifest::load(&fetcher, &base)?;
            let images = manifest::normalize(&manifest.images);

            let mut trigger = DownloadTrigger::new();
            trigger.begin();
            println!("{}", trigger.label(Instant::now()));

            match archive::build(&fetcher, &base, &images) {
                Ok(bytes) => {
                    let zip_path =
                        output.unwrap_or_else(|| PathBuf::from(manifest.zip_name()));
                    std::fs::write(&zip_path, &bytes)?;
                    trigger.succeed();
                    output::print_archive_output(&zip_path, images.len(), bytes.len());
                }
                Err(err) => {
                    trigger.fail(Instant::now());
                    eprintln!("{}", trigger.label(Instant::now()));
                    return Err(err.into());
                }
            }
        }
        Command::Check { gallery } => {
            let base = fetch::gallery_base(&gallery)?;
            let fetcher = HttpFetcher::new(&config.fetch)?;
            let manifest = manifest::load(&fetcher, &base)?;
            let images = manifest::normalize(&manifest.images);
            output::print_check_output(&manifest, &images, manifest.images.len());
        }
    }

    Ok(())
}
