use crate::error::{ErrorKind, Result};
use clap::{Parser, Subcommand};
use exn::ResultExt;
use pokevault_client::{HttpTransport, LimitedTransport, TransportHandle, parse_url};
use pokevault_config::{ApiConfig, Config};
use pokevault_dex::{Context, MemorySink, Sink, catalog_url};
use pokevault_imagecache::ImageCache;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::time::Instant;

/// Fetch, assemble and cache the PokeAPI catalog.
#[derive(Parser, Debug)]
#[command(name = "pokevault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file, layered over the per-user one
    #[arg(short, long, global = true, env = "POKEVAULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors, and skip the summary line
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve every catalog entry and write the results as JSON
    Refresh {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load images through the cache and print their dimensions
    Image {
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

pub async fn execute(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    match cli.command {
        Commands::Refresh { output } => refresh(&config, output, cli.quiet).await,
        Commands::Image { urls } => images(&config, &urls).await,
    }
}

/// Every request the process makes goes through one shared limiter.
fn transport(api: &ApiConfig) -> Result<TransportHandle> {
    let http = HttpTransport::new(api.connect_timeout(), api.request_timeout()).or_raise(|| ErrorKind::Transport)?;
    Ok(Arc::new(LimitedTransport::new(Arc::new(http), api.max_in_flight)))
}

async fn refresh(config: &Config, output: Option<PathBuf>, quiet: bool) -> Result<()> {
    let transport = transport(&config.api)?;
    let api_base = parse_url(&config.api.base_url).or_raise(|| ErrorKind::Config)?;
    let ctx = Context::new(api_base.clone())
        .with_max_concurrency(config.refresh.max_concurrency)
        .with_language(config.refresh.language.as_str());
    let sink = MemorySink::new();

    let list_url = catalog_url(&api_base, config.api.catalog_limit);
    let summary = pokevault_dex::refresh(&transport, &sink, &ctx, &list_url).await.or_raise(|| ErrorKind::Refresh)?;

    let mut details = sink.fetch_all().await.or_raise(|| ErrorKind::Refresh)?;
    details.sort_by_key(|detail| detail.id);
    let mut json = serde_json::to_vec_pretty(&details).or_raise(|| ErrorKind::Output)?;
    json.push(b'\n');
    match &output {
        Some(path) => tokio::fs::write(path, &json).await.or_raise(|| ErrorKind::Output)?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&json).await.or_raise(|| ErrorKind::Output)?;
            stdout.flush().await.or_raise(|| ErrorKind::Output)?;
        },
    }

    if !quiet {
        eprintln!(
            "discovered {}, stored {}, omitted {}",
            summary.discovered, summary.stored, summary.omitted
        );
    }
    Ok(())
}

/// Each URL is loaded twice; the second load is served from the cache.
async fn images(config: &Config, urls: &[String]) -> Result<()> {
    let cache = ImageCache::new(transport(&config.api)?);
    let mut failed = 0;
    for url in urls {
        let started = Instant::now();
        let image = match cache.load(url).await {
            Ok(image) => image,
            Err(e) => {
                tracing::error!(%url, error = ?e, "could not load image");
                failed += 1;
                continue;
            },
        };
        let cold = started.elapsed();
        let started = Instant::now();
        let cached = cache.load(url).await.is_ok_and(|again| Arc::ptr_eq(&image, &again));
        let warm = started.elapsed();
        println!(
            "{url}\t{}x{}\tfetched in {cold:.2?}\t{} in {warm:.2?}",
            image.width(),
            image.height(),
            if cached { "cached" } else { "not cached" },
        );
    }
    if failed > 0 {
        exn::bail!(ErrorKind::Images(failed));
    }
    Ok(())
}
