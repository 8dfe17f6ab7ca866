use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use newstag::cli::{Cli, Commands};
use newstag::config::Config;
use newstag::domain::CategoryMap;
use newstag::generation::GeminiClient;
use newstag::server::{self, AppState};
use newstag::services::{NewsService, TagService};
use newstag::sources::RssAtomSource;

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => cmd_serve(&host, port).await,
        Commands::Fetch { category } => cmd_fetch(&category).await,
        Commands::Categories => cmd_categories(),
    }
}

fn build_news_service(config: &Config) -> anyhow::Result<NewsService> {
    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;

    let generator = GeminiClient::from_config(http_client.clone(), config);
    info!(model = generator.model(), "Using Gemini model");

    Ok(NewsService::new(
        Box::new(RssAtomSource::new(http_client)),
        TagService::new(Box::new(generator)),
        config.categories.clone(),
        config.tag_concurrency,
    ))
}

async fn cmd_serve(host: &str, port: u16) -> anyhow::Result<()> {
    // Fail before binding when the API key is missing
    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))?;

    let state = AppState::new(build_news_service(&config)?);
    server::run_server(addr, state).await?;
    Ok(())
}

async fn cmd_fetch(category: &str) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let service = build_news_service(&config)?;

    let items = service.fetch_tagged(category).await?;
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

fn cmd_categories() -> anyhow::Result<()> {
    let categories = CategoryMap::default();

    println!("Configured categories:\n");
    for (key, url) in categories.iter() {
        println!("  {}", key);
        println!("    Feed: {}", url);
    }

    Ok(())
}
