use book_search::app;
use book_search::config::Config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let summary = app::run(&config).await?;

    tracing::info!(
        "Indexed {} chapters from {} books",
        summary.documents,
        summary.books
    );
    for report in &summary.reports {
        println!("{}\n", report);
    }

    Ok(())
}
