use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf::api::{self, AppState};
use bookshelf::config::Settings;

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "HTTP service for managing a catalog of books")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create the books table if it is missing, then exit
    InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "bookshelf=debug,bookshelf_core=debug,tower_http=debug".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&cli.settings).await?,
        Commands::InitDb => {
            let db = cli.settings.open_database()?;
            db.migrate()?;
            tracing::info!("Initialized book store at {}", db.path().display());
        }
    }

    Ok(())
}

async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let db = settings.open_database()?;
    db.migrate()?;

    let app = api::create_router(AppState::from_database(db));

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Bookshelf server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Bookshelf server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
