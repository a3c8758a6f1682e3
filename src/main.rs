use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retro_board::config::{DatabaseLocation, ServerConfig};
use retro_board::{api, service::RetrospectiveService};

#[derive(Parser)]
#[command(name = "retro")]
#[command(about = "Track team retrospectives and their feedback")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServerArgs),
    /// Apply pending database migrations and exit
    Migrate(MigrateArgs),
}

#[derive(Args, Default)]
struct ServerArgs {
    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port for HTTP API
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the SQLite database file
    #[arg(long, conflicts_with = "in_memory")]
    database: Option<PathBuf>,

    /// Keep all data in memory
    #[arg(long)]
    in_memory: bool,
}

impl ServerArgs {
    /// Command-line flags win over environment variables.
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::from_env();
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(path) = self.database {
            config.database = DatabaseLocation::Path(path);
        }
        if self.in_memory {
            config.database = DatabaseLocation::Memory;
        }
        config
    }
}

#[derive(Args)]
struct MigrateArgs {
    /// Path to the SQLite database file
    #[arg(long)]
    database: Option<PathBuf>,
}

impl MigrateArgs {
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::from_env();
        if let Some(path) = self.database {
            config.database = DatabaseLocation::Path(path);
        }
        config
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "retro_board=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = config.open_database()?;
    let service = RetrospectiveService::new(Arc::new(db));
    let app = api::create_router(service);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Retrospective server listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve(args)) => serve(args.into_config()).await?,
        Some(Commands::Migrate(args)) => {
            let config = args.into_config();
            config.open_database()?;
            tracing::info!("Database is up to date");
        }
        None => serve(ServerArgs::default().into_config()).await?,
    }

    Ok(())
}
