/// Headliner Server - fantasy music league API
use anyhow::Context;
use clap::{Parser, Subcommand};
use headliner_core::{CreateArtist, CreatePlayer};
use headliner_server::{
    config::ServerConfig, create_router, services::CredentialService, state::AppState,
};
use sqlx::SqlitePool;
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "headliner-server")]
#[command(about = "Headliner fantasy music league server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "HEADLINER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new player
    AddPlayer {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Login name
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all players
    ListPlayers,
    /// Import artists from a JSON array file
    ImportArtists {
        /// Path to the JSON file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "headliner_server=info,headliner_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddPlayer {
            name,
            username,
            password,
        } => add_player(&config, name, username, &password).await?,
        Commands::ListPlayers => list_players(&config).await?,
        Commands::ImportArtists { path } => import_artists(&config, &path).await?,
    }

    Ok(())
}

async fn open_database(config: &ServerConfig) -> anyhow::Result<SqlitePool> {
    if let Some(path) = config
        .storage
        .database_url
        .strip_prefix("sqlite://")
        .map(PathBuf::from)
    {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let pool = headliner_storage::create_pool(&config.storage.database_url).await?;
    headliner_storage::run_migrations(&pool).await?;
    Ok(pool)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Headliner Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = open_database(&config).await?;
    tracing::info!("Database connected");

    let app_state = AppState::initialize(pool, &config).await?;
    tracing::info!(date = %app_state.engine.current_date(), "League engine ready");

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_player(
    config: &ServerConfig,
    name: String,
    username: String,
    password: &str,
) -> anyhow::Result<()> {
    let pool = open_database(config).await?;
    let credentials = CredentialService::new(config.auth.bcrypt_cost);

    let password_hash = credentials.hash_password(password)?;
    let player = headliner_storage::players::create_with_credentials(
        &pool,
        CreatePlayer { name, username },
        &password_hash,
    )
    .await?;

    println!("Created player {} ({})", player.id, player.username);
    Ok(())
}

async fn list_players(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = open_database(config).await?;
    let players = headliner_storage::players::get_all(&pool).await?;

    println!("Players:");
    for player in players {
        println!("  {} - {} ({})", player.id, player.name, player.username);
    }

    Ok(())
}

async fn import_artists(config: &ServerConfig, path: &Path) -> anyhow::Result<()> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let artists: Vec<CreateArtist> =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;

    let pool = open_database(config).await?;
    let imported = headliner_storage::artists::import(&pool, artists).await?;

    println!("Imported {imported} artists");
    Ok(())
}
