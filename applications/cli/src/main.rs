/// Tune Deck - terminal front end for the music dashboard
use clap::{Parser, Subcommand};
use deck_cli::commands;
use deck_dashboard::DeckConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "deck")]
#[command(about = "Browse playlists and play track previews", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "DECK_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the authorization address
    Login,
    /// Finish login with the address the browser was redirected to
    Callback {
        /// Redirect address (or just its fragment)
        redirect: String,
    },
    /// Forget the stored token
    Logout,
    /// Show the logged-in user
    Profile,
    /// Show the dashboard: featured and top playlists
    Home,
    /// List the user's playlists
    Playlists,
    /// Show a playlist and load its tracks for playback
    Open {
        /// Playlist id
        id: String,
    },
    /// List the loaded tracks
    Tracks,
    /// Interactive preview transport
    Play,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deck=info,deck_cli=info,deck_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = DeckConfig::load(cli.config.as_deref())?;
    config.validate()?;
    tracing::debug!(state_file = ?config.state_file(), "Configuration loaded");

    match cli.command {
        Commands::Login => commands::login(&config)?,
        Commands::Callback { redirect } => commands::callback(&config, &redirect)?,
        Commands::Logout => commands::logout(&config)?,
        Commands::Profile => commands::profile(&config).await?,
        Commands::Home => commands::home(&config).await?,
        Commands::Playlists => commands::playlists(&config).await?,
        Commands::Open { id } => commands::open(&config, &id).await?,
        Commands::Tracks => commands::tracks(&config)?,
        Commands::Play => commands::play(&config)?,
    }

    Ok(())
}
