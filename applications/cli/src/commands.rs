//! Subcommand implementations

use crate::simulator::{Command, SimulatedMedia, Simulator, VirtualInterval};
use crate::view::{self, TerminalView};
use anyhow::Context;
use deck_api_client::auth;
use deck_core::{JsonFileStore, KeyValueStore, PlaylistId};
use deck_dashboard::{connect, Dashboard, DashboardError, DeckConfig};
use deck_playback::Deck;
use std::io::{BufRead, Write};
use tracing::info;

const HELP: &str = "\
play <n|id>   play row n of the track list (or a track id)
toggle        play / pause the loaded track
next, prev    move through the track list
seek <f>      jump to a fraction of the clip (0.5 or 50%)
vol <0-100>   set the volume
wait <secs>   let time pass
list          show the track list
status        show the transport state
quit          leave";

fn open_store(config: &DeckConfig) -> anyhow::Result<JsonFileStore> {
    let path = config.state_file();
    JsonFileStore::open(&path).with_context(|| format!("opening {}", path.display()))
}

/// Turn login-related failures into an instruction
fn explain(err: DashboardError) -> anyhow::Error {
    if err.needs_login() {
        anyhow::anyhow!("{err}; run `deck login`")
    } else {
        err.into()
    }
}

fn dashboard(config: &DeckConfig, store: &JsonFileStore) -> anyhow::Result<Dashboard> {
    let client = connect(config, store, auth::now_ms()).map_err(explain)?;
    Ok(Dashboard::new(client))
}

pub fn login(config: &DeckConfig) -> anyhow::Result<()> {
    let client_id = config.require_client_id()?;
    let url = auth::authorize_url(client_id, &config.auth.redirect_uri, &config.auth.scopes)?;
    println!("Open this address and authorize the app:\n\n  {url}\n");
    println!("Then pass the address you were redirected to to `deck callback`.");
    Ok(())
}

/// Store the token carried by a login redirect
pub fn callback(config: &DeckConfig, redirect: &str) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    let grant = auth::parse_redirect(redirect)?
        .context("the address carries no access token")?;
    let session = auth::store_grant(&mut store, &grant, auth::now_ms())?;
    info!(expires_at_ms = session.expires_at_ms, "Logged in");
    println!("Logged in.");
    Ok(())
}

pub fn logout(config: &DeckConfig) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    sign_out(config, &mut store, std::io::stdout())
}

/// Forget the token in `store` and point the user back at the app
pub fn sign_out<K, W>(config: &DeckConfig, store: &mut K, mut out: W) -> anyhow::Result<()>
where
    K: KeyValueStore + ?Sized,
    W: Write,
{
    auth::logout(store)?;
    writeln!(out, "Logged out. The dashboard is at {}", config.app.url)?;
    Ok(())
}

pub async fn profile(config: &DeckConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let user = dashboard(config, &store)?
        .client()
        .current_user()
        .await
        .map_err(|e| explain(e.into()))?;
    println!("{} ({})", user.greeting_name(), user.id);
    Ok(())
}

pub async fn home(config: &DeckConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut dashboard = dashboard(config, &store)?;
    let view = dashboard.go_home().await.map_err(explain)?;
    print!("{}", view::render_dashboard(&view));
    Ok(())
}

pub async fn playlists(config: &DeckConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let playlists = dashboard(config, &store)?
        .user_playlists()
        .await
        .map_err(explain)?;
    for playlist in playlists {
        println!("{}  {}", playlist.id, playlist.name);
    }
    Ok(())
}

/// Show a playlist and make its tracks the stored track list
pub async fn open(config: &DeckConfig, id: &str) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    let mut dashboard = dashboard(config, &store)?;
    let mut deck = Deck::new(
        SimulatedMedia::default(),
        VirtualInterval::default(),
        &mut store,
        config.player_config(),
    );
    let view = dashboard
        .open_playlist_into(&PlaylistId::new(id), &mut deck)
        .await
        .map_err(explain)?;
    print!("{}", view::render_playlist(&view));
    Ok(())
}

pub fn tracks(config: &DeckConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let simulator = Simulator::new(store, config.player_config());
    let tracks = simulator.deck().tracks().tracks();
    if tracks.is_empty() {
        println!("No tracks loaded; run `deck open <playlist>` first.");
    } else {
        print!("{}", view::render_tracks(tracks, None));
    }
    Ok(())
}

/// Interactive transport over the stored track list
pub fn play(config: &DeckConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut simulator = Simulator::new(store, config.player_config());
    let stdin = std::io::stdin();
    run_session(&mut simulator, stdin.lock(), std::io::stdout())
}

/// Read commands from `input` until it ends or `quit`
pub fn run_session<K, R, W>(simulator: &mut Simulator<K>, input: R, out: W) -> anyhow::Result<()>
where
    K: KeyValueStore,
    R: BufRead,
    W: Write,
{
    // One view for the whole session; it remembers the clip length between lines
    let mut terminal = TerminalView::new(out);
    writeln!(
        terminal.out(),
        "{} tracks loaded, `help` lists commands",
        simulator.deck().tracks().len()
    )?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(terminal.out(), "{message}")?;
                continue;
            }
        };

        match &command {
            Command::Help => writeln!(terminal.out(), "{HELP}")?,
            Command::List => {
                let deck = simulator.deck();
                let loaded = deck.player().loaded_track();
                let listing = view::render_tracks(deck.tracks().tracks(), loaded);
                write!(terminal.out(), "{listing}")?;
            }
            Command::Status => {
                let status = status_line(simulator);
                writeln!(terminal.out(), "{status}")?;
            }
            _ => {}
        }

        match simulator.execute(command, &mut terminal) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => writeln!(terminal.out(), "error: {e}")?,
        }
        terminal.out().flush()?;
    }
    Ok(())
}

fn status_line<K: KeyValueStore>(simulator: &Simulator<K>) -> String {
    let deck = simulator.deck();
    let player = deck.player();
    let loaded = player
        .loaded_track()
        .map_or_else(|| "nothing loaded".to_string(), |id| id.to_string());
    format!(
        "{} {} at {} volume {}",
        deck.status(),
        loaded,
        deck_playback::time::format_elapsed(player.position()),
        player.volume()
    )
}
