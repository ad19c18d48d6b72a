//! Tests for the account subcommands

use deck_api_client::{auth, TokenGrant};
use deck_cli::commands::sign_out;
use deck_core::storage::keys;
use deck_core::{KeyValueStore, MemoryStore};
use deck_dashboard::DeckConfig;

fn logged_in_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    let grant = TokenGrant {
        access_token: "BQDk-token".into(),
        token_type: "Bearer".into(),
        expires_in: 3600,
    };
    auth::store_grant(&mut store, &grant, 1_000).unwrap();
    store.set(keys::LOADED_TRACKS, "[]").unwrap();
    store
}

#[test]
fn sign_out_forgets_token_and_points_at_app_url() {
    let config = DeckConfig::from_toml_str(
        r#"
        [app]
        url = "https://deck.example.com"
        "#,
    )
    .unwrap();
    let mut store = logged_in_store();
    let mut out = Vec::new();

    sign_out(&config, &mut store, &mut out).unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert_eq!(
        printed.trim_end(),
        "Logged out. The dashboard is at https://deck.example.com"
    );
    assert!(auth::load_session(&store).unwrap().is_none());
    assert!(store.get(keys::LOADED_TRACKS).unwrap().is_some());
}

#[test]
fn sign_out_without_session_still_succeeds() {
    let config = DeckConfig::default();
    let mut store = MemoryStore::new();
    let mut out = Vec::new();

    sign_out(&config, &mut store, &mut out).unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains(&config.app.url));
}
