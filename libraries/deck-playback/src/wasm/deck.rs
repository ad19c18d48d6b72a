//! WASM-compatible Deck wrapper

use super::media::describe_rejection;
use super::{BrowserInterval, HtmlAudioMedia, LocalStorage};
use crate::{Deck, MediaEvent, PlaybackError, PlayerConfig, PlayerEvent};
use deck_core::{Track, TrackId};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

type BrowserDeck = Deck<HtmlAudioMedia, BrowserInterval, LocalStorage>;

/// State shared between the JS-facing handle and the platform callbacks
struct Shared {
    deck: RefCell<BrowserDeck>,
    on_event: RefCell<Option<Function>>,
}

impl Shared {
    /// Run `f` against the deck, then hand queued events to JS
    ///
    /// The deck borrow is released before any JS callback runs, so callbacks
    /// may call back into the deck.
    fn with_deck<R>(&self, f: impl FnOnce(&mut BrowserDeck) -> R) -> Option<R> {
        let result = match self.deck.try_borrow_mut() {
            Ok(mut deck) => f(&mut deck),
            Err(_) => {
                web_sys::console::warn_1(&"deck busy, call dropped".into());
                return None;
            }
        };
        self.flush();
        Some(result)
    }

    fn flush(&self) {
        let events: Vec<PlayerEvent> = match self.deck.try_borrow_mut() {
            Ok(mut deck) => deck.drain_events(),
            Err(_) => return,
        };
        let Some(callback) = self.on_event.borrow().clone() else {
            return;
        };
        for event in events {
            match serde_wasm_bindgen::to_value(&event) {
                Ok(value) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                        web_sys::console::error_1(&e);
                    }
                }
                Err(e) => web_sys::console::error_1(&e.into()),
            }
        }
    }
}

/// Deck for the browser dashboard
///
/// ```js
/// const deck = new WasmDeck(document.querySelector("audio"), 100);
/// deck.onEvent((event) => render(event));
/// deck.loadTracks(tracks);
/// deck.playTrack(tracks[0].id);
/// ```
#[wasm_bindgen]
pub struct WasmDeck {
    shared: Rc<Shared>,
    audio: HtmlAudioElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

#[wasm_bindgen]
impl WasmDeck {
    /// Create a deck driving `audio`
    #[wasm_bindgen(constructor)]
    pub fn new(audio: HtmlAudioElement, progress_interval_ms: Option<u32>) -> Result<WasmDeck, JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let store = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = PlayerConfig {
            progress_interval: progress_interval_ms
                .map_or(crate::types::DEFAULT_PROGRESS_INTERVAL, |ms| {
                    Duration::from_millis(u64::from(ms))
                }),
            ..PlayerConfig::default()
        };

        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let tick = weak.clone();
            let on_tick: Rc<dyn Fn()> = Rc::new(move || {
                if let Some(shared) = tick.upgrade() {
                    shared.with_deck(|deck| deck.tick());
                }
            });

            let rejected = weak.clone();
            let on_rejected = Closure::wrap(Box::new(move |source: JsValue, reason: JsValue| {
                if let Some(shared) = rejected.upgrade() {
                    let event = MediaEvent::PlayRejected {
                        source: source.as_string().unwrap_or_default(),
                        message: describe_rejection(&reason),
                    };
                    shared.with_deck(|deck| deck.handle_media_event(event));
                }
            }) as Box<dyn FnMut(JsValue, JsValue)>);

            let media = HtmlAudioMedia::new(audio.clone(), on_rejected);
            let scheduler = BrowserInterval::new(window, on_tick);

            Shared {
                deck: RefCell::new(Deck::new(media, scheduler, store, config)),
                on_event: RefCell::new(None),
            }
        });

        let mut deck = Self {
            shared,
            audio,
            listeners: Vec::new(),
        };
        deck.listen("loadedmetadata", |deck| {
            let duration_secs = deck.player().media().element().duration();
            deck.handle_media_event(MediaEvent::MetadataLoaded { duration_secs });
        })?;
        deck.listen("ended", |deck| deck.handle_media_event(MediaEvent::Ended))?;
        // Both fire asynchronously; only forward them while they still match
        // the element, so the echo of a pause before a new load is dropped
        deck.listen("play", |deck| {
            if !deck.player().media().element().paused() {
                deck.handle_media_event(MediaEvent::Playing);
            }
        })?;
        deck.listen("pause", |deck| {
            if deck.player().media().element().paused() {
                deck.handle_media_event(MediaEvent::Paused);
            }
        })?;
        deck.listen("error", |deck| {
            let message = deck.player().media().error_message();
            deck.handle_media_event(MediaEvent::Error { message });
        })?;

        Ok(deck)
    }

    /// Register the event callback; receives one object per event with a `type` field
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        *self.shared.on_event.borrow_mut() = Some(callback);
    }

    /// Replace the track list (array of track objects)
    #[wasm_bindgen(js_name = loadTracks)]
    pub fn load_tracks(&self, tracks: JsValue) -> Result<usize, JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)?;
        self.shared
            .with_deck(|deck| deck.replace_tracks(tracks))
            .unwrap_or(Ok(0))
            .map_err(to_js)
    }

    /// The persisted track list
    pub fn tracks(&self) -> Result<JsValue, JsValue> {
        let deck = self.shared.deck.borrow();
        serde_wasm_bindgen::to_value(deck.tracks().tracks()).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = playTrack)]
    pub fn play_track(&self, id: &str) -> Result<(), JsValue> {
        let id = TrackId::new(id);
        self.shared
            .with_deck(|deck| deck.play_track(&id))
            .unwrap_or(Ok(()))
            .map_err(to_js)
    }

    pub fn toggle(&self) {
        self.shared.with_deck(|deck| deck.toggle());
    }

    pub fn next(&self) -> Result<bool, JsValue> {
        self.shared
            .with_deck(|deck| deck.next())
            .unwrap_or(Ok(false))
            .map_err(to_js)
    }

    pub fn previous(&self) -> Result<bool, JsValue> {
        self.shared
            .with_deck(|deck| deck.previous())
            .unwrap_or(Ok(false))
            .map_err(to_js)
    }

    /// Seek to `fraction` of the clip (click offset / timeline width)
    pub fn seek(&self, fraction: f64) {
        self.shared.with_deck(|deck| deck.seek(fraction));
    }

    /// Set volume (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, percent: u8) {
        self.shared.with_deck(|deck| deck.set_volume(percent));
    }

    /// "idle", "playing" or "paused"
    pub fn status(&self) -> String {
        self.shared.deck.borrow().status().to_string()
    }

    #[wasm_bindgen(js_name = loadedTrackId)]
    pub fn loaded_track_id(&self) -> Option<String> {
        self.shared
            .deck
            .borrow()
            .player()
            .loaded_track()
            .map(|id| id.as_str().to_string())
    }

    #[wasm_bindgen(js_name = hasNext)]
    pub fn has_next(&self) -> bool {
        self.shared.deck.borrow().has_next()
    }

    #[wasm_bindgen(js_name = hasPrevious)]
    pub fn has_previous(&self) -> bool {
        self.shared.deck.borrow().has_previous()
    }
}

impl WasmDeck {
    fn listen(
        &mut self,
        event: &'static str,
        handler: impl Fn(&mut BrowserDeck) + 'static,
    ) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.shared);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.with_deck(&handler);
            }
        }) as Box<dyn FnMut()>);

        self.audio
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.push((event, closure));
        Ok(())
    }
}

impl Drop for WasmDeck {
    fn drop(&mut self) {
        for (event, closure) in &self.listeners {
            let _ = self
                .audio
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

fn to_js(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
