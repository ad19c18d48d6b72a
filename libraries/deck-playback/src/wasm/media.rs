//! `HTMLAudioElement` media element

use crate::error::{PlaybackError, Result};
use crate::media::MediaElement;
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

/// Media element backed by an `<audio>` tag
///
/// `play()` resolves asynchronously in the browser. A rejected promise
/// (autoplay policy, unsupported source, interrupted by a newer load) is
/// forwarded to `on_rejected` together with the source it was issued for.
pub struct HtmlAudioMedia {
    audio: HtmlAudioElement,
    source: Option<String>,
    /// Called as `on_rejected(source, reason)`
    on_rejected: Closure<dyn FnMut(JsValue, JsValue)>,
}

impl HtmlAudioMedia {
    pub fn new(audio: HtmlAudioElement, on_rejected: Closure<dyn FnMut(JsValue, JsValue)>) -> Self {
        Self {
            audio,
            source: None,
            on_rejected,
        }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }

    /// Describe the element's current error, if any
    pub fn error_message(&self) -> String {
        match self.audio.error() {
            Some(error) if !error.message().is_empty() => error.message(),
            Some(error) => format!("media error code {}", error.code()),
            None => "media error".to_string(),
        }
    }

    /// `catch` the promise with the rejection handler bound to `source`
    fn watch(&self, promise: &js_sys::Promise, source: &str) -> std::result::Result<(), JsValue> {
        let handler: &Function = self.on_rejected.as_ref().unchecked_ref();
        let bound = handler.bind1(&JsValue::NULL, &JsValue::from_str(source));
        let catch: Function = Reflect::get(promise, &JsValue::from_str("catch"))?.dyn_into()?;
        catch.call1(promise, &bound)?;
        Ok(())
    }
}

/// "name: message" of a rejection reason (usually a `DOMException`)
pub(crate) fn describe_rejection(reason: &JsValue) -> String {
    let field = |name: &str| {
        Reflect::get(reason, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_string())
    };
    match (field("name"), field("message")) {
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (Some(name), None) => name,
        _ => reason.as_string().unwrap_or_else(|| format!("{reason:?}")),
    }
}

impl MediaElement for HtmlAudioMedia {
    fn set_source(&mut self, url: &str) {
        self.audio.set_src(url);
        self.source = Some(url.to_string());
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .audio
            .play()
            .map_err(|e| PlaybackError::media(format!("{e:?}")))?;
        if let Some(source) = &self.source {
            self.watch(&promise, source)
                .map_err(|e| PlaybackError::media(format!("{e:?}")))?;
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            tracing::warn!(error = ?e, "pause() failed");
        }
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume.clamp(0.0, 1.0));
    }
}
