//! `setInterval` scheduler

use crate::error::{PlaybackError, Result};
use crate::progress::{IntervalScheduler, TimerId};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Runs `on_tick` every period via `window.setInterval`
pub struct BrowserInterval {
    window: Window,
    on_tick: Rc<dyn Fn()>,
    running: HashMap<TimerId, Closure<dyn FnMut()>>,
}

impl BrowserInterval {
    pub fn new(window: Window, on_tick: Rc<dyn Fn()>) -> Self {
        Self {
            window,
            on_tick,
            running: HashMap::new(),
        }
    }
}

impl IntervalScheduler for BrowserInterval {
    fn start(&mut self, period: Duration) -> Result<TimerId> {
        let on_tick = Rc::clone(&self.on_tick);
        let callback = Closure::wrap(Box::new(move || on_tick()) as Box<dyn FnMut()>);

        let handle = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period.as_millis() as i32,
            )
            .map_err(|e| PlaybackError::Scheduler(format!("{e:?}")))?;

        let timer = TimerId(handle as u32);
        self.running.insert(timer, callback);
        Ok(timer)
    }

    fn cancel(&mut self, timer: TimerId) {
        if self.running.remove(&timer).is_some() {
            self.window.clear_interval_with_handle(timer.0 as i32);
        }
    }
}

impl Drop for BrowserInterval {
    fn drop(&mut self) {
        for timer in self.running.keys() {
            self.window.clear_interval_with_handle(timer.0 as i32);
        }
    }
}
