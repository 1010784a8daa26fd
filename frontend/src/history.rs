use docugenie_core::{Navigator, Route};
use leptos::prelude::*;
use wasm_bindgen::JsValue;

/// The browser's location pathname, or `/` when unavailable.
pub fn current_path() -> String {
    window().location().pathname().unwrap_or_else(|_| "/".to_string())
}

/// History-API navigator that also publishes the parsed route to the app.
#[derive(Clone, Copy)]
pub struct BrowserNavigator {
    set_route: WriteSignal<Route>,
}

impl BrowserNavigator {
    pub fn new(set_route: WriteSignal<Route>) -> Self {
        Self { set_route }
    }
}

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        current_path()
    }

    fn navigate(&self, path: &str) {
        match window().history() {
            Ok(history) => {
                if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
                    log::error!("pushState to {path} failed: {e:?}");
                    return;
                }
            }
            Err(e) => {
                log::error!("History API unavailable: {e:?}");
                return;
            }
        }
        self.set_route.set(Route::parse(path));
    }
}

/// Re-parses the route whenever the user walks the browser history.
pub fn listen(set_route: WriteSignal<Route>) {
    let handle = window_event_listener(leptos::ev::popstate, move |_| {
        let path = current_path();
        log::debug!("popstate → {path}");
        set_route.set(Route::parse(&path));
    });
    on_cleanup(move || handle.remove());
}
