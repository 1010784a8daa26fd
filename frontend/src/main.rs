mod components;
mod files;
mod history;
mod prefs;
mod state;

use docugenie_core::{AppConfig, Route, ToolKind};
use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::home::{Home, NotFound};
use components::navbar::Navbar;
use components::toasts::Toasts;
use components::tool_page::ToolPage;
use state::AppState;

/// Which top-level screen is mounted; conversation ids are not part of it.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Home,
    Tool(ToolKind),
    NotFound,
}

/// Reads the JSON settings embedded in `index.html`, falling back to defaults.
fn load_config() -> AppConfig {
    let raw = document()
        .query_selector("script#docugenie-config")
        .ok()
        .flatten()
        .and_then(|el| el.text_content());

    match raw.as_deref().map(str::trim) {
        None | Some("") => AppConfig::default(),
        Some(json) => AppConfig::from_json(json).unwrap_or_else(|e| {
            log::error!("Ignoring invalid configuration: {e}");
            AppConfig::default()
        }),
    }
}

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide(load_config());
    history::listen(state.set_route);

    let page = Memo::new(move |_| match state.route.get() {
        Route::Home => Page::Home,
        Route::Tool { tool, .. } => Page::Tool(tool),
        Route::NotFound => Page::NotFound,
    });

    view! {
        <div class="app-container" class:dark=move || state.dark_mode.get()>
            <Navbar />
            {move || match page.get() {
                Page::Home => view! { <Home /> }.into_any(),
                Page::Tool(tool) => view! { <ToolPage tool=tool /> }.into_any(),
                Page::NotFound => view! { <NotFound /> }.into_any(),
            }}
            <Toasts />
        </div>
    }
}

fn main() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }
    mount_to_body(App);
}
