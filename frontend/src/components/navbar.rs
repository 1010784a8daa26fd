use docugenie_core::{Language, Route, ToolKind};
use leptos::prelude::*;

use crate::state::AppState;

/// Top bar with the tool links, the language menu and the theme toggle.
#[component]
pub fn Navbar() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (menu_open, set_menu_open) = signal(false);

    let links = ToolKind::ALL
        .into_iter()
        .map(|tool| {
            let href = tool.base_path();
            let label = format!("nav.{}", tool.i18n_prefix());
            view! {
                <a
                    class="nav-link"
                    class:active=move || matches!(state.route.get(), Route::Tool { tool: t, .. } if t == tool)
                    href=href
                    on:click=move |ev| {
                        ev.prevent_default();
                        state.go(Route::tool(tool, None));
                    }
                >
                    {move || state.t(&label)}
                </a>
            }
        })
        .collect_view();

    let languages = Language::ALL
        .into_iter()
        .map(|language| {
            view! {
                <li
                    class="language-option"
                    class:selected=move || state.catalog.with(|c| c.language() == language)
                    on:click=move |_| {
                        state.set_language(language);
                        set_menu_open.set(false);
                    }
                >
                    {language.label()}
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="navbar">
            <a
                class="brand"
                href="/"
                on:click=move |ev| {
                    ev.prevent_default();
                    state.go(Route::Home);
                }
            >
                {move || state.t("home.name")}
            </a>
            <div class="nav-links">{links}</div>
            <div class="nav-actions">
                <div class="language-menu">
                    <button
                        class="icon-btn"
                        title=move || state.t("nav.language")
                        on:click=move |_| set_menu_open.update(|open| *open = !*open)
                    >
                        {move || state.catalog.with(|c| c.language().code().to_uppercase())}
                    </button>
                    <ul class="language-list" class:open=menu_open>{languages}</ul>
                </div>
                <button class="icon-btn" on:click=move |_| state.toggle_theme()>
                    {move || {
                        if state.dark_mode.get() { state.t("nav.lightMode") } else { state.t("nav.darkMode") }
                    }}
                </button>
            </div>
        </nav>
    }
}
