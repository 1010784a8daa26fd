use docugenie_core::{Route, ToolKind};
use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub fn Home() -> impl IntoView {
    let state = expect_context::<AppState>();

    let cards = ToolKind::ALL
        .into_iter()
        .map(|tool| {
            let prefix = tool.i18n_prefix();
            view! {
                <section class="tool-card">
                    <h2>{move || state.t(&format!("{prefix}.title"))}</h2>
                    <p>{move || state.t(&format!("{prefix}.description"))}</p>
                    <button class="primary-btn" on:click=move |_| state.go(Route::tool(tool, None))>
                        {move || state.t(&format!("{prefix}.button"))}
                    </button>
                </section>
            }
        })
        .collect_view();

    view! {
        <div class="home">
            <header class="hero">
                <p class="greeting">{move || state.t("home.greeting")}</p>
                <h1>{move || state.t("home.name")}</h1>
                <p class="education">{move || state.t("home.education")}</p>
            </header>
            <div class="tool-cards">{cards}</div>
            <Footer />
        </div>
    }
}

#[component]
fn Footer() -> impl IntoView {
    let state = expect_context::<AppState>();
    let year = js_sys::Date::new_0().get_full_year();

    view! {
        <footer class="footer">
            {move || format!("© {year} DocuGenie. {}", state.t("footer.rights"))}
        </footer>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="not-found">
            <h1>{move || state.t("notFound.title")}</h1>
            <button class="primary-btn" on:click=move |_| state.go(Route::Home)>
                {move || state.t("notFound.back")}
            </button>
        </div>
    }
}
