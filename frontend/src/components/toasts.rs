use leptos::prelude::*;

use crate::state::AppState;

/// Stack of transient notifications; each one dismisses itself or on click.
#[component]
pub fn Toasts() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="toasts">
            <For
                each=move || state.toasts.get()
                key=|toast| toast.id
                let:toast
            >
                {
                    let id = toast.id;
                    let class = format!("toast {}", toast.severity.as_str());
                    view! {
                        <div
                            class=class
                            role="status"
                            on:click=move |_| state.set_toasts.update(|ts| ts.retain(|t| t.id != id))
                        >
                            {toast.message}
                        </div>
                    }
                }
            </For>
        </div>
    }
}
