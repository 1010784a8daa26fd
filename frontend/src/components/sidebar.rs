use docugenie_core::ToolKind;
use leptos::prelude::*;

use super::tool_page::SidebarToggle;
use crate::state::AppState;

/// Conversation history for one tool plus the "New conversation" button.
/// Collapses to nothing while `open` is off.
#[component]
pub fn Sidebar(tool: ToolKind, open: SidebarToggle) -> impl IntoView {
    let state = expect_context::<AppState>();
    let session = state.session(tool);

    let on_new = move |_| state.new_conversation(tool);

    view! {
        <aside class="sidebar" class:collapsed=move || !open.is_open()>
            <div class="sidebar-header">
                <h2>{move || state.t("chat.history")}</h2>
                <button class="new-chat-btn" on:click=on_new>
                    {move || format!("+ {}", state.t("chat.newConversation"))}
                </button>
            </div>
            <div class="conversation-list">
                <For
                    each=move || {
                        session.with(|s| {
                            s.conversations()
                                .iter()
                                .map(|c| (c.id, c.name.clone(), c.start_time.format("%Y-%m-%d %H:%M").to_string()))
                                .collect::<Vec<_>>()
                        })
                    }
                    key=|(id, _, _)| *id
                    let:conv
                >
                    {
                        let (id, name, started) = conv;
                        view! {
                            <div
                                class="conversation-item"
                                class:active=move || session.with(|s| s.active() == Some(id))
                                on:click=move |_| state.select_conversation(tool, id)
                            >
                                <div class="conversation-name">{name}</div>
                                <div class="conversation-time">{started}</div>
                            </div>
                        }
                    }
                </For>
            </div>
        </aside>
    }
}
