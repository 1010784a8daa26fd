use docugenie_core::{Route, ToolKind};
use leptos::prelude::*;

use super::chat::ChatArea;
use super::sidebar::Sidebar;
use crate::state::AppState;

/// Open/closed state of a tool page's history sidebar. Starts open on every
/// mount.
#[derive(Clone, Copy)]
pub struct SidebarToggle(RwSignal<bool>);

impl SidebarToggle {
    pub fn new() -> Self {
        Self(RwSignal::new(true))
    }

    pub fn is_open(&self) -> bool {
        self.0.get()
    }

    pub fn flip(&self) {
        self.0.update(|open| *open = !*open);
    }
}

impl Default for SidebarToggle {
    fn default() -> Self {
        Self::new()
    }
}

/// One tool's screen. Mounted once per tool; conversation changes in the
/// address bar are reconciled into the session rather than remounting.
#[component]
pub fn ToolPage(tool: ToolKind) -> impl IntoView {
    let state = expect_context::<AppState>();
    let sidebar = SidebarToggle::new();

    Effect::new(move |_| {
        if let Route::Tool { tool: routed, selection } = state.route.get() {
            if routed == tool {
                state.reconcile(tool, selection);
            }
        }
    });

    view! {
        <div class="tool-page">
            <button
                class="icon-btn sidebar-toggle"
                title=move || state.t("chat.toggleSidebar")
                aria-expanded=move || sidebar.is_open().to_string()
                on:click=move |_| sidebar.flip()
            >
                "☰"
            </button>
            <Sidebar tool=tool open=sidebar />
            <ChatArea tool=tool />
        </div>
    }
}
