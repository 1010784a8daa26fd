use docugenie_core::segments::{parse_message, render_markdown, Segment};
use docugenie_core::{Message, ToolKind};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use crate::files::picked_files;
use crate::state::AppState;

/// Main chat area: placeholder until a conversation is selected, then the
/// transcript and the compose box.
#[component]
pub fn ChatArea(tool: ToolKind) -> impl IntoView {
    let state = expect_context::<AppState>();
    let session = state.session(tool);
    let has_active = move || session.with(|s| s.active().is_some());

    view! {
        <main class="chat-area">
            <Show when=has_active fallback=move || view! { <Unselected tool=tool /> }>
                <div class="chat-header">
                    {move || session.with(|s| s.active_conversation().map(|c| c.name.clone()).unwrap_or_default())}
                </div>
                <div class="messages-container">
                    {move || {
                        session.with(|s| {
                            s.displayed_messages()
                                .iter()
                                .cloned()
                                .map(|message| view! { <MessageBubble message=message /> })
                                .collect_view()
                        })
                    }}
                    <Show when=move || session.with(|s| s.active().is_some_and(|id| s.is_pending_for(id)))>
                        <div class="message assistant pending">
                            <div class="role-label">{move || state.t("chat.assistant")}</div>
                            <div class="typing-indicator">{move || state.t("chat.sending")}</div>
                        </div>
                    </Show>
                </div>
                <ChatInput tool=tool />
            </Show>
        </main>
    }
}

/// Shown when the tool has no active conversation.
#[component]
fn Unselected(tool: ToolKind) -> impl IntoView {
    let state = expect_context::<AppState>();
    let prefix = tool.i18n_prefix();
    let t = move |suffix: &'static str| move || state.t(&format!("{prefix}.conversation.{suffix}"));

    view! {
        <div class="empty-state">
            <h2>{t("select")}</h2>
            <p>{t("or")}</p>
            <button class="primary-btn" on:click=move |_| state.new_conversation(tool)>
                {t("create")}
            </button>
            <p class="instruction">{t("instruction")}</p>
            <p class="sub-instruction">{t("subInstruction")}</p>
        </div>
    }
}

/// A single chat message; prose is rendered as markdown and fenced blocks
/// become code panels.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let state = expect_context::<AppState>();
    let is_user = message.is_user();
    let css_class = if is_user { "message user" } else { "message assistant" };
    let label_key = if is_user { "chat.you" } else { "chat.assistant" };

    let body = parse_message(&message.text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => {
                view! { <div class="message-text markdown" inner_html=render_markdown(&text)></div> }.into_any()
            }
            Segment::Code { language, content } => view! {
                <pre class="code-block">
                    <span class="code-language">{language.clone()}</span>
                    <code class=format!("language-{language}")>{content}</code>
                </pre>
            }
            .into_any(),
        })
        .collect_view();

    let files = (!message.files.is_empty()).then(|| {
        let names = message
            .files
            .iter()
            .map(|f| view! { <li class="file-chip">{f.name.clone()}</li> })
            .collect_view();
        view! {
            <div class="message-files">
                <span>{move || state.t("chat.uploadedFiles")}</span>
                <ul>{names}</ul>
            </div>
        }
    });

    view! {
        <div class=css_class>
            <div class="role-label">{move || state.t(label_key)}</div>
            {body}
            {files}
        </div>
    }
}

/// Compose box: text, file picker, pending attachments and the send button.
#[component]
fn ChatInput(tool: ToolKind) -> impl IntoView {
    let state = expect_context::<AppState>();
    let session = state.session(tool);
    let file_input = NodeRef::<html::Input>::new();
    let prefix = tool.i18n_prefix();
    let accept = session.with_untracked(|s| s.profile().allow.accept_attribute());

    let is_sending = move || session.with(|s| s.is_pending());
    let can_submit = move || session.with(|s| s.can_submit());

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            state.send_message(tool);
        }
    };

    let on_files = move |_| {
        if let Some(input) = file_input.get() {
            let files = picked_files(&input);
            if !files.is_empty() {
                state.upload_files(tool, files);
            }
        }
    };

    view! {
        <div class="input-area">
            <Show when=move || session.with(|s| !s.uploads().is_empty())>
                <div class="pending-uploads">
                    <span>{move || state.t("chat.pendingUploads")}</span>
                    <ul>
                        {move || {
                            session.with(|s| {
                                s.uploads()
                                    .iter()
                                    .map(|a| view! { <li class="file-chip">{a.name.clone()}</li> })
                                    .collect_view()
                            })
                        }}
                    </ul>
                    <button class="link-btn" on:click=move |_| state.clear_uploads(tool)>
                        {move || state.t("chat.clearUploads")}
                    </button>
                </div>
            </Show>
            <div class="input-row">
                <label class="attach-btn" title=move || state.t("chat.attach")>
                    "📎"
                    <input
                        type="file"
                        multiple
                        accept=accept
                        node_ref=file_input
                        on:change=on_files
                        disabled=is_sending
                    />
                </label>
                <textarea
                    rows="3"
                    placeholder=move || state.t(&format!("{prefix}.input.placeholder"))
                    prop:value=move || session.with(|s| s.query().to_string())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        session.update(|s| s.set_query(value));
                    }
                    on:keydown=on_keydown
                    disabled=is_sending
                />
                <button
                    class="send-btn"
                    on:click=move |_| state.send_message(tool)
                    disabled=move || !can_submit()
                >
                    {move || {
                        if is_sending() { state.t("chat.sending") } else { state.t(&format!("{prefix}.input.send")) }
                    }}
                </button>
            </div>
        </div>
    }
}
