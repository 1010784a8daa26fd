use docugenie_core::i18n::{detect_language, PreferenceStore};
use docugenie_core::ingest::ingest;
use docugenie_core::submission::SimulatedBackend;
use docugenie_core::{
    AppConfig, Catalog, ChatSession, ConversationId, Generator, Language, Navigator, Notifier,
    PathSelection, Route, Severity, ToolKind, Translate,
};
use futures_util::StreamExt;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::files::{BrowserFile, GlooDelay};
use crate::history::{self, BrowserNavigator};
use crate::prefs::LocalStoragePreference;

/// A notification currently on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// Shared application state, provided via Leptos context.
///
/// The three chat sessions are created once at startup and live for the whole
/// page, so switching tools keeps each tool's conversations.
#[derive(Clone, Copy)]
pub struct AppState {
    pub config: StoredValue<AppConfig>,
    next_toast: StoredValue<u64>,

    // --- Read signals (for components to subscribe to) ---
    pub route: ReadSignal<Route>,
    pub catalog: ReadSignal<Catalog>,
    pub dark_mode: ReadSignal<bool>,
    pub toasts: ReadSignal<Vec<Toast>>,

    // --- Write signals (for mutating state) ---
    pub set_route: WriteSignal<Route>,
    pub set_catalog: WriteSignal<Catalog>,
    pub set_dark_mode: WriteSignal<bool>,
    pub set_toasts: WriteSignal<Vec<Toast>>,

    // --- Per-tool chat sessions ---
    mark_polish: RwSignal<ChatSession>,
    dev_docs: RwSignal<ChatSession>,
    docu_buddy: RwSignal<ChatSession>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide(config: AppConfig) -> Self {
        let stored = LocalStoragePreference.load();
        let browser = window().navigator().language();
        let language =
            detect_language(stored.as_deref(), browser.as_deref(), config.fallback_language);
        let catalog = Catalog::load(language).unwrap_or_else(|e| {
            log::error!("Failed to load translations: {e}");
            Catalog::empty(language)
        });
        LocalStoragePreference.save(language.code());

        let (route, set_route) = signal(Route::parse(&history::current_path()));
        let (catalog, set_catalog) = signal(catalog);
        let (dark_mode, set_dark_mode) = signal(false);
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());

        let policy = config.conflict_policy;
        let state = Self {
            config: StoredValue::new(config),
            next_toast: StoredValue::new(0),
            route,
            catalog,
            dark_mode,
            toasts,
            set_route,
            set_catalog,
            set_dark_mode,
            set_toasts,
            mark_polish: RwSignal::new(ChatSession::new(ToolKind::MarkPolish, policy)),
            dev_docs: RwSignal::new(ChatSession::new(ToolKind::DevDocs, policy)),
            docu_buddy: RwSignal::new(ChatSession::new(ToolKind::DocuBuddy, policy)),
        };

        provide_context(state);
        state
    }

    pub fn session(&self, tool: ToolKind) -> RwSignal<ChatSession> {
        match tool {
            ToolKind::MarkPolish => self.mark_polish,
            ToolKind::DevDocs => self.dev_docs,
            ToolKind::DocuBuddy => self.docu_buddy,
        }
    }

    pub fn navigator(&self) -> BrowserNavigator {
        BrowserNavigator::new(self.set_route)
    }

    /// Tracked translation lookup, for use inside views.
    pub fn t(&self, key: &str) -> String {
        self.catalog.with(|c| c.translate(key))
    }

    pub fn go(&self, route: Route) {
        self.navigator().navigate(&route.path());
    }

    pub fn set_language(&self, language: Language) {
        log::debug!("Switching language to {}", language.code());
        self.set_catalog.update(|c| c.set_language(language));
        LocalStoragePreference.save(language.code());
        if let Some(root) = document().document_element() {
            let _ = root.set_attribute("lang", language.code());
        }
    }

    pub fn toggle_theme(&self) {
        self.set_dark_mode.update(|dark| *dark = !*dark);
    }

    // ── Conversation selection ───────────────────────────────────────────────

    /// Folds the address bar into `tool`'s session, then writes the settled
    /// selection back if it differs.
    pub fn reconcile(&self, tool: ToolKind, selection: PathSelection) {
        let session = self.session(tool);
        session.update(|s| {
            s.reconcile_selection(selection);
        });
        session.with_untracked(|s| s.sync_url(&self.navigator()));
    }

    pub fn select_conversation(&self, tool: ToolKind, id: ConversationId) {
        let session = self.session(tool);
        if let Some(Ok(())) = session.try_update(|s| s.navigate_to(id)) {
            session.with_untracked(|s| s.sync_url(&self.navigator()));
        }
    }

    pub fn new_conversation(&self, tool: ToolKind) {
        let session = self.session(tool);
        session.update(|s| {
            s.create_conversation(None);
        });
        session.with_untracked(|s| s.sync_url(&self.navigator()));
    }

    // ── Uploads ──────────────────────────────────────────────────────────────

    /// Reads the picked files; each one is attached (or rejected with a
    /// notice) as soon as its read completes.
    pub fn upload_files(&self, tool: ToolKind, files: Vec<BrowserFile>) {
        let state = *self;
        let session = self.session(tool);
        let allow = session.with_untracked(|s| s.profile().allow);

        spawn_local(async move {
            let mut reads = ingest(files, allow);
            while let Some(result) = reads.next().await {
                if let Some(notice) = session.try_update(|s| s.accept_upload(result)).flatten() {
                    let message = state.catalog.with_untracked(|c| c.translate(&notice.key));
                    state.notify(&message, notice.severity);
                }
            }
        });
    }

    pub fn clear_uploads(&self, tool: ToolKind) {
        self.session(tool).update(|s| s.clear_uploads());
    }

    // ── Submission ───────────────────────────────────────────────────────────

    /// Sends the compose box to the simulated backend.
    pub fn send_message(&self, tool: ToolKind) {
        let state = *self;
        let session = self.session(tool);
        let strings = self.catalog.get_untracked();
        let Some(pending) = session.try_update(|s| s.begin_submission(&strings)).flatten() else {
            return;
        };
        let latency = self.config.with_value(|c| c.generation_latency());

        spawn_local(async move {
            let backend = SimulatedBackend::new(GlooDelay, latency);
            let outcome = backend.generate(&pending.request).await;
            let strings = state.catalog.get_untracked();
            session.update(|s| s.complete_submission(pending, outcome, &strings));
        });
    }
}

impl Notifier for AppState {
    fn notify(&self, message: &str, severity: Severity) {
        self.next_toast.update_value(|n| *n += 1);
        let id = self.next_toast.get_value();
        let (limit, ttl) = self.config.with_value(|c| (c.max_notifications, c.notification_ttl()));

        self.set_toasts.update(|toasts| {
            toasts.push(Toast { id, message: message.to_string(), severity });
            while toasts.len() > limit {
                toasts.remove(0);
            }
        });

        let set_toasts = self.set_toasts;
        spawn_local(async move {
            gloo_timers::future::sleep(ttl).await;
            set_toasts.try_update(|toasts| toasts.retain(|t| t.id != id));
        });
    }
}
