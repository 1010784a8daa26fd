//! One tool's chat screen state: conversations, the active selection bound
//! to the URL, the compose box, pending uploads and in-flight submissions.

use std::collections::BTreeMap;

use chrono::Utc;
use log::{debug, error, warn};
use uuid::Uuid;

use crate::binder::{self, ConflictPolicy, Reconciliation, Selector};
use crate::errors::DocuError;
use crate::i18n::Translate;
use crate::models::{Attachment, AttachmentKind, Conversation, ConversationId, Message};
use crate::notify::Notice;
use crate::routes::{Navigator, PathSelection};
use crate::store::ConversationStore;
use crate::submission::{Generation, GenerationRequest, PendingSubmission};
use crate::tools::{ToolKind, ToolProfile};

#[derive(Debug, Clone)]
pub struct ChatSession {
    profile: &'static ToolProfile,
    store: ConversationStore,
    selector: Selector,
    query: String,
    uploads: Vec<Attachment>,
    in_flight: BTreeMap<ConversationId, Uuid>,
}

impl ChatSession {
    /// A session seeded with the tool's mock conversations.
    pub fn new(tool: ToolKind, policy: ConflictPolicy) -> Self {
        let profile = tool.profile();
        Self::with_store(tool, ConversationStore::new(profile.seed(Utc::now())), policy)
    }

    pub fn with_store(tool: ToolKind, store: ConversationStore, policy: ConflictPolicy) -> Self {
        Self {
            profile: tool.profile(),
            store,
            selector: Selector::new(policy),
            query: String::new(),
            uploads: Vec::new(),
            in_flight: BTreeMap::new(),
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.profile.kind
    }

    pub fn profile(&self) -> &'static ToolProfile {
        self.profile
    }

    pub fn conversations(&self) -> &[Conversation] {
        self.store.list()
    }

    pub fn messages(&self, id: ConversationId) -> &[Message] {
        self.store.messages(id)
    }

    pub fn active(&self) -> Option<ConversationId> {
        self.selector.active()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active().and_then(|id| self.store.get(id))
    }

    /// Transcript of the active conversation; empty when nothing is selected.
    pub fn displayed_messages(&self) -> &[Message] {
        self.active().map_or(&[], |id| self.store.messages(id))
    }

    // ── Conversations ────────────────────────────────────────────────────────

    pub fn create_conversation(&mut self, name: Option<String>) -> ConversationId {
        let id = self.store.create(name).id;
        self.selector.select(id);
        id
    }

    /// Selects an existing conversation. Unknown ids are refused and the
    /// selection is left as it was.
    pub fn navigate_to(&mut self, id: ConversationId) -> Result<(), DocuError> {
        if !self.store.contains(id) {
            let err = DocuError::ConversationNotFound { id };
            warn!("{}: {err}", self.tool());
            return Err(err);
        }
        self.selector.select(id);
        Ok(())
    }

    pub fn append_message(&mut self, id: ConversationId, message: Message) -> bool {
        self.store.append(id, message)
    }

    // ── URL binding ──────────────────────────────────────────────────────────

    /// URL → state pass for an id read from the address bar.
    pub fn reconcile(&mut self, url_id: Option<ConversationId>) -> Reconciliation {
        self.reconcile_selection(url_id.into())
    }

    pub fn reconcile_selection(&mut self, selection: PathSelection) -> Reconciliation {
        let outcome = self.selector.reconcile(selection, &self.store);
        debug!("{}: reconciled {selection:?} -> {outcome:?}", self.tool());
        outcome
    }

    pub fn expected_path(&self) -> String {
        binder::expected_path(self.tool(), self.active())
    }

    /// State → URL pass. Returns whether a navigation was pushed.
    pub fn sync_url(&self, navigator: &impl Navigator) -> bool {
        binder::sync_url(self.tool(), self.active(), navigator)
    }

    // ── Compose box ──────────────────────────────────────────────────────────

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn uploads(&self) -> &[Attachment] {
        &self.uploads
    }

    /// Takes one ingestion result. Failures come back as a notice for the
    /// notification surface; the pending list is left untouched.
    pub fn accept_upload(&mut self, result: Result<Attachment, DocuError>) -> Option<Notice> {
        match result {
            Ok(attachment) => {
                debug!("{}: attached {}", self.tool(), attachment.name);
                if self.profile.inline_markdown && attachment.kind == AttachmentKind::Markdown {
                    if !self.query.is_empty() {
                        self.query.push_str("\n\n");
                    }
                    self.query.push_str(&attachment.content);
                }
                self.uploads.push(attachment);
                None
            }
            Err(err @ DocuError::UnsupportedFileType { .. }) => {
                warn!("{}: {err}", self.tool());
                Some(Notice::error(self.profile.unsupported_key))
            }
            Err(err) => {
                warn!("{}: {err}", self.tool());
                Some(Notice::error(self.profile.read_error_key))
            }
        }
    }

    pub fn clear_uploads(&mut self) {
        self.uploads.clear();
    }

    // ── Submission ───────────────────────────────────────────────────────────

    pub fn is_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_pending_for(&self, id: ConversationId) -> bool {
        self.in_flight.contains_key(&id)
    }

    pub fn can_submit(&self) -> bool {
        self.active().is_some()
            && !self.is_pending()
            && (!self.query.trim().is_empty() || !self.uploads.is_empty())
    }

    /// Records the user's turn and hands back the request to generate.
    ///
    /// Returns `None` (and changes nothing) without an active conversation,
    /// with nothing to send, or while another submission is in flight.
    pub fn begin_submission(&mut self, strings: &impl Translate) -> Option<PendingSubmission> {
        if !self.can_submit() {
            return None;
        }
        let conversation_id = self.active()?;

        let text = if self.query.trim().is_empty() {
            strings.translate(self.profile.fallback_key)
        } else {
            self.query.clone()
        };
        let request = GenerationRequest::new(self.tool(), conversation_id, self.query.as_str(), &self.uploads);
        self.store.append(conversation_id, Message::user(text, self.uploads.clone()));
        self.query.clear();

        let ticket = Uuid::new_v4();
        self.in_flight.insert(conversation_id, ticket);
        debug!("{}: submission {ticket} started for conversation {conversation_id}", self.tool());

        Some(PendingSubmission { ticket, conversation_id, request })
    }

    /// Records the answer (or the canned error) in the conversation the
    /// submission was made from, then leaves the pending state.
    pub fn complete_submission(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<Generation, DocuError>,
        strings: &impl Translate,
    ) {
        let text = match outcome {
            Ok(generation) => generation.text,
            Err(e) => {
                error!("{}: generation for conversation {} failed: {e}", self.tool(), pending.conversation_id);
                strings.translate(self.profile.error_key)
            }
        };
        self.store.append(pending.conversation_id, Message::assistant(text));

        if self.in_flight.get(&pending.conversation_id) == Some(&pending.ticket) {
            self.in_flight.remove(&pending.conversation_id);
        }
        self.uploads.clear();
        debug!("{}: submission {} finished", self.tool(), pending.ticket);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use super::*;
    use crate::i18n::{Catalog, Language};
    use crate::ingest::{ingest, FileSource};
    use crate::models::MessageRole;
    use crate::notify::{Notifier, Severity};
    use crate::routes::{MemoryNavigator, Route};
    use crate::submission::{Delay, Generator, SimulatedBackend};

    struct TokioDelay;

    impl Delay for TokioDelay {
        async fn sleep(&self, duration: Duration) {
            tokio::time::sleep(duration).await;
        }
    }

    struct FailingBackend;

    impl Generator for FailingBackend {
        async fn generate(&self, _request: &GenerationRequest) -> Result<Generation, DocuError> {
            Err(DocuError::generation("backend offline"))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        seen: RefCell<Vec<(String, Severity)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, severity: Severity) {
            self.seen.borrow_mut().push((message.to_string(), severity));
        }
    }

    struct PickedFile(&'static str, &'static str);

    impl FileSource for PickedFile {
        fn name(&self) -> String {
            self.0.to_string()
        }

        async fn read_text(&self) -> Result<String, String> {
            Ok(self.1.to_string())
        }
    }

    fn catalog() -> Catalog {
        Catalog::load(Language::En).unwrap()
    }

    fn session(tool: ToolKind) -> ChatSession {
        ChatSession::new(tool, ConflictPolicy::ActiveWins)
    }

    #[test]
    fn create_conversation_is_prepended_and_selected() {
        let mut s = session(ToolKind::DevDocs);
        assert_eq!(s.create_conversation(None), 3);
        let ids: Vec<_> = s.conversations().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(s.active(), Some(3));
        assert!(s.displayed_messages().is_empty());
    }

    #[test]
    fn navigate_then_read_url_round_trips() {
        for tool in ToolKind::ALL {
            let mut s = session(tool);
            let nav = MemoryNavigator::new(tool.base_path());
            let ids: Vec<_> = s.conversations().iter().map(|c| c.id).collect();
            for id in ids {
                s.navigate_to(id).unwrap();
                s.sync_url(&nav);
                assert_eq!(Route::parse(&nav.current_path()), Route::tool(tool, Some(id)));
            }
        }
    }

    #[test]
    fn navigate_to_unknown_id_is_refused() {
        let mut s = session(ToolKind::MarkPolish);
        assert!(s.navigate_to(42).unwrap_err().is_not_found());
        assert_eq!(s.active(), None);
    }

    #[test]
    fn displayed_messages_follow_appends_to_the_active_conversation() {
        let mut s = session(ToolKind::MarkPolish);
        s.navigate_to(1).unwrap();
        let before = s.displayed_messages().len();
        s.append_message(1, Message::assistant("extra"));
        s.append_message(2, Message::assistant("elsewhere"));
        assert_eq!(s.displayed_messages().len(), before + 1);
        assert_eq!(s.displayed_messages().last().unwrap().text, "extra");
    }

    #[test]
    fn unknown_url_id_redirects_to_bare_path_and_empties_the_view() {
        let mut s = session(ToolKind::DevDocs);
        let nav = MemoryNavigator::new("/dev-docs/99");
        s.navigate_to(1).unwrap();

        let outcome = s.reconcile(Some(99));
        assert_eq!(outcome, Reconciliation::Redirected { requested: Some(99) });
        assert!(s.sync_url(&nav));
        assert_eq!(nav.current_path(), "/dev-docs");
        assert!(s.displayed_messages().is_empty());
    }

    #[test]
    fn active_wins_rewrites_the_url_back() {
        let mut s = session(ToolKind::DocuBuddy);
        let nav = MemoryNavigator::new("/docu-buddy/1");
        s.reconcile(Some(1));
        // A link to conversation 3 arrives while 1 is open.
        nav.navigate("/docu-buddy/3");
        let outcome = s.reconcile_selection(PathSelection::Conversation(3));
        assert_eq!(outcome, Reconciliation::KeptActive { active: 1, requested: 3 });
        assert!(s.sync_url(&nav));
        assert_eq!(nav.current_path(), "/docu-buddy/1");
        // Settled: another round changes nothing.
        assert_eq!(s.reconcile(Some(1)), Reconciliation::Unchanged(1));
        assert!(!s.sync_url(&nav));
    }

    #[test]
    fn back_navigation_to_bare_path_unselects() {
        let mut s = session(ToolKind::DevDocs);
        let nav = MemoryNavigator::new("/dev-docs");
        s.navigate_to(2).unwrap();
        s.sync_url(&nav);
        let path = nav.back().unwrap();
        let Route::Tool { selection, .. } = Route::parse(&path) else { panic!("{path}") };
        assert_eq!(s.reconcile_selection(selection), Reconciliation::Cleared);
        assert_eq!(s.active(), None);
        assert!(!s.sync_url(&nav));
    }

    #[test]
    fn submission_requires_active_conversation_and_content() {
        let strings = catalog();
        let mut s = session(ToolKind::DevDocs);
        s.set_query("document this");
        assert!(s.begin_submission(&strings).is_none());

        s.navigate_to(1).unwrap();
        s.set_query("   ");
        let before = s.messages(1).len();
        assert!(s.begin_submission(&strings).is_none());
        assert_eq!(s.messages(1).len(), before);
    }

    #[test]
    fn blank_query_with_attachment_uses_the_fallback_text() {
        let strings = catalog();
        let mut s = session(ToolKind::DevDocs);
        s.navigate_to(2).unwrap();
        let notice = s.accept_upload(Ok(Attachment::code("calculator.py", "def f(): pass", "py")));
        assert!(notice.is_none());

        let pending = s.begin_submission(&strings).unwrap();
        let sent = s.messages(2).last().unwrap();
        assert_eq!(sent.role, MessageRole::User);
        assert_eq!(sent.text, "Code files and OpenAPI Specifications uploaded");
        assert_eq!(sent.files.len(), 1);
        assert_eq!(sent.files[0].name, "calculator.py");
        assert_eq!(pending.request.code[0].name, "calculator.py");
        assert_eq!(pending.request.text, "");
    }

    #[test]
    fn query_clears_at_once_but_uploads_stay_until_completion() {
        let strings = catalog();
        let mut s = session(ToolKind::MarkPolish);
        s.navigate_to(1).unwrap();
        s.set_query("# Title");
        s.accept_upload(Ok(Attachment::new("api.yaml", "openapi: 3.0.0", AttachmentKind::Yaml)));

        let pending = s.begin_submission(&strings).unwrap();
        assert_eq!(s.query(), "");
        assert_eq!(s.uploads().len(), 1);
        assert!(s.is_pending());
        assert!(s.is_pending_for(1));

        // Compose is locked while the answer is outstanding.
        s.set_query("again");
        assert!(!s.can_submit());
        assert!(s.begin_submission(&strings).is_none());

        s.complete_submission(pending, Ok(Generation { text: "answer".into() }), &strings);
        assert!(!s.is_pending());
        assert!(s.uploads().is_empty());
        assert_eq!(s.messages(1).last().unwrap().text, "answer");
        assert!(s.can_submit());
    }

    #[tokio::test]
    async fn generation_failure_is_recorded_in_the_transcript() {
        let strings = catalog();
        let mut s = session(ToolKind::DocuBuddy);
        s.navigate_to(3).unwrap();
        s.set_query("Explain the posts table");
        s.accept_upload(Ok(Attachment::new("notes.md", "# Notes", AttachmentKind::Markdown)));

        let pending = s.begin_submission(&strings).unwrap();
        let outcome = FailingBackend.generate(&pending.request).await;
        s.complete_submission(pending, outcome, &strings);

        let last = s.messages(3).last().unwrap();
        assert_eq!(last.role, MessageRole::Assistant);
        assert_eq!(last.text, strings.translate("docuBuddy.responses.error"));
        assert!(s.uploads().is_empty());
        assert!(!s.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn answer_lands_in_the_conversation_it_was_asked_from() {
        let strings = catalog();
        let backend = SimulatedBackend::new(TokioDelay, Duration::from_millis(1000));
        let s = RefCell::new(session(ToolKind::DevDocs));
        s.borrow_mut().navigate_to(2).unwrap();
        s.borrow_mut().set_query("a user profile card");

        let pending = s.borrow_mut().begin_submission(&strings).unwrap();
        let (outcome, switched_to) = tokio::join!(backend.generate(&pending.request), async {
            s.borrow_mut().create_conversation(None)
        });
        assert_eq!(switched_to, 3);
        assert_eq!(s.borrow().active(), Some(3));

        s.borrow_mut().complete_submission(pending, outcome, &strings);
        let s = s.into_inner();
        let last = s.messages(2).last().unwrap();
        assert!(!last.is_user());
        assert!(last.text.contains("This code a user profile card."));
        assert!(s.messages(3).is_empty());
        assert!(s.displayed_messages().is_empty());
    }

    #[tokio::test]
    async fn unsupported_upload_notifies_once_and_attaches_nothing() {
        let strings = catalog();
        let notifier = RecordingNotifier::default();
        let mut s = session(ToolKind::DevDocs);
        s.navigate_to(1).unwrap();

        let mut reads = ingest(vec![PickedFile("notes.txt", "todo")], s.profile().allow);
        while let Some(result) = futures_util::StreamExt::next(&mut reads).await {
            if let Some(notice) = s.accept_upload(result) {
                notifier.notify(&strings.translate(&notice.key), notice.severity);
            }
        }

        assert!(s.uploads().is_empty());
        let seen = notifier.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], ("Unsupported file type".to_string(), Severity::Error));
    }

    #[test]
    fn mark_polish_inlines_uploaded_markdown_into_the_query() {
        let mut s = session(ToolKind::MarkPolish);
        s.set_query("Please review:");
        s.accept_upload(Ok(Attachment::new("guide.md", "# Guide", AttachmentKind::Markdown)));
        s.accept_upload(Ok(Attachment::new("api.yml", "openapi: 3.0.0", AttachmentKind::Yaml)));
        assert_eq!(s.query(), "Please review:\n\n# Guide");
        assert_eq!(s.uploads().len(), 2);

        let mut other = session(ToolKind::DocuBuddy);
        other.accept_upload(Ok(Attachment::new("guide.md", "# Guide", AttachmentKind::Markdown)));
        assert_eq!(other.query(), "");
    }

    #[test]
    fn read_failures_use_the_read_error_notice() {
        let mut s = session(ToolKind::MarkPolish);
        let notice = s.accept_upload(Err(DocuError::file_read("a.md", "denied"))).unwrap();
        assert_eq!(notice.key, "markPolish.fileUpload.error");
        assert_eq!(notice.severity, Severity::Error);
    }

    #[test]
    fn clear_uploads_empties_the_pending_list() {
        let mut s = session(ToolKind::DocuBuddy);
        s.accept_upload(Ok(Attachment::new("a.md", "a", AttachmentKind::Markdown)));
        s.clear_uploads();
        assert!(s.uploads().is_empty());
    }
}
