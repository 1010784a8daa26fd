//! Keeps the active conversation and the address bar in agreement.
//!
//! Two one-directional passes: [`Selector::reconcile`] folds an incoming URL
//! into state, and [`sync_url`] pushes state into the URL. The second pass
//! only navigates when the path actually differs, so running both after every
//! change settles instead of looping.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::ConversationId;
use crate::routes::{Navigator, PathSelection, Route};
use crate::store::ConversationStore;
use crate::tools::ToolKind;

/// Who wins when the URL names an existing conversation other than the
/// active one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Keep showing the active conversation; the URL is rewritten back to it.
    #[default]
    ActiveWins,
    /// Switch to the conversation named by the URL.
    UrlWins,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// No id in the URL: nothing selected.
    Cleared,
    /// Nothing was selected; the URL's conversation was adopted.
    Adopted(ConversationId),
    /// URL and state already agree.
    Unchanged(ConversationId),
    /// Conflict resolved by [`ConflictPolicy::ActiveWins`].
    KeptActive { active: ConversationId, requested: ConversationId },
    /// Conflict resolved by [`ConflictPolicy::UrlWins`].
    FollowedUrl { previous: ConversationId, id: ConversationId },
    /// The URL named no existing conversation; selection dropped.
    Redirected { requested: Option<ConversationId> },
}

/// `Unselected` / `Selected(id)` state machine for one tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selector {
    active: Option<ConversationId>,
    policy: ConflictPolicy,
}

impl Selector {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self { active: None, policy }
    }

    pub fn active(&self) -> Option<ConversationId> {
        self.active
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn select(&mut self, id: ConversationId) {
        self.active = Some(id);
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Folds the URL's selection into state.
    pub fn reconcile(&mut self, url: PathSelection, store: &ConversationStore) -> Reconciliation {
        let requested = match url {
            PathSelection::Bare => {
                self.active = None;
                return Reconciliation::Cleared;
            }
            PathSelection::Conversation(id) if store.contains(id) => id,
            PathSelection::Conversation(id) => {
                warn!("URL names unknown conversation {id}; redirecting");
                self.active = None;
                return Reconciliation::Redirected { requested: Some(id) };
            }
            PathSelection::Invalid => {
                warn!("URL carries a malformed conversation id; redirecting");
                self.active = None;
                return Reconciliation::Redirected { requested: None };
            }
        };

        let outcome = match self.active {
            None => Reconciliation::Adopted(requested),
            Some(active) if active == requested => Reconciliation::Unchanged(active),
            Some(active) => match self.policy {
                ConflictPolicy::ActiveWins => Reconciliation::KeptActive { active, requested },
                ConflictPolicy::UrlWins => Reconciliation::FollowedUrl { previous: active, id: requested },
            },
        };
        match outcome {
            Reconciliation::Adopted(id) | Reconciliation::FollowedUrl { id, .. } => {
                debug!("Selecting conversation {id} from URL");
                self.active = Some(id);
            }
            Reconciliation::KeptActive { active, requested } => {
                debug!("Keeping conversation {active} over URL conversation {requested}");
            }
            _ => {}
        }
        outcome
    }
}

/// Path the address bar should show for `active` in `tool`.
pub fn expected_path(tool: ToolKind, active: Option<ConversationId>) -> String {
    Route::tool(tool, active).path()
}

/// State → URL pass. Returns whether a navigation was pushed.
pub fn sync_url(tool: ToolKind, active: Option<ConversationId>, navigator: &impl Navigator) -> bool {
    let expected = expected_path(tool, active);
    if navigator.current_path() == expected {
        return false;
    }
    debug!("Pushing {expected}");
    navigator.navigate(&expected);
    true
}
