//! The three assistants. Each one is the shared session logic plus a
//! [`ToolProfile`]: which files it accepts, which strings it uses, what it is
//! seeded with and how its mock backend answers.

mod dev_docs;
mod docu_buddy;
mod mark_polish;

use chrono::{DateTime, Utc};

use crate::ingest::AllowList;
use crate::models::{Conversation, ConversationId};
use crate::submission::GenerationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    MarkPolish,
    DevDocs,
    DocuBuddy,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::MarkPolish, ToolKind::DevDocs, ToolKind::DocuBuddy];

    pub fn slug(&self) -> &'static str {
        match self {
            ToolKind::MarkPolish => "mark-polish",
            ToolKind::DevDocs => "dev-docs",
            ToolKind::DocuBuddy => "docu-buddy",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.slug() == slug)
    }

    pub fn base_path(&self) -> &'static str {
        match self {
            ToolKind::MarkPolish => "/mark-polish",
            ToolKind::DevDocs => "/dev-docs",
            ToolKind::DocuBuddy => "/docu-buddy",
        }
    }

    pub fn conversation_path(&self, id: ConversationId) -> String {
        format!("{}/{id}", self.base_path())
    }

    /// Prefix of this tool's translation keys.
    pub fn i18n_prefix(&self) -> &'static str {
        self.profile().i18n_prefix
    }

    pub fn profile(&self) -> &'static ToolProfile {
        match self {
            ToolKind::MarkPolish => &mark_polish::PROFILE,
            ToolKind::DevDocs => &dev_docs::PROFILE,
            ToolKind::DocuBuddy => &docu_buddy::PROFILE,
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

pub struct ToolProfile {
    pub kind: ToolKind,
    pub i18n_prefix: &'static str,
    pub allow: AllowList,
    /// Uploaded markdown is appended to the compose box as well as attached.
    pub inline_markdown: bool,
    /// Text of a user message sent with attachments only.
    pub fallback_key: &'static str,
    /// Assistant text recorded when generation fails.
    pub error_key: &'static str,
    pub unsupported_key: &'static str,
    pub read_error_key: &'static str,
    seed: fn(DateTime<Utc>) -> Vec<Conversation>,
    mock: fn(&GenerationRequest) -> String,
}

impl ToolProfile {
    /// Mock conversations, with start times relative to `now`.
    pub fn seed(&self, now: DateTime<Utc>) -> Vec<Conversation> {
        (self.seed)(now)
    }

    /// What the simulated backend answers for `request`.
    pub fn mock_response(&self, request: &GenerationRequest) -> String {
        (self.mock)(request)
    }
}

impl std::fmt::Debug for ToolProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolProfile")
            .field("kind", &self.kind)
            .field("allow", &self.allow)
            .field("inline_markdown", &self.inline_markdown)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::i18n::{Catalog, Language};
    use crate::models::AttachmentKind;

    #[test]
    fn slugs_round_trip() {
        for tool in ToolKind::ALL {
            assert_eq!(ToolKind::from_slug(tool.slug()), Some(tool));
            assert_eq!(tool.base_path(), format!("/{tool}"));
            assert_eq!(tool.profile().kind, tool);
        }
        assert_eq!(ToolKind::from_slug("home"), None);
    }

    #[test]
    fn allow_lists_match_each_tool() {
        let mark = ToolKind::MarkPolish.profile();
        assert_eq!(mark.allow.classify("guide.md"), Some(AttachmentKind::Markdown));
        assert_eq!(mark.allow.classify("api.yml"), Some(AttachmentKind::Yaml));
        assert_eq!(mark.allow.classify("main.rs"), None);

        let dev = ToolKind::DevDocs.profile();
        assert_eq!(dev.allow.classify("main.rs"), Some(AttachmentKind::Code));
        assert_eq!(dev.allow.classify("guide.md"), None);

        let buddy = ToolKind::DocuBuddy.profile();
        for name in ["guide.md", "api.yaml", "main.go"] {
            assert!(buddy.allow.classify(name).is_some(), "{name}");
        }
    }

    #[test]
    fn seeds_have_unique_ids_and_alternating_turns() {
        let now = Utc::now();
        for tool in ToolKind::ALL {
            let seed = tool.profile().seed(now);
            let ids: BTreeSet<_> = seed.iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), seed.len(), "{tool}");
            for conversation in &seed {
                assert!(conversation.start_time < now);
                let roles: Vec<_> = conversation.messages.iter().map(|m| m.is_user()).collect();
                assert_eq!(roles, vec![true, false], "{tool} #{}", conversation.id);
            }
        }
    }

    #[test]
    fn every_profile_key_is_translated() {
        let catalog = Catalog::load(Language::En).unwrap();
        for tool in ToolKind::ALL {
            let profile = tool.profile();
            for key in [
                profile.fallback_key,
                profile.error_key,
                profile.unsupported_key,
                profile.read_error_key,
            ] {
                assert!(catalog.lookup(key).is_some(), "{key}");
                assert!(key.starts_with(profile.i18n_prefix));
            }
        }
    }
}
