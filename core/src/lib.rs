//! Conversation state, URL binding and submission workflow shared by the
//! DocuGenie documentation assistants (MarkPolish, DevDocs, DocuBuddy).
//!
//! Nothing in here knows about the DOM: the frontend supplies a
//! [`routes::Navigator`], an [`ingest::FileSource`], a [`submission::Delay`]
//! and a [`notify::Notifier`], and drives a [`session::ChatSession`] per tool.

pub mod binder;
pub mod config;
pub mod errors;
pub mod i18n;
pub mod ingest;
pub mod models;
pub mod notify;
pub mod routes;
pub mod segments;
pub mod session;
pub mod store;
pub mod submission;
pub mod tools;

pub use binder::{ConflictPolicy, Reconciliation};
pub use config::AppConfig;
pub use errors::DocuError;
pub use i18n::{Catalog, Language, Translate};
pub use models::{Attachment, AttachmentKind, Conversation, ConversationId, Message, MessageRole};
pub use notify::{Notice, Notifier, Severity};
pub use routes::{Navigator, PathSelection, Route};
pub use session::ChatSession;
pub use store::ConversationStore;
pub use submission::{Generation, GenerationRequest, Generator, PendingSubmission};
pub use tools::ToolKind;
