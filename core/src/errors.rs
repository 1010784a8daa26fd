use thiserror::Error;

use crate::models::ConversationId;

/// Every failure the core can observe.
///
/// None of these escapes to the UI shell: the session turns upload errors into
/// notices, generation errors into transcript messages and unknown
/// conversations into redirects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocuError {
    // ── Uploads ──────────────────────────────────────────────────────────────
    #[error("Unsupported file type: '{name}'")]
    UnsupportedFileType { name: String },

    #[error("Failed to read file '{name}': {message}")]
    FileRead { name: String, message: String },

    // ── Generation ───────────────────────────────────────────────────────────
    #[error("Generation failed: {message}")]
    GenerationFailed { message: String },

    // ── Conversations ────────────────────────────────────────────────────────
    #[error("Conversation '{id}' not found")]
    ConversationNotFound { id: ConversationId },

    // ── Setup ────────────────────────────────────────────────────────────────
    #[error("Invalid locale catalog '{language}': {message}")]
    Catalog { language: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DocuError {
    pub fn unsupported(name: impl Into<String>) -> Self {
        DocuError::UnsupportedFileType { name: name.into() }
    }

    pub fn file_read(name: impl Into<String>, message: impl Into<String>) -> Self {
        DocuError::FileRead { name: name.into(), message: message.into() }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        DocuError::GenerationFailed { message: message.into() }
    }

    /// Errors the user can fix by picking a different file.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, DocuError::UnsupportedFileType { .. } | DocuError::FileRead { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DocuError::ConversationNotFound { .. })
    }
}
