use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conversation ids are small integers assigned per tool, starting at 1.
pub type ConversationId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(id: ConversationId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), start_time: Utc::now(), messages: Vec::new() }
    }

    pub fn started_at(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript turn. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<Attachment>,
}

impl Message {
    pub fn user(text: impl Into<String>, files: Vec<Attachment>) -> Self {
        Self { role: MessageRole::User, text: text.into(), files }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, text: text.into(), files: Vec::new() }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Code,
    Yaml,
    Markdown,
}

impl AttachmentKind {
    /// Fence tag used when the attachment is echoed back inside a code block.
    pub fn fence(&self) -> &'static str {
        match self {
            AttachmentKind::Code => "text",
            AttachmentKind::Yaml => "yaml",
            AttachmentKind::Markdown => "markdown",
        }
    }
}

/// A user-supplied file, classified at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, content: impl Into<String>, kind: AttachmentKind) -> Self {
        Self { name: name.into(), content: content.into(), kind, language: None }
    }

    pub fn code(
        name: impl Into<String>,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            kind: AttachmentKind::Code,
            language: Some(language.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_serializes_kind_as_type() {
        let file = Attachment::code("calculator.py", "def f(): pass", "py");
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "code");
        assert_eq!(json["language"], "py");

        let yaml = serde_json::to_value(Attachment::new("api.yaml", "openapi: 3.0.0", AttachmentKind::Yaml)).unwrap();
        assert!(yaml.get("language").is_none());
    }

    #[test]
    fn assistant_messages_carry_no_files() {
        let msg = Message::assistant("done");
        assert!(!msg.is_user());
        assert!(msg.files.is_empty());
        assert_eq!(msg.role.to_string(), "assistant");
    }
}
