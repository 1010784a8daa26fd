use log::{debug, warn};

use crate::models::{Conversation, ConversationId, Message};

/// In-memory conversations for one tool.
///
/// Listing order is seed order, with conversations created at runtime
/// prepended. Transcripts are append-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
}

impl ConversationStore {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self { conversations }
    }

    pub fn list(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ConversationId) -> bool {
        self.get(id).is_some()
    }

    /// `max(existing ids, floor = 1) + 1`.
    pub fn next_id(&self) -> ConversationId {
        self.conversations.iter().map(|c| c.id).fold(1, ConversationId::max) + 1
    }

    /// Allocates a fresh, empty conversation and puts it at the top of the list.
    pub fn create(&mut self, name: Option<String>) -> &Conversation {
        let id = self.next_id();
        let name = name.unwrap_or_else(|| format!("Conversation {id}"));
        debug!("Creating conversation {id} ({name})");
        self.conversations.insert(0, Conversation::new(id, name));
        &self.conversations[0]
    }

    /// Appends to the transcript of `id`. Unknown ids are ignored and reported
    /// through the return value.
    pub fn append(&mut self, id: ConversationId, message: Message) -> bool {
        match self.conversations.iter_mut().find(|c| c.id == id) {
            Some(conversation) => {
                conversation.messages.push(message);
                true
            }
            None => {
                warn!("Dropping message for unknown conversation {id}");
                false
            }
        }
    }

    pub fn messages(&self, id: ConversationId) -> &[Message] {
        self.get(id).map(|c| c.messages.as_slice()).unwrap_or(&[])
    }
}
