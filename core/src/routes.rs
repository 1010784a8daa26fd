use std::cell::{Cell, RefCell};

use log::debug;

use crate::models::ConversationId;
use crate::tools::ToolKind;

/// What the conversation segment of a tool path says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSelection {
    /// `/dev-docs`
    Bare,
    /// `/dev-docs/2`
    Conversation(ConversationId),
    /// `/dev-docs/abc`: never matches a conversation.
    Invalid,
}

impl PathSelection {
    pub fn id(&self) -> Option<ConversationId> {
        match self {
            PathSelection::Conversation(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<Option<ConversationId>> for PathSelection {
    fn from(id: Option<ConversationId>) -> Self {
        id.map_or(PathSelection::Bare, PathSelection::Conversation)
    }
}

/// The application route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Tool { tool: ToolKind, selection: PathSelection },
    NotFound,
}

impl Route {
    pub fn tool(tool: ToolKind, id: Option<ConversationId>) -> Self {
        Route::Tool { tool, selection: id.into() }
    }

    pub fn parse(path: &str) -> Self {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let Some(first) = segments.next() else {
            return Route::Home;
        };
        let Some(tool) = ToolKind::from_slug(first) else {
            return Route::NotFound;
        };
        let selection = match (segments.next(), segments.next()) {
            (None, _) => PathSelection::Bare,
            (Some(raw), None) => match raw.parse::<ConversationId>() {
                Ok(id) if id > 0 => PathSelection::Conversation(id),
                _ => {
                    debug!("Ignoring malformed conversation segment '{raw}'");
                    PathSelection::Invalid
                }
            },
            (Some(_), Some(_)) => return Route::NotFound,
        };
        Route::Tool { tool, selection }
    }

    /// Canonical path. `Invalid` selections collapse to the tool's bare path.
    pub fn path(&self) -> String {
        match self {
            Route::Home | Route::NotFound => "/".to_string(),
            Route::Tool { tool, selection } => match selection {
                PathSelection::Conversation(id) => tool.conversation_path(*id),
                _ => tool.base_path().to_string(),
            },
        }
    }
}

/// Push-navigation and current-path read; all the binder needs from a router.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// History stack kept in memory, with the same push semantics as the browser.
#[derive(Debug)]
pub struct MemoryNavigator {
    entries: RefCell<Vec<String>>,
    cursor: Cell<usize>,
}

impl MemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self { entries: RefCell::new(vec![initial.into()]), cursor: Cell::new(0) }
    }

    /// Entries stacked above the initial one.
    pub fn pushes(&self) -> usize {
        self.entries.borrow().len() - 1
    }

    pub fn back(&self) -> Option<String> {
        let cursor = self.cursor.get().checked_sub(1)?;
        self.cursor.set(cursor);
        Some(self.current_path())
    }

    pub fn forward(&self) -> Option<String> {
        let cursor = self.cursor.get() + 1;
        if cursor >= self.entries.borrow().len() {
            return None;
        }
        self.cursor.set(cursor);
        Some(self.current_path())
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.entries.borrow()[self.cursor.get()].clone()
    }

    fn navigate(&self, path: &str) {
        let mut entries = self.entries.borrow_mut();
        entries.truncate(self.cursor.get() + 1);
        entries.push(path.to_string());
        self.cursor.set(entries.len() - 1);
    }
}
