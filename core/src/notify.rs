use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A user-facing notice, identified by its translation key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub key: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(key: impl Into<String>, severity: Severity) -> Self {
        Self { id: Uuid::new_v4(), key: key.into(), severity }
    }

    pub fn error(key: impl Into<String>) -> Self {
        Self::new(key, Severity::Error)
    }
}

/// Fire-and-forget notification surface.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}
