use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::binder::ConflictPolicy;
use crate::errors::DocuError;
use crate::i18n::Language;

/// Client-side settings. Every field has a default, so an empty JSON object is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulated backend latency.
    pub generation_latency_ms: u64,
    pub max_notifications: usize,
    pub notification_ttl_ms: u64,
    pub conflict_policy: ConflictPolicy,
    pub fallback_language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation_latency_ms: 1000,
            max_notifications: 3,
            notification_ttl_ms: 5000,
            conflict_policy: ConflictPolicy::ActiveWins,
            fallback_language: Language::En,
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, DocuError> {
        let config: AppConfig =
            serde_json::from_str(raw).map_err(|e| DocuError::Config(e.to_string()))?;
        if config.max_notifications == 0 {
            return Err(DocuError::Config("max_notifications must be at least 1".into()));
        }
        Ok(config)
    }

    pub fn generation_latency(&self) -> Duration {
        Duration::from_millis(self.generation_latency_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = AppConfig::from_json(
            r#"{ "generation_latency_ms": 50, "conflict_policy": "url_wins", "fallback_language": "it" }"#,
        )
        .unwrap();
        assert_eq!(config.generation_latency(), Duration::from_millis(50));
        assert_eq!(config.conflict_policy, ConflictPolicy::UrlWins);
        assert_eq!(config.fallback_language, Language::It);
        assert_eq!(config.max_notifications, 3);
    }

    #[test]
    fn rejects_zero_notifications_and_bad_json() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "max_notifications": 0 }"#),
            Err(DocuError::Config(_))
        ));
        assert!(AppConfig::from_json("not json").is_err());
    }
}
