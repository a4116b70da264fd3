//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::transform::FilterType;

/// Settings shared by every edit an [`Editor`](crate::Editor) performs.
///
/// Missing fields take their default values when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of edits kept for undo.
    pub history_limit: usize,
    /// Resampling filter used by resize.
    pub resize_filter: FilterType,
    /// Worker threads for parallel layer work (0 = one per core).
    pub worker_threads: usize,
    /// Never ask questions; interactive choices take their simplest option.
    pub automation: bool,
    /// Largest width or height a resized layer may have.
    pub max_layer_dimension: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            resize_filter: FilterType::default(),
            worker_threads: 0,
            automation: false,
            max_layer_dimension: 32_768,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::new();
        assert!(config.is_default());
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.resize_filter, FilterType::Bilinear);
        assert!(!config.automation);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "automation": true, "resize_filter": "Lanczos3" }"#).unwrap();
        assert!(config.automation);
        assert_eq!(config.resize_filter, FilterType::Lanczos3);
        assert_eq!(config.history_limit, 50);
        assert!(!config.is_default());
    }

    #[test]
    fn test_config_serializes_every_field() {
        let json = serde_json::to_value(EngineConfig::default()).unwrap();
        for field in [
            "history_limit",
            "resize_filter",
            "worker_threads",
            "automation",
            "max_layer_dimension",
        ] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
