//! Navigator configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the depth-first traversal keeps track of its frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// One native call frame per visited cell.
    #[default]
    Recursive,
    /// Heap-allocated frame stack. Use for very large mazes where the
    /// recursion depth could exhaust the thread stack.
    Iterative,
}

/// Configuration for the [`Navigator`](crate::Navigator).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Traversal implementation. Both emit the same command sequence.
    #[serde(default)]
    pub traversal: TraversalMode,

    /// Log progress every N newly visited cells (0 = disabled).
    #[serde(default)]
    pub progress_log_interval: usize,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            traversal: TraversalMode::default(),
            progress_log_interval: 0,
        }
    }
}

/// Config load error
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl NavigatorConfig {
    /// Configuration using the explicit frame stack.
    pub fn iterative() -> Self {
        Self {
            traversal: TraversalMode::Iterative,
            ..Default::default()
        }
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = NavigatorConfig::default();
        assert_eq!(config.traversal, TraversalMode::Recursive);
        assert_eq!(config.progress_log_interval, 0);
    }

    #[test]
    fn test_iterative_preset() {
        let config = NavigatorConfig::iterative();
        assert_eq!(config.traversal, TraversalMode::Iterative);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
traversal: iterative
progress_log_interval: 500
"#;
        let config = NavigatorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.traversal, TraversalMode::Iterative);
        assert_eq!(config.progress_log_interval, 500);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = NavigatorConfig::from_yaml("{}").unwrap();
        assert_eq!(config.traversal, TraversalMode::Recursive);
    }

    #[test]
    fn test_bad_mode_is_parse_error() {
        let err = NavigatorConfig::from_yaml("traversal: breadth_first").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "traversal: iterative").unwrap();
        let config = NavigatorConfig::load(file.path()).unwrap();
        assert_eq!(config.traversal, TraversalMode::Iterative);
    }

    #[test]
    fn test_load_missing_file() {
        let err = NavigatorConfig::load(Path::new("/nonexistent/marga.yaml")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io(_)));
    }
}
