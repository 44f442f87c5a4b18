use crate::error::CopyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_CHAIN_LEN: usize = 4096;
pub const DEFAULT_MAX_DEPTH: usize = 32;

// ─── CopyConfig ─────────────────────────────────────────────────────────────

/// Traversal limits for one [`Copier`](crate::copy::Copier).
///
/// Loadable from JSON; missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyConfig {
    /// Maximum number of records in any single chain.
    pub max_chain_len: usize,
    /// Maximum nesting of records inside other records' members.
    pub max_depth: usize,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            max_chain_len: DEFAULT_MAX_CHAIN_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CopyConfig {
    pub fn from_json(json: &str) -> Result<Self, CopyError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CopyError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CopyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Zero limits would reject every non-empty copy.
    pub fn validate(&self) -> Result<(), CopyError> {
        if self.max_chain_len == 0 {
            return Err(CopyError::Config("max_chain_len must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(CopyError::Config("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_empty() {
        let config = CopyConfig::from_json("{}").unwrap();
        assert_eq!(config, CopyConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = CopyConfig::from_json(r#"{ "max_depth": 4 }"#).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_chain_len, DEFAULT_MAX_CHAIN_LEN);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CopyConfig::from_json(r#"{ "max_len": 4 }"#).unwrap_err();
        assert!(matches!(err, CopyError::Config(_)));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = CopyConfig::from_json(r#"{ "max_chain_len": 0 }"#).unwrap_err();
        assert!(matches!(err, CopyError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_chain_len": 16, "max_depth": 2 }}"#).unwrap();
        let config = CopyConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config,
            CopyConfig {
                max_chain_len: 16,
                max_depth: 2
            }
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CopyConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CopyError::Io(_)));
    }
}
