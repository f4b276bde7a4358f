use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub output: OutputConfig,
    pub merge: MergeConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Treat a degraded `@odata.type` as a failure.
    pub fail_on_conflict: bool,
}

impl CliConfig {
    /// Load from a TOML file; a missing path means defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert!(c.output.pretty);
        assert!(!c.merge.fail_on_conflict);
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[merge]\nfail_on_conflict = true").unwrap();
        let c = CliConfig::load(Some(file.path())).unwrap();
        assert!(c.merge.fail_on_conflict);
        assert!(c.output.pretty);
    }

    #[test]
    fn load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npretty = false\n\n[merge]\nfail_on_conflict = false").unwrap();
        let c = CliConfig::load(Some(file.path())).unwrap();
        assert!(!c.output.pretty);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/rsm.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn load_invalid_toml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npretty = \"yes\"").unwrap();
        assert!(CliConfig::load(Some(file.path())).is_err());
    }
}
