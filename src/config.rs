use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::models::Threshold;

/// Root configuration structure, deserialized from `.attrsim/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub input: InputConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Similarity threshold used when `--threshold` is not given.
    /// Without either, the threshold is prompted for interactively.
    pub threshold: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Header name or 1-based index of the attribute column.
    pub column: Option<String>,
    /// Whether the first row of a delimited file is a header. Defaults to `true`.
    pub has_headers: bool,
    /// Field delimiter; defaults to `,` (or tab for `.tsv`).
    pub delimiter: Option<char>,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            column: None,
            has_headers: true,
            delimiter: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory for generated review worksheets. Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Configured threshold, validated.
    pub fn threshold(&self) -> Result<Option<Threshold>> {
        self.analysis
            .threshold
            .map(Threshold::new)
            .transpose()
            .context("Invalid [analysis] threshold in config")
    }

    /// Configured delimiter as a single byte.
    pub fn delimiter(&self) -> Result<Option<u8>> {
        match self.input.delimiter {
            None => Ok(None),
            Some(c) if c.is_ascii() => Ok(Some(c as u8)),
            Some(c) => bail!("Invalid [input] delimiter `{}`: must be an ASCII character", c),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<search_dir>/.attrsim/config.toml`
/// 3. `~/.config/attrsim/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(search_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = search_dir.join(".attrsim").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("attrsim").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(cfg.threshold().unwrap().is_none());
        assert!(cfg.input.has_headers);
        assert!(cfg.delimiter().unwrap().is_none());
        assert!(cfg.report.output_dir.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let cfg: Config = toml::from_str(
            r#"
            [analysis]
            threshold = 85

            [input]
            column = "Attribute Name"
            has_headers = false
            delimiter = ";"

            [report]
            output_dir = "reports"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.threshold().unwrap().map(Threshold::value), Some(85));
        assert_eq!(cfg.input.column.as_deref(), Some("Attribute Name"));
        assert!(!cfg.input.has_headers);
        assert_eq!(cfg.delimiter().unwrap(), Some(b';'));
        assert_eq!(cfg.report.output_dir, Some(PathBuf::from("reports")));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: Config = toml::from_str("[input]\ncolumn = \"2\"\n").unwrap();
        assert!(cfg.input.has_headers);
        assert!(cfg.threshold().unwrap().is_none());
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let cfg: Config = toml::from_str("[analysis]\nthreshold = 101\n").unwrap();
        assert!(cfg.threshold().is_err());
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let cfg: Config = toml::from_str("[input]\ndelimiter = \"§\"\n").unwrap();
        assert!(cfg.delimiter().is_err());
    }

    #[test]
    fn test_local_config_and_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".attrsim")).unwrap();
        std::fs::write(
            dir.path().join(".attrsim").join("config.toml"),
            "[analysis]\nthreshold = 70\n",
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.analysis.threshold, Some(70));

        let override_path = dir.path().join("other.toml");
        std::fs::write(&override_path, "[analysis]\nthreshold = 95\n").unwrap();
        let cfg = load_config(dir.path(), Some(&override_path)).unwrap();
        assert_eq!(cfg.analysis.threshold, Some(95));
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(dir.path(), Some(&dir.path().join("missing.toml"))).is_err());
    }
}
