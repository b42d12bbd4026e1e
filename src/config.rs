use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use slack_attachments::error::{AttachmentError, Result};

use crate::output::OutputFormat;

#[derive(Deserialize, Default, Debug, PartialEq)]
pub struct Config {
    /// Reject unrecognized block/element types when decoding
    #[serde(default)]
    pub strict: bool,
    /// Indent re-encoded documents
    #[serde(default)]
    pub pretty: bool,
    pub format: Option<OutputFormat>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| AttachmentError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| AttachmentError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "slack-attach")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(AttachmentError::NoConfigDir)
    }

    /// Strict mode, with the `--strict` flag and SLACK_ATTACH_STRICT env var
    /// taking precedence over the config file
    pub fn strict(&self, flag: bool) -> bool {
        if flag {
            return true;
        }
        if let Ok(value) = std::env::var("SLACK_ATTACH_STRICT") {
            return parse_bool(&value);
        }
        self.strict
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "strict = true\nformat = \"json\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.strict);
        assert!(!config.pretty);
        assert_eq!(config.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_invalid_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "strict = \"maybe\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AttachmentError::ConfigParse { .. }));
    }

    #[test]
    fn test_strict_flag_wins() {
        assert!(Config::default().strict(true));
    }

    #[test]
    fn test_strict_env_overrides_file() {
        const VAR: &str = "SLACK_ATTACH_STRICT";
        let previous = std::env::var_os(VAR);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "strict = true\n").unwrap();
        let from_file = Config::load_from(&path).unwrap();

        std::env::set_var(VAR, "0");
        let env_off = from_file.strict(false);
        let flag_on = from_file.strict(true);
        std::env::set_var(VAR, "1");
        let env_on = Config::default().strict(false);

        match previous {
            Some(value) => std::env::set_var(VAR, value),
            None => std::env::remove_var(VAR),
        }

        assert!(!env_off);
        assert!(flag_on);
        assert!(env_on);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("1"));
        assert!(parse_bool(" TRUE "));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("nope"));
    }
}
