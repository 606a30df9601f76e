use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROMPT: &str = "dsh> ";
pub const CONFIG_FILE: &str = "dsh.toml";

#[derive(Debug, Default, Deserialize)]
pub struct DshConfig {
    #[serde(default)]
    pub shell: ShellConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShellConfig {
    pub prompt: Option<String>,
    pub color: Option<bool>,
}

impl DshConfig {
    pub fn prompt(&self) -> &str {
        self.shell.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    pub fn color(&self) -> bool {
        self.shell.color.unwrap_or(true)
    }
}

/// Explicit path, then `$DSH_CONFIG`, then `./dsh.toml`.
fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os("DSH_CONFIG").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// A missing file means defaults. A file that exists but does not parse is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<DshConfig> {
    let path = config_path(explicit);
    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("❌ Config file not found: {}", path.display());
        }
        return Ok(DshConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<DshConfig> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.prompt(), DEFAULT_PROMPT);
        assert!(config.color());
    }

    #[test]
    fn test_shell_section() {
        let config = parse_config("[shell]\nprompt = \"$ \"\ncolor = false\n").unwrap();
        assert_eq!(config.prompt(), "$ ");
        assert!(!config.color());
    }

    #[test]
    fn test_malformed_config() {
        assert!(parse_config("[shell]\nprompt = 3\n").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[shell]\nprompt = \"> \"\n").unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().prompt(), "> ");
    }
}
