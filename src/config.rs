use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::{ColumnLabels, EncodeOptions};

/// Defaults that can live in an rc file as well as on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub title: Option<String>,
    pub no_title: bool,
    pub labels: Option<ColumnLabels>,
    pub verbose: bool,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            title: other.title.clone().or_else(|| self.title.clone()),
            no_title: self.no_title || other.no_title,
            labels: other.labels.or(self.labels),
            verbose: self.verbose || other.verbose,
        }
    }

    /// Export settings these flags describe.
    pub fn encode_options(&self) -> EncodeOptions {
        let defaults = EncodeOptions::default();
        EncodeOptions {
            title: if self.no_title {
                None
            } else {
                self.title.clone().or(defaults.title)
            },
            labels: self.labels.unwrap_or(defaults.labels),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("seoedit").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("seoedit")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("seoedit").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("seoedit")
                .join("config");
        }
    }

    PathBuf::from(".seoeditrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".seoeditrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_quoted)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# seoedit defaults (saved with --save)".to_string());
    if let Some(title) = &flags.title {
        lines.push(format!("--title \"{}\"", quote_escape(title)));
    }
    if flags.no_title {
        lines.push("--no-title".to_string());
    }
    if let Some(labels) = flags.labels {
        lines.push(format!("--labels {}", labels.as_str()));
    }
    if flags.verbose {
        lines.push("--verbose".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list; anything else is skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-title" {
            flags.no_title = true;
        } else if token == "--verbose" || token == "-v" {
            flags.verbose = true;
        } else if token == "--title" {
            if let Some(next) = tokens.get(i + 1) {
                flags.title = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--title=") {
            flags.title = Some(value.to_string());
        } else if token == "--labels" {
            if let Some(next) = tokens.get(i + 1) {
                flags.labels = ColumnLabels::parse(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--labels=") {
            flags.labels = ColumnLabels::parse(value);
        }
        i += 1;
    }
    flags
}

// Whitespace split that keeps "double quoted" runs together.
fn quote_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Split on whitespace outside double quotes; `\"` and `\\` are literal.
fn split_quoted(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if in_quotes => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }
    tokens
}
