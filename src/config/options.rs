//! Typed option sets decoded from a name/value option table.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::{Table, Value};

use super::ConfigError;

/// Options for an [`IniConfig`](super::IniConfig).
///
/// Decoded from an option table with [`IniOptions::from_table`]:
///
/// ```toml
/// ini_file = "config/app.ini"
/// ini_prefix = "app."
/// ini_logging = true
/// ini_logging_disable_existing = false
/// ```
///
/// Options other than the `ini_*` ones are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniOptions {
    file: PathBuf,
    prefix: String,
    logging: bool,
    logging_disable_existing: bool,
}

#[derive(Debug, Deserialize)]
struct RawIniOptions {
    ini_file: Option<PathBuf>,
    #[serde(default)]
    ini_prefix: String,
    #[serde(default)]
    ini_logging: bool,
    #[serde(default = "default_true")]
    ini_logging_disable_existing: bool,
}

fn default_true() -> bool {
    true
}

impl IniOptions {
    /// Options for `file` with no prefix and logging bootstrap disabled.
    pub fn new(file: impl AsRef<Path>) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            prefix: String::new(),
            logging: false,
            logging_disable_existing: true,
        }
    }

    /// Decodes `ini_file`, `ini_prefix`, `ini_logging` and
    /// `ini_logging_disable_existing` from an option table.
    pub fn from_table(options: &Table) -> Result<Self, ConfigError> {
        let raw: RawIniOptions = Value::Table(options.clone()).try_into()?;
        let file = raw.ini_file.ok_or(ConfigError::MissingOption("ini_file"))?;

        Ok(Self {
            file,
            prefix: raw.ini_prefix,
            logging: raw.ini_logging,
            logging_disable_existing: raw.ini_logging_disable_existing,
        })
    }

    /// Sets the string prepended to every requested section name.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Requests the logging bootstrap when the source is created through
    /// the [`ConfigFactory`](super::ConfigFactory).
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    #[must_use]
    pub fn with_logging_disable_existing(mut self, disable: bool) -> Self {
        self.logging_disable_existing = disable;
        self
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn logging(&self) -> bool {
        self.logging
    }

    pub fn logging_disable_existing(&self) -> bool {
        self.logging_disable_existing
    }
}

/// Options for an [`EnvConfig`](super::EnvConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOptions {
    prefix: String,
    separator: String,
}

#[derive(Debug, Deserialize)]
struct RawEnvOptions {
    env_prefix: Option<String>,
    #[serde(default = "default_separator")]
    env_separator: String,
}

fn default_separator() -> String {
    "__".to_string()
}

impl EnvOptions {
    /// Options for variables named `{prefix}__{SECTION}__{KEY}`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: default_separator(),
        }
    }

    /// Decodes `env_prefix` and `env_separator` from an option table.
    pub fn from_table(options: &Table) -> Result<Self, ConfigError> {
        let raw: RawEnvOptions = Value::Table(options.clone()).try_into()?;
        let prefix = raw.env_prefix.ok_or(ConfigError::MissingOption("env_prefix"))?;

        Self::new(prefix).with_separator(raw.env_separator)
    }

    /// Sets the separator between prefix, section and key segments.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Result<Self, ConfigError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(ConfigError::InvalidOption {
                option: "env_separator",
                reason: "separator must not be empty".to_string(),
            });
        }
        self.separator = separator;
        Ok(self)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(toml_str: &str) -> Table {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_ini_options_defaults() {
        let options = IniOptions::from_table(&table(r#"ini_file = "app.ini""#)).unwrap();

        assert_eq!(options.file(), Path::new("app.ini"));
        assert_eq!(options.prefix(), "");
        assert!(!options.logging());
        assert!(options.logging_disable_existing());
        assert_eq!(options, IniOptions::new("app.ini"));
    }

    #[test]
    fn test_ini_options_all_fields() {
        let options = IniOptions::from_table(&table(
            r#"
            ini_file = "app.ini"
            ini_prefix = "app."
            ini_logging = true
            ini_logging_disable_existing = false
            "#,
        ))
        .unwrap();

        assert_eq!(options.prefix(), "app.");
        assert!(options.logging());
        assert!(!options.logging_disable_existing());
    }

    #[test]
    fn test_ini_options_ignore_unknown_options() {
        let options = IniOptions::from_table(&table(
            r#"
            ini_file = "test.ini"
            bar = "baz"
            "#,
        ))
        .unwrap();

        assert_eq!(options.file(), Path::new("test.ini"));
    }

    #[test]
    fn test_ini_options_missing_file() {
        let result = IniOptions::from_table(&table(r#"bar = "baz""#));
        assert!(matches!(result, Err(ConfigError::MissingOption("ini_file"))));
    }

    #[test]
    fn test_ini_options_wrong_type() {
        let result = IniOptions::from_table(&table(
            r#"
            ini_file = "app.ini"
            ini_logging = "yes"
            "#,
        ));
        assert!(matches!(result, Err(ConfigError::InvalidOptions(_))));
    }

    #[test]
    fn test_env_options() {
        let options = EnvOptions::from_table(&table(r#"env_prefix = "MYAPP""#)).unwrap();
        assert_eq!(options.prefix(), "MYAPP");
        assert_eq!(options.separator(), "__");

        let result = EnvOptions::from_table(&table(
            r#"
            env_prefix = "MYAPP"
            env_separator = ""
            "#,
        ));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOption { option: "env_separator", .. })
        ));
    }

    #[test]
    fn test_env_options_missing_prefix() {
        let result = EnvOptions::from_table(&Table::new());
        assert!(matches!(result, Err(ConfigError::MissingOption("env_prefix"))));
    }
}
