//! INI-file configuration source.

use std::ops::Index;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use log::debug;

use super::options::IniOptions;
use super::section::{Keys, Section, SectionList};
use super::source::{index_section, ConfigSource};
use super::ConfigError;

/// A configuration source backed by an INI file.
///
/// The whole file is read and parsed when the source is loaded; lookups
/// afterwards never touch the filesystem. Section and key names keep their
/// case, and values are kept verbatim as strings.
///
/// ## Example
///
/// ```no_run
/// use ini_config::{ConfigSource, IniConfig, IniOptions};
///
/// let config = IniConfig::load(&IniOptions::new("app.ini").with_prefix("app."))?;
///
/// // Reads section [app.database]
/// let database = config.get_section("database")?;
/// let host = database.get_or("host", "localhost");
/// # Ok::<(), ini_config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IniConfig {
    path: PathBuf,
    prefix: String,
    sections: SectionList,
}

impl IniConfig {
    /// Loads `path` with no prefix.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(&IniOptions::new(path))
    }

    /// Loads the file named by `options`.
    ///
    /// Only the file and prefix are used here; the logging flags are acted
    /// on by [`ConfigFactory`](super::ConfigFactory), or explicitly through
    /// [`logging::init_from_file`](crate::logging::init_from_file).
    pub fn load(options: &IniOptions) -> Result<Self, ConfigError> {
        let path = options.file();
        let sections = load_ini_file(path)?;

        debug!(
            "loaded {} sections from {}",
            sections.len(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            prefix: options.prefix().to_string(),
            sections,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterates sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl ConfigSource for IniConfig {
    fn lookup(&self, full_name: &str) -> Option<&Section> {
        self.sections.find(full_name)
    }

    fn keys(&self) -> Keys<'_> {
        self.sections.keys()
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Index<&str> for IniConfig {
    type Output = Section;

    /// # Panics
    ///
    /// Panics if the section is absent. Use [`ConfigSource::get`] for a
    /// fallible lookup.
    fn index(&self, name: &str) -> &Section {
        index_section(self, name)
    }
}

impl<'a> IntoIterator for &'a IniConfig {
    type Item = &'a str;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.keys()
    }
}

/// Reads and parses an INI file.
///
/// The path must name an existing regular file.
fn load_ini_file(path: &Path) -> Result<SectionList, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_ini(path, &contents)
}

fn parse_ini(path: &Path, contents: &str) -> Result<SectionList, ConfigError> {
    // Values are kept verbatim: no quote stripping, no backslash escapes.
    // Indented lines continue the previous value.
    let opt = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        enabled_indented_mutiline_value: true,
        ..ParseOption::default()
    };
    let document = Ini::load_from_str_opt(contents, opt).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut sections = SectionList::default();

    for (name, properties) in document.iter() {
        let Some(name) = name else {
            if properties.is_empty() {
                continue;
            }
            return Err(ConfigError::MissingSectionHeader(path.to_path_buf()));
        };

        if sections.contains(name) {
            return Err(ConfigError::DuplicateSection {
                path: path.to_path_buf(),
                section: name.to_string(),
            });
        }

        let mut section = Section::new(name);
        for (key, value) in properties.iter() {
            if section.contains_key(key) {
                return Err(ConfigError::DuplicateKey {
                    path: path.to_path_buf(),
                    section: name.to_string(),
                    key: key.to_string(),
                });
            }
            section.insert(key, value);
        }
        sections.push(section);
    }

    Ok(sections)
}
