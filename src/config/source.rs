use std::ops::Index;

use super::section::{Keys, Section};
use super::ConfigError;

/// The lookup contract every configuration source exposes.
///
/// Implementors provide unprefixed access to their sections; the prefixed
/// lookups are built on top. Prefixing is plain concatenation: with prefix
/// `"app."`, `get("db")` looks up a section literally named `app.db`. No
/// separator is inserted, so callers include one in the prefix if needed.
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    /// Looks up a section by its exact name, ignoring the prefix.
    fn lookup(&self, full_name: &str) -> Option<&Section>;

    /// Section names in load order. The prefix is not stripped.
    fn keys(&self) -> Keys<'_>;

    fn prefix(&self) -> &str {
        ""
    }

    /// The full section name `name` resolves to.
    fn qualify(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }

    /// Returns the section `prefix + name`, or `None` if it is absent.
    fn get(&self, name: &str) -> Option<&Section> {
        if self.prefix().is_empty() {
            self.lookup(name)
        } else {
            self.lookup(&self.qualify(name))
        }
    }

    /// Returns the section `prefix + name`, falling back to `default`.
    fn get_or<'a>(&'a self, name: &str, default: &'a Section) -> &'a Section {
        self.get(name).unwrap_or(default)
    }

    /// Returns the section `prefix + name`, or [`ConfigError::SectionNotFound`].
    fn get_section(&self, name: &str) -> Result<&Section, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::SectionNotFound(self.qualify(name)))
    }
}

impl Index<&str> for dyn ConfigSource {
    type Output = Section;

    /// # Panics
    ///
    /// Panics if the section is absent.
    fn index(&self, name: &str) -> &Section {
        index_section(self, name)
    }
}

pub(crate) fn index_section<'a, S>(source: &'a S, name: &str) -> &'a Section
where
    S: ConfigSource + ?Sized,
{
    match source.get_section(name) {
        Ok(section) => section,
        Err(e) => panic!("{e}"),
    }
}
