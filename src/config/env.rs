use std::collections::BTreeMap;
use std::ops::Index;

use log::debug;

use super::options::EnvOptions;
use super::section::{Keys, Section, SectionList};
use super::source::{index_section, ConfigSource};
use super::ConfigError;

/// A configuration source built from environment variables.
///
/// With prefix `MYAPP` and separator `__`, the variable
/// `MYAPP__DATABASE__HOST=localhost` becomes key `HOST` in section
/// `DATABASE`. Segments after the section are joined back with the
/// separator, so `MYAPP__DATABASE__POOL__SIZE` yields key `POOL__SIZE`.
/// Names keep their case and values stay strings. Sections and keys are
/// ordered by name.
///
/// The environment is read once, when the source is loaded.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    options: EnvOptions,
    sections: SectionList,
}

impl EnvConfig {
    pub fn load(options: &EnvOptions) -> Result<Self, ConfigError> {
        Ok(Self::from_vars(options, std::env::vars()))
    }

    fn from_vars(options: &EnvOptions, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let prefix_with_sep = format!("{}{}", options.prefix(), options.separator());
        let mut grouped: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for (name, value) in vars {
            let Some(path) = name.strip_prefix(&prefix_with_sep) else {
                continue;
            };

            let Some((section, key)) = path.split_once(options.separator()) else {
                continue;
            };
            if section.is_empty() || key.is_empty() {
                continue;
            }

            grouped
                .entry(section.to_string())
                .or_default()
                .insert(key.to_string(), value);
        }

        let mut sections = SectionList::default();
        for (name, entries) in grouped {
            let mut section = Section::new(name);
            for (key, value) in entries {
                section.insert(key, value);
            }
            sections.push(section);
        }

        debug!(
            "loaded {} sections from environment prefix {}",
            sections.len(),
            options.prefix()
        );

        Self {
            options: options.clone(),
            sections,
        }
    }

    pub fn options(&self) -> &EnvOptions {
        &self.options
    }
}

impl ConfigSource for EnvConfig {
    fn lookup(&self, full_name: &str) -> Option<&Section> {
        self.sections.find(full_name)
    }

    fn keys(&self) -> Keys<'_> {
        self.sections.keys()
    }
}

impl Index<&str> for EnvConfig {
    type Output = Section;

    fn index(&self, name: &str) -> &Section {
        index_section(self, name)
    }
}

impl<'a> IntoIterator for &'a EnvConfig {
    type Item = &'a str;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.keys()
    }
}
