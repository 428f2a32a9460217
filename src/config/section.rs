//! Named groups of string key/value pairs.

use std::ops::Index;
use std::slice;

use super::ConfigError;

/// A named group of key/value pairs, in the order they were read.
///
/// Values are always strings; no numeric or boolean coercion is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Appends an entry. Callers check for duplicate keys first.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// The section name exactly as it appears in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value for `key`, or `None` if the section has no such key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value for `key`, falling back to `default`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Returns the value for `key`, or [`ConfigError::KeyNotFound`].
    pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::KeyNotFound {
            section: self.name.clone(),
            key: key.to_string(),
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates `(key, value)` pairs in source order.
    pub fn iter(&self) -> Entries<'_> {
        Entries(self.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for Section {
    type Output = str;

    /// # Panics
    ///
    /// Panics if the section has no such key. Use [`Section::get`] or
    /// [`Section::require`] for a fallible lookup.
    fn index(&self, key: &str) -> &str {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key `{key}` not found in section [{}]", self.name),
        }
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = (&'a str, &'a str);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`Section`].
#[derive(Debug, Clone)]
pub struct Entries<'a>(slice::Iter<'a, (String, String)>);

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Sections of one source, in load order.
#[derive(Debug, Clone, Default)]
pub(crate) struct SectionList {
    sections: Vec<Section>,
}

impl SectionList {
    pub(crate) fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub(crate) fn find(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub(crate) fn keys(&self) -> Keys<'_> {
        Keys(self.sections.iter())
    }

    pub(crate) fn iter(&self) -> slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.sections.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Iterator over section names, in load order.
#[derive(Debug, Clone)]
pub struct Keys<'a>(slice::Iter<'a, Section>);

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Section::name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn testing_section() -> Section {
        let mut section = Section::new("TESTING");
        section.insert("key", "value");
        section.insert("KEY", "other");
        section.insert("port", "42");
        section
    }

    #[test]
    fn test_get_is_case_sensitive() {
        let section = testing_section();
        assert_eq!(section.get("key"), Some("value"));
        assert_eq!(section.get("KEY"), Some("other"));
        assert_eq!(section.get("Key"), None);
    }

    #[test]
    fn test_get_or_falls_back() {
        let section = testing_section();
        assert_eq!(section.get_or("key2", "undefined"), "undefined");
        assert_eq!(section.get_or("key", "undefined"), "value");
    }

    #[test]
    fn test_require_missing_key() {
        let section = testing_section();
        let err = section.require("absent").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::KeyNotFound { ref section, ref key } if section == "TESTING" && key == "absent"
        ));
    }

    #[test]
    fn test_index() {
        let section = testing_section();
        assert_eq!(&section["port"], "42");
    }

    #[test]
    #[should_panic(expected = "key `absent` not found in section [TESTING]")]
    fn test_index_missing_key_panics() {
        let section = testing_section();
        let _ = &section["absent"];
    }

    #[test]
    fn test_iteration_keeps_source_order() {
        let section = testing_section();
        let pairs: Vec<_> = section.iter().collect();
        assert_eq!(
            pairs,
            vec![("key", "value"), ("KEY", "other"), ("port", "42")]
        );
        assert_eq!(section.keys().collect::<Vec<_>>(), ["key", "KEY", "port"]);
        assert_eq!(section.len(), 3);
    }

    #[test]
    fn test_section_list_lookup() {
        let mut list = SectionList::default();
        list.push(Section::new("b"));
        list.push(Section::new("a"));

        assert!(list.contains("a"));
        assert!(list.find("c").is_none());
        assert_eq!(list.keys().collect::<Vec<_>>(), ["b", "a"]);
    }
}
