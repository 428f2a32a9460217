use std::io::Write;

use ini_config::{ConfigError, ConfigFactory, ConfigSource, Error, Section};
use tempfile::NamedTempFile;
use toml::{Table, Value};

fn ini_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".ini").unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn options(file: &str) -> Table {
    let mut options = Table::new();
    options.insert("ini_file".to_string(), Value::String(file.to_string()));
    options.insert("bar".to_string(), Value::String("baz".to_string()));
    options
}

fn create(file: &NamedTempFile) -> Box<dyn ConfigSource> {
    ConfigFactory::default()
        .create("ini", &options(&file.path().display().to_string()))
        .unwrap()
}

#[test]
fn file_not_found() {
    let result = ConfigFactory::default().create("ini", &options("test.ini"));

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::FileNotFound(_)))
    ));
}

#[test]
fn file_not_found_with_logging_requested() {
    let mut opts = options("/nonexistent/path/test.ini");
    opts.insert("ini_logging".to_string(), Value::Boolean(true));

    let result = ConfigFactory::default().create("ini", &opts);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::FileNotFound(_)))
    ));
}

#[test]
fn get_section_undefined() {
    let file = ini_file("[TESTING]\nkey = value");
    let config = create(&file);

    assert!(matches!(
        config.get_section("UNDEFINED"),
        Err(ConfigError::SectionNotFound(_))
    ));
}

#[test]
fn get_section_default_value() {
    let file = ini_file("[TESTING]\nkey = value");
    let config = create(&file);

    assert!(config.get_section("TESTING").is_ok());
    let result = config.get("UNDEFINED").map_or("undefined", Section::name);
    assert_eq!(result, "undefined");
}

#[test]
fn section_option() {
    let file = ini_file("[TESTING]\nkey = value");
    let config = create(&file);

    let section = config.get_section("TESTING").unwrap();
    assert_eq!(&section["key"], "value");
}

#[test]
fn section_option_upper() {
    let file = ini_file("[TESTING]\nKEY = value");
    let config = create(&file);

    let section = &config["TESTING"];
    let result: Vec<(&str, &str)> = section.iter().collect();
    assert_eq!(result, vec![("KEY", "value")]);
}

#[test]
fn get_value() {
    let file = ini_file("[TESTING]\nkey = value");
    let config = create(&file);

    let section = config.get_section("TESTING").unwrap();
    assert_eq!(section.get_or("key2", "undefined"), "undefined");
}

#[test]
fn keys_are_stable_across_calls() {
    let file = ini_file("[b]\nx = 1\n[a]\ny = 2\n[TESTING]\nkey = value\n");
    let config = create(&file);

    let first: Vec<_> = config.keys().collect();
    assert_eq!(first, ["b", "a", "TESTING"]);
    assert_eq!(config.keys().collect::<Vec<_>>(), first);
}
