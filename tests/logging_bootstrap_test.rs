//! Installs the global logger, so it lives in its own test binary.

use std::io::Write;

use ini_config::{logging, ConfigFactory};
use log::LevelFilter;
use tempfile::NamedTempFile;
use toml::{Table, Value};

const LOGGING_CONFIG: &str = "
[loggers]
keys = root
[handlers]
keys = console
[formatters]
keys = generic
[logger_root]
level = DEBUG
handlers = console
[handler_console]
class = StreamHandler
args = (sys.stderr,)
level = NOTSET
formatter = generic
[formatter_generic]
format = %(asctime)s %(levelname)-5.5s [%(name)s][%(threadName)s] %(message)s
        ";

#[test]
fn logging_bootstrap_keeps_configuration_sections() {
    // Only test in this binary, so nothing else reads the environment.
    std::env::remove_var("RUST_LOG");

    let mut file = NamedTempFile::with_suffix(".ini").unwrap();
    file.write_all(b"[TESTING]\nkey = value").unwrap();
    file.write_all(LOGGING_CONFIG.as_bytes()).unwrap();
    file.flush().unwrap();

    let mut options = Table::new();
    options.insert(
        "ini_file".to_string(),
        Value::String(file.path().display().to_string()),
    );
    options.insert("ini_logging".to_string(), Value::Boolean(true));
    options.insert(
        "ini_logging_disable_existing".to_string(),
        Value::Boolean(false),
    );

    let config = ConfigFactory::default().create("ini", &options).unwrap();
    assert_eq!(log::max_level(), LevelFilter::Debug);

    assert_eq!(&config.get_section("loggers").unwrap()["keys"], "root");
    assert_eq!(&config.get_section("handlers").unwrap()["keys"], "console");
    assert_eq!(&config.get_section("formatters").unwrap()["keys"], "generic");
    assert_eq!(&config.get_section("TESTING").unwrap()["key"], "value");

    // Explicit re-initialisation replaces the active configuration.
    logging::init_from_file(file.path(), true).unwrap();
    assert_eq!(log::max_level(), LevelFilter::Debug);
    log::debug!("logging reconfigured");
}
