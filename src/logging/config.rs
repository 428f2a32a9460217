use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use env_logger::{Builder, Logger, Target, WriteStyle};
use log::LevelFilter;

use super::format::{Template, DEFAULT_FORMAT};
use super::LoggingError;
use crate::config::{ConfigSource, IniConfig, Section};

/// Where a handler writes records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stderr,
    Stdout,
    File { path: PathBuf, append: bool },
    Null,
}

/// The handler attached to the root logger.
#[derive(Debug, Clone)]
pub struct Handler {
    name: String,
    output: Output,
    level: LevelFilter,
    template: Template,
}

impl Handler {
    fn stderr() -> Self {
        Self {
            name: String::new(),
            output: Output::Stderr,
            level: LevelFilter::Trace,
            template: Template::message_only(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn template(&self) -> &Template {
        &self.template
    }
}

/// Logging setup read from the `[loggers]`, `[handlers]` and `[formatters]`
/// sections of an INI file.
///
/// ```ini
/// [loggers]
/// keys = root, db
///
/// [handlers]
/// keys = console
///
/// [formatters]
/// keys = generic
///
/// [logger_root]
/// level = INFO
/// handlers = console
///
/// [logger_db]
/// level = DEBUG
/// qualname = app.db
///
/// [handler_console]
/// class = StreamHandler
/// args = (sys.stderr,)
/// level = NOTSET
/// formatter = generic
///
/// [formatter_generic]
/// format = %(asctime)s %(levelname)-5.5s [%(name)s] %(message)s
/// ```
///
/// Dotted `qualname`s become `::`-separated targets. Only the first
/// handler of the root logger is used; its level caps every logger.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    root_level: LevelFilter,
    loggers: Vec<(String, LevelFilter)>,
    handler: Handler,
    ignored_handlers: Vec<String>,
    disable_existing: bool,
}

impl LoggingConfig {
    /// Reads the logging sections of `config`. Section names are matched
    /// exactly; the source's prefix does not apply.
    ///
    /// With `disable_existing` unset, filter directives from `RUST_LOG`
    /// are layered over the file's when the logger is built.
    pub fn from_ini(config: &IniConfig, disable_existing: bool) -> Result<Self, LoggingError> {
        let loggers = section(config, "loggers")?;
        let logger_keys = split_list(require(loggers, "keys")?);
        if !logger_keys.iter().any(|key| key == "root") {
            return Err(LoggingError::MissingSection("logger_root".to_string()));
        }

        let root = section(config, "logger_root")?;
        let root_level = match root.get("level") {
            Some(level) => parse_level(level, root)?.unwrap_or(LevelFilter::Trace),
            None => LevelFilter::Warn,
        };

        let mut targets = Vec::new();
        for key in logger_keys.iter().filter(|key| *key != "root") {
            let logger = section(config, &format!("logger_{key}"))?;
            let qualname = require(logger, "qualname")?;
            let level = match logger.get("level") {
                Some(level) => parse_level(level, logger)?,
                None => None,
            };
            // NOTSET inherits from the parent, which needs no directive.
            if let Some(level) = level {
                targets.push((qualname.replace('.', "::"), level));
            }
        }

        let root_handlers = split_list(root.get_or("handlers", ""));
        let handler = match root_handlers.first() {
            Some(key) => parse_handler(config, key)?,
            None => Handler::stderr(),
        };

        Ok(Self {
            root_level,
            loggers: targets,
            handler,
            ignored_handlers: root_handlers.into_iter().skip(1).collect(),
            disable_existing,
        })
    }

    pub fn root_level(&self) -> LevelFilter {
        self.root_level
    }

    /// Per-target levels, in the order the loggers are listed.
    pub fn loggers(&self) -> &[(String, LevelFilter)] {
        &self.loggers
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Root handlers after the first, which are not wired to any output.
    pub fn ignored_handlers(&self) -> &[String] {
        &self.ignored_handlers
    }

    pub fn disable_existing(&self) -> bool {
        self.disable_existing
    }

    /// Builds an `env_logger` logger for this configuration.
    pub fn build_logger(&self) -> Result<Logger, LoggingError> {
        let env_filters = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
        self.build_logger_with(env_filters.as_deref())
    }

    /// Builds the logger, layering `env_filters` (`RUST_LOG` syntax) over
    /// the file's directives unless existing configuration is disabled.
    fn build_logger_with(&self, env_filters: Option<&str>) -> Result<Logger, LoggingError> {
        let mut builder = Builder::new();

        if self.handler.output == Output::Null {
            return Ok(builder.filter_level(LevelFilter::Off).build());
        }

        let cap = self.handler.level;
        builder.filter_level(self.root_level.min(cap));
        for (target, level) in &self.loggers {
            builder.filter_module(target, (*level).min(cap));
        }

        if !self.disable_existing {
            if let Some(filters) = env_filters {
                builder.parse_filters(filters);
            }
        }

        match &self.handler.output {
            Output::Stderr => {
                builder.target(Target::Stderr);
            }
            Output::Stdout => {
                builder.target(Target::Stdout);
            }
            Output::File { path, append } => {
                let mut options = OpenOptions::new();
                if *append {
                    options.append(true);
                } else {
                    options.write(true).truncate(true);
                }
                let file = options
                    .create(true)
                    .open(path)
                    .map_err(|e| LoggingError::OpenLogFile {
                        path: path.clone(),
                        source: e,
                    })?;
                builder
                    .target(Target::Pipe(Box::new(file)))
                    .write_style(WriteStyle::Never);
            }
            Output::Null => {}
        }

        let template = self.handler.template.clone();
        builder.format(move |buf, record| {
            let asctime = buf.timestamp_millis().to_string();
            writeln!(buf, "{}", template.render(record, &asctime))
        });

        Ok(builder.build())
    }
}

fn section<'a>(config: &'a IniConfig, name: &str) -> Result<&'a Section, LoggingError> {
    config
        .lookup(name)
        .ok_or_else(|| LoggingError::MissingSection(name.to_string()))
}

fn require<'a>(section: &'a Section, option: &'static str) -> Result<&'a str, LoggingError> {
    section.get(option).ok_or_else(|| LoggingError::MissingOption {
        section: section.name().to_string(),
        option,
    })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Parses a level name or number. `NOTSET` (or `0`) yields `None`.
fn parse_level(value: &str, section: &Section) -> Result<Option<LevelFilter>, LoggingError> {
    let level = match value.trim().to_ascii_uppercase().as_str() {
        "NOTSET" => return Ok(None),
        "CRITICAL" | "FATAL" | "ERROR" => LevelFilter::Error,
        "WARNING" | "WARN" => LevelFilter::Warn,
        "INFO" => LevelFilter::Info,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        "OFF" => LevelFilter::Off,
        other => match other.parse::<u32>() {
            Ok(0) => return Ok(None),
            Ok(n) if n >= 40 => LevelFilter::Error,
            Ok(n) if n >= 30 => LevelFilter::Warn,
            Ok(n) if n >= 20 => LevelFilter::Info,
            Ok(n) if n >= 10 => LevelFilter::Debug,
            Ok(_) => LevelFilter::Trace,
            Err(_) => {
                return Err(LoggingError::InvalidLevel {
                    section: section.name().to_string(),
                    level: value.to_string(),
                })
            }
        },
    };
    Ok(Some(level))
}

fn parse_handler(config: &IniConfig, key: &str) -> Result<Handler, LoggingError> {
    let declared = split_list(require(section(config, "handlers")?, "keys")?);
    if !declared.iter().any(|d| d == key) {
        return Err(LoggingError::MissingSection(format!("handler_{key}")));
    }

    let handler = section(config, &format!("handler_{key}"))?;
    let class = require(handler, "class")?;
    let raw_args = handler.get_or("args", "()");
    let args = parse_args(raw_args).ok_or_else(|| invalid_args(key, raw_args))?;

    let output = match class.strip_prefix("logging.").unwrap_or(class) {
        "StreamHandler" => match args.first().map(String::as_str) {
            None | Some("sys.stderr") => Output::Stderr,
            Some("sys.stdout") => Output::Stdout,
            Some(_) => return Err(invalid_args(key, raw_args)),
        },
        "FileHandler" => {
            let path = args.first().ok_or_else(|| invalid_args(key, raw_args))?;
            let append = match args.get(1).map(String::as_str) {
                None | Some("a") => true,
                Some("w") => false,
                Some(_) => return Err(invalid_args(key, raw_args)),
            };
            Output::File {
                path: PathBuf::from(path),
                append,
            }
        }
        "NullHandler" => Output::Null,
        _ => return Err(LoggingError::UnsupportedHandler(class.to_string())),
    };

    let level = match handler.get("level") {
        Some(level) => parse_level(level, handler)?.unwrap_or(LevelFilter::Trace),
        None => LevelFilter::Trace,
    };

    let template = match handler.get("formatter").filter(|f| !f.is_empty()) {
        Some(formatter) => parse_formatter(config, formatter)?,
        None => Template::message_only(),
    };

    Ok(Handler {
        name: key.to_string(),
        output,
        level,
        template,
    })
}

fn parse_formatter(config: &IniConfig, key: &str) -> Result<Template, LoggingError> {
    let declared = split_list(require(section(config, "formatters")?, "keys")?);
    if !declared.iter().any(|d| d == key) {
        return Err(LoggingError::MissingSection(format!("formatter_{key}")));
    }

    let formatter = section(config, &format!("formatter_{key}"))?;
    Template::parse(formatter.get_or("format", DEFAULT_FORMAT))
}

/// Splits a handler argument tuple such as `('app.log', 'a')` into its
/// items, with quotes removed. Returns `None` if it is not parenthesized.
fn parse_args(args: &str) -> Option<Vec<String>> {
    let inner = args.trim().strip_prefix('(')?.strip_suffix(')')?;

    Some(
        inner
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| unquote(item).to_string())
            .collect(),
    )
}

fn unquote(item: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = item
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    item
}

fn invalid_args(handler: &str, args: &str) -> LoggingError {
    LoggingError::InvalidHandlerArgs {
        handler: handler.to_string(),
        args: args.to_string(),
    }
}
