//! `%(field)s`-style record templates, as used by `[formatter_*]` sections.

use log::{Level, Record};

use super::LoggingError;

/// The template used when a handler names no formatter.
pub const DEFAULT_FORMAT: &str = "%(message)s";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Asctime,
    Name,
    LevelName,
    LevelNo,
    Message,
    Module,
    FileName,
    PathName,
    LineNo,
    ThreadName,
    Process,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "asctime" => Self::Asctime,
            "name" => Self::Name,
            "levelname" => Self::LevelName,
            "levelno" => Self::LevelNo,
            "message" => Self::Message,
            "module" => Self::Module,
            "filename" => Self::FileName,
            "pathname" => Self::PathName,
            "lineno" => Self::LineNo,
            "threadName" => Self::ThreadName,
            "process" => Self::Process,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Conversion {
    left_align: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Conversion {
    fn apply(&self, value: &str, out: &mut String) {
        let value = match self.precision {
            Some(precision) => match value.char_indices().nth(precision) {
                Some((idx, _)) => &value[..idx],
                None => value,
            },
            None => value,
        };

        let pad = self
            .width
            .map_or(0, |width| width.saturating_sub(value.chars().count()));

        if !self.left_align {
            out.extend(std::iter::repeat(' ').take(pad));
        }
        out.push_str(value);
        if self.left_align {
            out.extend(std::iter::repeat(' ').take(pad));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Field(Field, Conversion),
}

/// A parsed record template such as
/// `%(asctime)s %(levelname)-5.5s [%(name)s] %(message)s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    pub fn parse(format: &str) -> Result<Self, LoggingError> {
        let invalid = |reason: &str| LoggingError::InvalidFormat {
            format: format.to_string(),
            reason: reason.to_string(),
        };

        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }

            match chars.next() {
                Some('%') => literal.push('%'),
                Some('(') => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some(')') => break,
                            Some(c) => name.push(c),
                            None => return Err(invalid("unclosed field name")),
                        }
                    }
                    let field = Field::parse(&name)
                        .ok_or_else(|| invalid(&format!("unknown field `{name}`")))?;

                    let mut conversion = Conversion::default();
                    if chars.peek() == Some(&'-') {
                        chars.next();
                        conversion.left_align = true;
                    }
                    conversion.width = take_number(&mut chars);
                    if chars.peek() == Some(&'.') {
                        chars.next();
                        conversion.precision = Some(take_number(&mut chars).unwrap_or(0));
                    }

                    match chars.next() {
                        Some('s' | 'd' | 'r') => {}
                        Some(c) => return Err(invalid(&format!("unsupported conversion `{c}`"))),
                        None => return Err(invalid("missing conversion type")),
                    }

                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Field(field, conversion));
                }
                _ => return Err(invalid("`%` must be followed by `(name)` or `%`")),
            }
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self { pieces })
    }

    /// The template for [`DEFAULT_FORMAT`].
    pub fn message_only() -> Self {
        Self {
            pieces: vec![Piece::Field(Field::Message, Conversion::default())],
        }
    }

    /// Renders `record`, using `asctime` for the `%(asctime)s` field.
    pub fn render(&self, record: &Record<'_>, asctime: &str) -> String {
        let mut out = String::new();

        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Field(field, conversion) => {
                    let value = field_value(*field, record, asctime);
                    conversion.apply(&value, &mut out);
                }
            }
        }

        out
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits.parse().ok()
}

fn field_value(field: Field, record: &Record<'_>, asctime: &str) -> String {
    match field {
        Field::Asctime => asctime.to_string(),
        Field::Name => record.target().to_string(),
        Field::LevelName => level_name(record.level()).to_string(),
        Field::LevelNo => level_number(record.level()).to_string(),
        Field::Message => record.args().to_string(),
        Field::Module => record.module_path().unwrap_or_default().to_string(),
        Field::FileName => record
            .file()
            .map(|path| path.rsplit(['/', '\\']).next().unwrap_or(path))
            .unwrap_or_default()
            .to_string(),
        Field::PathName => record.file().unwrap_or_default().to_string(),
        Field::LineNo => record.line().map(|l| l.to_string()).unwrap_or_default(),
        Field::ThreadName => std::thread::current()
            .name()
            .unwrap_or("unnamed")
            .to_string(),
        Field::Process => std::process::id().to_string(),
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn level_number(level: Level) -> u8 {
    match level {
        Level::Error => 40,
        Level::Warn => 30,
        Level::Info => 20,
        Level::Debug => 10,
        Level::Trace => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: &str, level: Level, target: &str) -> String {
        let template = Template::parse(format).unwrap();
        let rendered = template.render(
            &Record::builder()
                .args(format_args!("hello world"))
                .level(level)
                .target(target)
                .file(Some("src/db/pool.rs"))
                .line(Some(42))
                .build(),
            "2024-01-01T00:00:00.000Z",
        );
        rendered
    }

    #[test]
    fn test_fields() {
        assert_eq!(
            render(
                "%(asctime)s %(levelname)s [%(name)s] %(message)s",
                Level::Info,
                "app::db"
            ),
            "2024-01-01T00:00:00.000Z INFO [app::db] hello world"
        );
        assert_eq!(
            render("%(filename)s:%(lineno)d %(levelno)s", Level::Warn, "app"),
            "pool.rs:42 30"
        );
    }

    #[test]
    fn test_width_and_precision() {
        assert_eq!(render("%(levelname)-5.5s|", Level::Warn, "app"), "WARNI|");
        assert_eq!(render("%(levelname)-5.5s|", Level::Info, "app"), "INFO |");
        assert_eq!(render("%(levelname)7s|", Level::Debug, "app"), "  DEBUG|");
    }

    #[test]
    fn test_percent_escape() {
        assert_eq!(render("100%% %(message)s", Level::Info, "app"), "100% hello world");
    }

    #[test]
    fn test_default_format() {
        assert_eq!(render(DEFAULT_FORMAT, Level::Error, "app"), "hello world");
    }

    #[test]
    fn test_message_only_matches_default_format() {
        assert_eq!(Template::message_only(), Template::parse(DEFAULT_FORMAT).unwrap());
    }

    #[test]
    fn test_unknown_field() {
        let result = Template::parse("%(funcName)s");
        assert!(matches!(result, Err(LoggingError::InvalidFormat { .. })));
    }

    #[test]
    fn test_unclosed_field() {
        let result = Template::parse("%(message");
        assert!(matches!(result, Err(LoggingError::InvalidFormat { .. })));
    }

    #[test]
    fn test_stray_percent() {
        let result = Template::parse("50% done");
        assert!(matches!(result, Err(LoggingError::InvalidFormat { .. })));
    }
}
