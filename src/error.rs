use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io {
        path: Option<PathBuf>,
        source: io::Error,
    },
    /// A seed file record that could not be turned into a row.
    Parse {
        file: String,
        line: usize,
        message: String,
    },
    TableExists(String),
    UnknownTable(String),
    UnknownColumn(String),
    AmbiguousColumn(String),
    ColumnCount {
        table: String,
        expected: usize,
        got: usize,
    },
    TypeMismatch {
        column: String,
        expected: String,
        value: String,
    },
    Storage(String),
    Config(String),
    Argument(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: Some(path.into()),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io {
                path: Some(path),
                source,
            } => write!(f, "I/O error on '{}': {}", path.display(), source),
            Error::Io { path: None, source } => write!(f, "I/O error: {}", source),
            Error::Parse {
                file,
                line,
                message,
            } => write!(f, "{}:{}: {}", file, line, message),
            Error::TableExists(name) => write!(f, "Table '{}' already exists", name),
            Error::UnknownTable(name) => write!(f, "Table '{}' does not exist", name),
            Error::UnknownColumn(name) => write!(f, "Column '{}' not found", name),
            Error::AmbiguousColumn(name) => write!(f, "Column '{}' is ambiguous", name),
            Error::ColumnCount {
                table,
                expected,
                got,
            } => write!(
                f,
                "Column count mismatch for '{}': expected {}, got {}",
                table, expected, got
            ),
            Error::TypeMismatch {
                column,
                expected,
                value,
            } => write!(
                f,
                "Column '{}' expects {}, got '{}'",
                column, expected, value
            ),
            Error::Storage(msg) => write!(f, "Storage error: {}", msg),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
            Error::Argument(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io {
            path: None,
            source: e,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Storage(e.to_string())
    }
}
