use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "auth.cfg";
pub const DEFAULT_DATABASE_FILE: &str = "us_libraries.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the seed files.
    pub data_dir: PathBuf,
    /// JSON store, or `:memory:`.
    pub database: PathBuf,
    pub cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("."),
            database: PathBuf::from(DEFAULT_DATABASE_FILE),
            cache_ttl: crate::cache::DEFAULT_TTL,
        }
    }
}

/// Values given on the command line; each one set wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub cache_ttl_seconds: Option<u64>,
}

impl Config {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Config> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents, &path.display().to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "config file {} not found, using defaults",
                    path.display()
                );
                Ok(Config::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Parses `key = value` lines. `#` and `!` start comment lines; `:` is
    /// accepted in place of `=`.
    pub fn parse(contents: &str, origin: &str) -> Result<Config> {
        let mut config = Config::default();
        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once(['=', ':']) else {
                return Err(Error::Config(format!(
                    "{}:{}: expected 'key = value', got '{}'",
                    origin,
                    idx + 1,
                    line
                )));
            };
            let (key, value) = (key.trim(), value.trim());
            match key {
                "data_dir" => config.data_dir = PathBuf::from(value),
                "database" => config.database = PathBuf::from(value),
                "cache_ttl_seconds" => {
                    config.cache_ttl = Duration::from_secs(value.parse::<u64>().map_err(|_| {
                        Error::Config(format!(
                            "{}:{}: cache_ttl_seconds must be a whole number of seconds, got '{}'",
                            origin,
                            idx + 1,
                            value
                        ))
                    })?)
                }
                other => debug!("ignoring config key '{}' in {}", other, origin),
            }
        }
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Config {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(database) = &overrides.database {
            self.database = database.clone();
        }
        if let Some(secs) = overrides.cache_ttl_seconds {
            self.cache_ttl = Duration::from_secs(secs);
        }
        self
    }
}
