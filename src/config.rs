// ⚙️ Configuration
//
// The only setting is where the registry document lives:
// explicit argument, else $SCHOOL_JOURNAL_FILE, else ./school_journal.json

use std::env;
use std::path::PathBuf;

pub const DATA_FILE_ENV: &str = "SCHOOL_JOURNAL_FILE";
pub const DEFAULT_DATA_FILE: &str = "school_journal.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub verbose: bool,
}

impl Config {
    /// Resolve from a CLI argument and the process environment
    pub fn resolve(file_arg: Option<&str>, verbose: bool) -> Self {
        Self::from_sources(file_arg, env::var(DATA_FILE_ENV).ok().as_deref(), verbose)
    }

    /// Precedence: argument, environment value, default
    pub fn from_sources(file_arg: Option<&str>, env_value: Option<&str>, verbose: bool) -> Self {
        let data_file = file_arg
            .or(env_value)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_DATA_FILE);

        Config {
            data_file: PathBuf::from(data_file),
            verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_wins() {
        let config = Config::from_sources(Some("a.json"), Some("b.json"), false);
        assert_eq!(config.data_file, PathBuf::from("a.json"));
    }

    #[test]
    fn test_env_then_default() {
        let config = Config::from_sources(None, Some("b.json"), true);
        assert_eq!(config.data_file, PathBuf::from("b.json"));
        assert!(config.verbose);

        let config = Config::from_sources(None, None, false);
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));

        let config = Config::from_sources(None, Some("  "), false);
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }
}
