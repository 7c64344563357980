use std::path::PathBuf;
use directories::BaseDirs;
use crate::error::{BingorunError, Result};
use crate::util::{trim_trailing_separators, DEFAULT_BINGO_FOLDER};

/// How the project's bingo folder is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootStrategy {
    /// Walk up from the working directory (or `$GOFILE`'s directory).
    #[default]
    Upward,
    /// Ask `go env` for the workspace / module file and use its directory.
    Module,
}

impl RootStrategy {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "upward" => Ok(RootStrategy::Upward),
            "module" => Ok(RootStrategy::Module),
            other => Err(BingorunError::InvalidStrategy(other.to_string())),
        }
    }
}

/// Everything a run needs from the environment, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory pinned binaries live in (`${GOBIN}` / `$(GOBIN)`).
    pub gobin: PathBuf,
    /// Name of (or path to) the bingo folder.
    pub bingo_dir: PathBuf,
    /// File that invoked us through `go generate`, if any.
    pub current_file: Option<PathBuf>,
    /// Go executable substituted for `$(GO)`: `$BINGORUN_GOCMD`, then
    /// `$MAGEFILE_GOCMD`, then `go`.
    pub go_cmd: String,
    pub strategy: RootStrategy,
    pub working_dir: PathBuf,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Config> {
        let working_dir = std::env::current_dir()?;
        Config::from_lookup(|key| std::env::var(key).ok(), working_dir)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    /// Empty values count as unset, like in a shell.
    pub fn from_lookup<F>(lookup: F, working_dir: PathBuf) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let gobin = match var("GOBIN") {
            Some(gobin) => PathBuf::from(gobin),
            None => default_gobin(var("GOPATH")),
        };

        let bingo_dir = var("BINGO_DIR")
            .map(|dir| trim_trailing_separators(&dir).to_string())
            .filter(|dir| !dir.is_empty())
            .unwrap_or_else(|| DEFAULT_BINGO_FOLDER.to_string());

        let strategy = match var("BINGORUN_ROOT") {
            Some(value) => RootStrategy::parse(&value)?,
            None => RootStrategy::default(),
        };

        Ok(Config {
            gobin,
            bingo_dir: PathBuf::from(bingo_dir),
            current_file: var("GOFILE").map(PathBuf::from),
            go_cmd: var("BINGORUN_GOCMD")
                .or_else(|| var("MAGEFILE_GOCMD"))
                .unwrap_or_else(|| "go".to_string()),
            strategy,
            working_dir,
        })
    }
}

/// `$GOPATH/bin` for the first `GOPATH` entry, or `~/go/bin` like the go tool.
fn default_gobin(gopath: Option<String>) -> PathBuf {
    if let Some(gopath) = gopath {
        if let Some(first) = std::env::split_paths(&gopath).next() {
            return first.join("bin");
        }
    }
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join("go").join("bin"),
        None => PathBuf::from("go").join("bin"),
    }
}
