//! Error types for bingorun.
//!
//! Every failure of the resolve / install / launch pipeline is fatal, so each
//! cause gets its own variant and message instead of a retry path.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BingorunError {
    #[error("undefined path")]
    UndefinedPath,

    /// `$GOFILE` points to a file that does not exist.
    #[error("file {} not found", .0.display())]
    SourceFileNotFound(PathBuf),

    #[error("bingo folder {folder} not found in {} or any parent directory", start.display())]
    BingoFolderNotFound { folder: String, start: PathBuf },

    #[error("invalid bingo folder, it's not a folder: {}", .0.display())]
    BingoFolderNotADir(PathBuf),

    #[error("bingo environment file not found")]
    EnvFileNotFound,

    #[error("invalid bingo environment file, it's a folder")]
    EnvFileIsDir,

    #[error("bingo make file not found")]
    MakeFileNotFound,

    #[error("invalid bingo make file, it's a folder")]
    MakeFileIsDir,

    #[error("invalid bingo environment variable definition: {0}")]
    InvalidDefinition(String),

    #[error("bingo environment variable not found: {0}")]
    VariableNotFound(String),

    #[error("invalid tool, it's a folder: {}", .0.display())]
    ToolIsDir(PathBuf),

    #[error("install {0:?} command not found")]
    InstallCommandNotFound(String),

    #[error("install command failed ({status}): {command}")]
    InstallFailed { command: String, status: ExitStatus },

    #[error("tool {} not found after install", .0.display())]
    ToolMissingAfterInstall(PathBuf),

    /// Neither a workspace nor a module descriptor was reported by the build tool.
    #[error("project root not found: no go.work or go.mod for {}", .0.display())]
    ProjectRootNotFound(PathBuf),

    #[error("`{command}` failed: {stderr}")]
    BuildToolQuery { command: String, stderr: String },

    #[error("invalid BINGORUN_ROOT value {0:?}, expected \"upward\" or \"module\"")]
    InvalidStrategy(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, BingorunError>;
