use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::Command;
use log::{debug, info};
use regex::Regex;
use crate::config::Config;
use crate::error::{BingorunError, Result};
use crate::util::{file_state, lossy_lines, FileState, MAKE_FILE_NAME};

/// Leading characters of a recipe line that are not part of the shell command.
pub const INSTALL_CMD_REMOVE_PREFIX: &str = "\t@";
/// Prefix of the `Variables.mk` line that builds a tool.
pub const INSTALL_CMD_PREFIX: &str = "\t@cd $(BINGO_DIR) &&";

/// Outcome of [`install_tool_if_missing`].
#[derive(Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyInstalled,
    Installed,
}

/// Makes sure `tool` exists, running its install recipe from
/// `<bingo>/Variables.mk` if it doesn't.
///
/// `bingo` is the folder holding `variables.env`. When `tool` is already a
/// regular file the recipe file is not touched.
///
/// # Errors
///
/// - [`BingorunError::ToolIsDir`] if `tool` is a directory.
/// - [`BingorunError::InstallCommandNotFound`] if no recipe names the tool.
/// - [`BingorunError::InstallFailed`] if the recipe exits non-zero.
/// - [`BingorunError::ToolMissingAfterInstall`] if the recipe succeeded but
///   `tool` still isn't there.
pub fn install_tool_if_missing(bingo: &Path, tool: &Path, config: &Config) -> Result<InstallOutcome> {
    match file_state(tool)? {
        FileState::File => return Ok(InstallOutcome::AlreadyInstalled),
        FileState::Dir => return Err(BingorunError::ToolIsDir(tool.to_path_buf())),
        FileState::Missing => {}
    }
    let tool_name = tool
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or(BingorunError::UndefinedPath)?;
    info!("{} is missing, installing {}", tool.display(), tool_name);

    let mk_file = find_make_file(bingo)?;
    let template = read_install_command(&mk_file, &tool_name)?;
    let command = render_install_command(&template, bingo, config);
    run_install_command(&command)?;

    match file_state(tool)? {
        FileState::File => Ok(InstallOutcome::Installed),
        FileState::Dir => Err(BingorunError::ToolIsDir(tool.to_path_buf())),
        FileState::Missing => Err(BingorunError::ToolMissingAfterInstall(tool.to_path_buf())),
    }
}

/// Returns `<bingo>/Variables.mk`, which must be a regular file.
pub fn find_make_file(bingo: &Path) -> Result<PathBuf> {
    let mk_file = bingo.join(MAKE_FILE_NAME);
    match file_state(&mk_file)? {
        FileState::File => Ok(mk_file),
        FileState::Dir => Err(BingorunError::MakeFileIsDir),
        FileState::Missing => Err(BingorunError::MakeFileNotFound),
    }
}

/// Finds the install recipe for `tool_name` and returns it without the
/// leading `\t@`.
///
/// A line matches when it starts with [`INSTALL_CMD_PREFIX`] and mentions
/// `tool_name` as a whole word: preceded by the line start, whitespace, `/`,
/// `=` or a quote, and followed by the line end, whitespace or a quote. So
/// `lint-v1.0.0` does not match a recipe for `golangci-lint-v1.0.0`.
pub fn read_install_command<P: AsRef<Path>>(mk_file: P, tool_name: &str) -> Result<String> {
    let re = Regex::new(&format!(
        r#"(?:^|[\s/="']){}(?:$|[\s"'])"#,
        regex::escape(tool_name)
    ))?;
    let reader = BufReader::new(File::open(mk_file)?);
    for line in lossy_lines(reader) {
        let line = line?;
        if line.starts_with(INSTALL_CMD_PREFIX) && re.is_match(&line) {
            return Ok(line.replacen(INSTALL_CMD_REMOVE_PREFIX, "", 1));
        }
    }
    Err(BingorunError::InstallCommandNotFound(tool_name.to_string()))
}

/// Substitutes `$(BINGO_DIR)`, `$(GOBIN)` and `$(GO)` in a recipe.
pub fn render_install_command(template: &str, bingo: &Path, config: &Config) -> String {
    template
        .replace("$(BINGO_DIR)", &bingo.to_string_lossy())
        .replace("$(GOBIN)", &config.gobin.to_string_lossy())
        .replace("$(GO)", &config.go_cmd)
}

/// Runs `command` through `sh -c`, inheriting stdio.
pub fn run_install_command(command: &str) -> Result<()> {
    debug!("running install command: {}", command);
    let status = Command::new("sh").arg("-c").arg(command).status()?;
    if !status.success() {
        return Err(BingorunError::InstallFailed {
            command: command.to_string(),
            status,
        });
    }
    Ok(())
}
