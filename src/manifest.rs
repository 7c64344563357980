use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use crate::error::{BingorunError, Result};
use crate::util::lossy_lines;

/// Placeholder `bingo` writes in front of binary paths in `variables.env`.
pub const GOBIN_TOKEN: &str = "${GOBIN}";

/// Looks up `key` in a `variables.env` file and returns the binary path it
/// points to.
///
/// The first line starting with `KEY=` wins. The value is unquoted and a
/// leading `${GOBIN}` is replaced with `gobin`.
///
/// # Errors
///
/// - [`BingorunError::InvalidDefinition`] if the matching line has more than one `=`.
/// - [`BingorunError::VariableNotFound`] if no line defines `key`.
/// - I/O errors while reading the file.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use bingorun::read_tool_path;
///
/// let tool = read_tool_path(".bingo/variables.env", "GO_ENUM", Path::new("/home/me/go/bin")).unwrap();
/// println!("{}", tool.display());
/// ```
pub fn read_tool_path<P: AsRef<Path>>(env_file: P, key: &str, gobin: &Path) -> Result<PathBuf> {
    let reader = BufReader::new(File::open(env_file)?);
    let prefix = format!("{key}=");
    for line in lossy_lines(reader) {
        let line = line?;
        if line.starts_with(&prefix) {
            let value = parse_value(&line)?;
            return Ok(expand_gobin(value, gobin));
        }
    }
    Err(BingorunError::VariableNotFound(key.to_string()))
}

/// Splits a `KEY="value"` line and returns the unquoted value.
fn parse_value(line: &str) -> Result<&str> {
    let fields: Vec<&str> = line.split('=').collect();
    match fields.as_slice() {
        [_, value] => Ok(value.trim_matches('"')),
        _ => Err(BingorunError::InvalidDefinition(line.to_string())),
    }
}

fn expand_gobin(value: &str, gobin: &Path) -> PathBuf {
    match value.strip_prefix(GOBIN_TOKEN) {
        Some(rest) => {
            let mut path = gobin.as_os_str().to_os_string();
            path.push(rest);
            PathBuf::from(path)
        }
        None => PathBuf::from(value),
    }
}
