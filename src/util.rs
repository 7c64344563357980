use std::io::{BufRead, ErrorKind};
use std::path::Path;
use crate::error::{BingorunError, Result};

/// Folder `bingo` keeps its pinned modules in, relative to the project root.
pub const DEFAULT_BINGO_FOLDER: &str = ".bingo";
/// Manifest mapping `TOOL_NAME` to the pinned binary path.
pub const ENV_FILE_NAME: &str = "variables.env";
/// Makefile fragment holding one install recipe per tool.
pub const MAKE_FILE_NAME: &str = "Variables.mk";

/// Converts a kebab-case tool name into the upper-snake-case key used in
/// `variables.env` (e.g. `go-enum` becomes `GO_ENUM`).
///
/// Only ASCII `a`-`z` are upper-cased, everything else except `-` is kept as is.
pub fn kebab_to_upper_snake(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '-' => '_',
            'a'..='z' => c.to_ascii_uppercase(),
            _ => c,
        })
        .collect()
}

/// Strips trailing `/` and `\` from a folder setting such as `BINGO_DIR=.bingo/`.
pub fn trim_trailing_separators(value: &str) -> &str {
    value.trim_end_matches(['/', '\\'])
}

/// Splits `reader` into lines like [`BufRead::lines`], but replaces invalid
/// UTF-8 instead of failing, so one odd line doesn't hide the rest of the file.
/// A trailing `\r` is dropped.
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<String>> {
    reader.split(b'\n').map(|line| {
        line.map(|bytes| {
            let bytes = bytes.strip_suffix(b"\r").unwrap_or(&bytes[..]);
            String::from_utf8_lossy(bytes).into_owned()
        })
    })
}

/// What a `stat` on an expected file found.
#[derive(Debug, PartialEq, Eq)]
pub enum FileState {
    File,
    Dir,
    Missing,
}

/// Stats `path`, mapping "not found" to [`FileState::Missing`].
/// Other I/O errors are propagated.
pub fn file_state<P: AsRef<Path>>(path: P) -> Result<FileState> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(FileState::Dir),
        Ok(_) => Ok(FileState::File),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(FileState::Missing),
        Err(e) => Err(BingorunError::Io(e)),
    }
}
