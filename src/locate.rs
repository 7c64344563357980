//! Finding the project's bingo folder and its manifest.

use std::path::{Path, PathBuf};
use std::process::Command;
use log::debug;
use crate::config::{Config, RootStrategy};
use crate::error::{BingorunError, Result};
use crate::util::{file_state, FileState, ENV_FILE_NAME};

/// Returns the path to `variables.env` inside the bingo folder, using the
/// strategy selected in `config`.
pub fn find_env_file(config: &Config) -> Result<PathBuf> {
    let bingo = match config.strategy {
        RootStrategy::Upward => {
            let start = start_dir(config)?;
            find_bingo_folder_upward(&start, &config.bingo_dir)?
        }
        RootStrategy::Module => {
            let root = module_root(config)?;
            bingo_folder_in(&root, &config.bingo_dir)?
        }
    };
    debug!("using bingo folder {}", bingo.display());
    env_file_in(&bingo)
}

/// Directory the upward scan starts from: the directory of `$GOFILE` when
/// running under `go generate`, the working directory otherwise.
pub fn start_dir(config: &Config) -> Result<PathBuf> {
    let Some(file) = &config.current_file else {
        return Ok(config.working_dir.clone());
    };
    let file = config.working_dir.join(file);
    match file_state(&file)? {
        FileState::Missing => Err(BingorunError::SourceFileNotFound(file)),
        _ => Ok(file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.working_dir.clone())),
    }
}

/// Walks from `start` towards the filesystem root until `<dir>/<folder>` exists.
pub fn find_bingo_folder_upward(start: &Path, folder: &Path) -> Result<PathBuf> {
    if start.as_os_str().is_empty() {
        return Err(BingorunError::UndefinedPath);
    }
    let start = start.canonicalize()?;
    let mut dir = start.as_path();
    loop {
        let candidate = dir.join(folder);
        match file_state(&candidate)? {
            FileState::Dir => return Ok(candidate),
            FileState::File => return Err(BingorunError::BingoFolderNotADir(candidate)),
            FileState::Missing => {}
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(BingorunError::BingoFolderNotFound {
                    folder: folder.display().to_string(),
                    start,
                });
            }
        }
    }
}

/// Requires `<root>/<folder>` to be a directory, without scanning upwards.
pub fn bingo_folder_in(root: &Path, folder: &Path) -> Result<PathBuf> {
    let candidate = root.join(folder);
    match file_state(&candidate)? {
        FileState::Dir => Ok(candidate),
        FileState::File => Err(BingorunError::BingoFolderNotADir(candidate)),
        FileState::Missing => Err(BingorunError::BingoFolderNotFound {
            folder: folder.display().to_string(),
            start: root.to_path_buf(),
        }),
    }
}

/// Returns `<bingo>/variables.env`, which must be a regular file.
pub fn env_file_in(bingo: &Path) -> Result<PathBuf> {
    let env_file = bingo.join(ENV_FILE_NAME);
    match file_state(&env_file)? {
        FileState::File => Ok(env_file),
        FileState::Dir => Err(BingorunError::EnvFileIsDir),
        FileState::Missing => Err(BingorunError::EnvFileNotFound),
    }
}

/// Project root as reported by the go tool: the `go.work` directory if a
/// workspace is active, otherwise the `go.mod` directory.
pub fn module_root(config: &Config) -> Result<PathBuf> {
    let gowork = go_env(config, "GOWORK")?;
    let gomod = match descriptor(&gowork) {
        Some(_) => String::new(),
        None => go_env(config, "GOMOD")?,
    };
    root_from_descriptors(&gowork, &gomod)
        .ok_or_else(|| BingorunError::ProjectRootNotFound(config.working_dir.clone()))
}

/// Picks the workspace descriptor over the module descriptor and returns the
/// directory containing it.
pub fn root_from_descriptors(gowork: &str, gomod: &str) -> Option<PathBuf> {
    descriptor(gowork)
        .or_else(|| descriptor(gomod))
        .and_then(|file| file.parent().map(Path::to_path_buf))
}

/// `go env` prints an empty line, `off` or the null device when there is no
/// workspace / module.
fn descriptor(value: &str) -> Option<PathBuf> {
    match value.trim() {
        "" | "off" | "/dev/null" | "NUL" => None,
        path => Some(PathBuf::from(path)),
    }
}

fn go_env(config: &Config, key: &str) -> Result<String> {
    debug!("querying {} env {}", config.go_cmd, key);
    let output = Command::new(&config.go_cmd)
        .args(["env", key])
        .current_dir(&config.working_dir)
        .output()?;
    if !output.status.success() {
        return Err(BingorunError::BuildToolQuery {
            command: format!("{} env {}", config.go_cmd, key),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> Config {
        Config::from_lookup(|_| None, dir.to_path_buf()).unwrap()
    }

    #[test]
    fn test_find_bingo_folder_in_start_dir() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".bingo")).unwrap();

        let found = find_bingo_folder_upward(dir.path(), Path::new(".bingo")).unwrap();
        assert_eq!(found, dir.path().canonicalize().unwrap().join(".bingo"));
    }

    #[test]
    fn test_find_bingo_folder_in_parent() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".bingo")).unwrap();
        let nested = dir.path().join("cmd").join("server");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_bingo_folder_upward(&nested, Path::new(".bingo")).unwrap();
        assert_eq!(found, dir.path().canonicalize().unwrap().join(".bingo"));
    }

    #[test]
    fn test_find_bingo_folder_stops_at_root() {
        let dir = tempdir().unwrap();
        let folder = Path::new(".bingo-folder-that-does-not-exist-anywhere");

        let err = find_bingo_folder_upward(dir.path(), folder).unwrap_err();
        assert!(matches!(err, BingorunError::BingoFolderNotFound { .. }));
    }

    #[test]
    fn test_find_bingo_folder_rejects_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(".bingo"), "").unwrap();

        let err = find_bingo_folder_upward(dir.path(), Path::new(".bingo")).unwrap_err();
        assert!(matches!(err, BingorunError::BingoFolderNotADir(_)));
    }

    #[test]
    fn test_find_bingo_folder_empty_start() {
        let err = find_bingo_folder_upward(Path::new(""), Path::new(".bingo")).unwrap_err();
        assert!(matches!(err, BingorunError::UndefinedPath));
    }

    #[test]
    fn test_start_dir_uses_current_file() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("pkg");
        std::fs::create_dir(&pkg).unwrap();
        std::fs::write(pkg.join("enum.go"), "package pkg").unwrap();

        let mut config = config_in(dir.path());
        assert_eq!(start_dir(&config).unwrap(), dir.path());

        config.current_file = Some(PathBuf::from("pkg/enum.go"));
        assert_eq!(start_dir(&config).unwrap(), pkg);

        config.current_file = Some(PathBuf::from("pkg/missing.go"));
        let err = start_dir(&config).unwrap_err();
        assert!(matches!(err, BingorunError::SourceFileNotFound(_)));
    }

    #[test]
    fn test_env_file_in() {
        let dir = tempdir().unwrap();
        assert!(matches!(env_file_in(dir.path()).unwrap_err(), BingorunError::EnvFileNotFound));

        std::fs::create_dir(dir.path().join("variables.env")).unwrap();
        assert!(matches!(env_file_in(dir.path()).unwrap_err(), BingorunError::EnvFileIsDir));
    }

    #[test]
    fn test_find_env_file_upward() {
        let dir = tempdir().unwrap();
        let bingo = dir.path().join(".bingo");
        std::fs::create_dir(&bingo).unwrap();
        std::fs::write(bingo.join("variables.env"), "").unwrap();
        let nested = dir.path().join("internal");
        std::fs::create_dir(&nested).unwrap();

        let env_file = find_env_file(&config_in(&nested)).unwrap();
        assert_eq!(env_file, bingo.canonicalize().unwrap().join("variables.env"));
    }

    #[test]
    fn test_bingo_folder_in_does_not_scan_upwards() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".bingo")).unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir(&nested).unwrap();

        assert!(bingo_folder_in(dir.path(), Path::new(".bingo")).is_ok());
        let err = bingo_folder_in(&nested, Path::new(".bingo")).unwrap_err();
        assert!(matches!(err, BingorunError::BingoFolderNotFound { .. }));
    }

    #[test]
    fn test_root_from_descriptors() {
        assert_eq!(
            root_from_descriptors("/ws/go.work", "/ws/mod/go.mod"),
            Some(PathBuf::from("/ws"))
        );
        assert_eq!(
            root_from_descriptors("", "/ws/mod/go.mod"),
            Some(PathBuf::from("/ws/mod"))
        );
        assert_eq!(
            root_from_descriptors("off", "/ws/mod/go.mod\n"),
            Some(PathBuf::from("/ws/mod"))
        );
        assert_eq!(root_from_descriptors("", "/dev/null"), None);
        assert_eq!(root_from_descriptors("", ""), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_module_root_with_fake_go() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let go = dir.path().join("fake-go");
        let script = format!(
            "#!/bin/sh\nif [ \"$2\" = GOMOD ]; then echo {}/go.mod; fi\n",
            dir.path().display()
        );
        std::fs::write(&go, script).unwrap();
        std::fs::set_permissions(&go, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut config = config_in(dir.path());
        config.go_cmd = go.to_string_lossy().to_string();
        assert_eq!(module_root(&config).unwrap(), dir.path());
    }
}
