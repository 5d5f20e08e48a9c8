// File system utilities

use anyhow::{bail, Context};
use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};

/// Equivalent to `mkdir -p`; fails if `path` exists and is not a directory
pub fn create_path(path: &Path) -> anyhow::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        bail!("expected a directory or a non-existing path: {}", path.display());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    Ok(())
}

/// Create the file if missing, leave contents alone otherwise
pub fn touch(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.set_modified(std::time::SystemTime::now())?;
    Ok(())
}

pub fn copy_dir_all(src: &Path, dst: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create {}", dst.display()))?;
    for entry in fs::read_dir(src).with_context(|| format!("failed to read {}", src.display()))? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let to = dst.join(entry.file_name());
        if ty.is_dir() {
            copy_dir_all(&entry.path(), &to)?;
        } else {
            fs::copy(entry.path(), &to)
                .with_context(|| format!("failed to copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}

/// Lexically normalize `path` against the current directory.
///
/// Does not touch the filesystem, so symlinks are left unresolved and the
/// path need not exist.
pub fn normalize_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// True when both paths resolve to the same location
pub fn same_path(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => match (normalize_path(a), normalize_path(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        },
    }
}
