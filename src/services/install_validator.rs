use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::install_target::{DjangoFileReport, Rejection};
use crate::services::console::{choice_dialog, Prompter, INVALID_INPUT};
use crate::services::scaffold_deployer::FILES_TO_CREATE;
use crate::utils::fs_utils::normalize_path;
use crate::utils::validation::{base_name, is_django_import, is_reserved_module_name, is_valid_project_dir_name};

pub const WHERE_TO_DEPLOY: &str = "Where to deploy (in which directory)?";

/// Decides whether a path can receive the Askbot scaffold
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallValidator {
    /// Accept directories that already hold Django files and skip the
    /// creation prompt
    pub force: bool,
}

impl InstallValidator {
    pub const fn new(force: bool) -> Self {
        Self { force }
    }

    /// Ask the operator for a directory, then validate it
    pub fn ask_install_directory(&self, prompter: &mut dyn Prompter) -> Option<PathBuf> {
        match prompter.ask(WHERE_TO_DEPLOY) {
            Ok(answer) => self.get_install_directory(answer.trim(), prompter),
            Err(e) => {
                tracing::warn!(error = %e, "could not read install directory");
                None
            }
        }
    }

    /// Validate `raw`, printing the reason on failure.
    ///
    /// Every rejection collapses into `None`; use [`Self::validate`] to
    /// learn the cause.
    pub fn get_install_directory(&self, raw: impl AsRef<Path>, prompter: &mut dyn Prompter) -> Option<PathBuf> {
        match self.validate(raw, prompter) {
            Ok(directory) => Some(directory),
            Err(rejection) => {
                tracing::info!(?rejection, "install directory rejected");
                match rejection {
                    Rejection::EmptyInput | Rejection::CreationDeclined { .. } => {}
                    other => println!("{}", other),
                }
                None
            }
        }
    }

    /// Check `raw` and return its absolute, normalized form.
    ///
    /// Surrounding whitespace is ignored when `raw` is valid UTF-8.
    pub fn validate(&self, raw: impl AsRef<Path>, prompter: &mut dyn Prompter) -> Result<PathBuf, Rejection> {
        let raw = raw.as_ref();
        let raw = raw.to_str().map_or(raw, |s| Path::new(s.trim()));
        if raw.as_os_str().is_empty() {
            return Err(Rejection::EmptyInput);
        }

        let directory = normalize_target(raw)?;

        if !can_create_path(&directory) {
            return Err(Rejection::NotWritable { path: directory });
        }

        if directory.exists() {
            if let Some(project_dir) = find_parent_dir_with_django(&directory) {
                return Err(Rejection::DjangoProjectAbove {
                    path: directory,
                    project_dir,
                });
            }

            let django_files = find_files_importing_from_django(&directory);
            if !django_files.is_empty() && !self.force {
                return Err(Rejection::DjangoFilesPresent {
                    files: classify_django_files(&django_files),
                    path: directory,
                });
            }
        } else if !self.force {
            let question = format!("Path {} does not yet exist. Create new directory?", directory.display());
            match choice_dialog(prompter, &question, &["yes", "no"], INVALID_INPUT) {
                Ok("yes") => {}
                Ok(_) => return Err(Rejection::CreationDeclined { path: directory }),
                Err(e) => {
                    tracing::warn!(error = %e, "no answer to the creation prompt");
                    return Err(Rejection::CreationDeclined { path: directory });
                }
            }
        }

        let name = base_name(&directory);
        if dir_taken_by_python_module(&directory) {
            return Err(Rejection::ReservedModuleName { name });
        }
        if dir_name_unacceptable_for_django_project(&directory) {
            return Err(Rejection::InvalidName { name });
        }

        tracing::debug!(path = %directory.display(), "install directory accepted");
        Ok(directory)
    }
}

fn normalize_target(raw: &Path) -> Result<PathBuf, Rejection> {
    let directory = normalize_path(raw).map_err(|e| {
        tracing::warn!(error = %e, "cannot resolve the current directory");
        Rejection::NotWritable { path: raw.to_path_buf() }
    })?;
    if directory.is_file() {
        return Err(Rejection::IsAFile { path: directory });
    }
    Ok(directory)
}

/// Absolute, normalized form of `raw`; `None` (with a message) for files
pub fn clean_directory(raw: impl AsRef<Path>) -> Option<PathBuf> {
    match normalize_target(raw.as_ref()) {
        Ok(directory) => Some(directory),
        Err(rejection) => {
            println!("{}", rejection);
            None
        }
    }
}

/// Split a non-existing path into its nearest existing ancestor and the
/// remaining tail. `None` when `path` exists or nothing above it does.
pub fn split_at_break_point(path: &Path) -> Option<(PathBuf, PathBuf)> {
    if path.exists() {
        return None;
    }
    let head = path.ancestors().skip(1).find(|ancestor| ancestor.exists())?;
    let tail = path.strip_prefix(head).ok()?;
    Some((head.to_path_buf(), tail.to_path_buf()))
}

/// Probe writability by creating and removing a temp file in `directory`
pub fn directory_is_writable(directory: &Path) -> bool {
    let probe = tempfile::Builder::new()
        .prefix(".askbot-write-test")
        .tempfile_in(directory);
    match probe {
        Ok(file) => {
            debug_assert_eq!(file.path().parent(), Some(directory));
            file.close().is_ok()
        }
        Err(e) => {
            tracing::debug!(path = %directory.display(), error = %e, "writability probe failed");
            false
        }
    }
}

/// True if a directory can be created at (or already exists at) `directory`
pub fn can_create_path(directory: &Path) -> bool {
    if directory.exists() {
        return directory.is_dir() && directory_is_writable(directory);
    }
    match split_at_break_point(directory) {
        Some((head, _)) => head.is_dir() && directory_is_writable(&head),
        None => false,
    }
}

/// Immediate `*.py` files of `directory` with a line importing django
pub fn find_files_importing_from_django(directory: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "py") && path.is_file())
        .filter(|path| match fs::read(path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).lines().any(is_django_import),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
                false
            }
        })
        .collect();
    found.sort();
    found
}

/// First directory above `directory` that holds Django files
pub fn find_parent_dir_with_django(directory: &Path) -> Option<PathBuf> {
    directory
        .ancestors()
        .skip(1)
        .find(|parent| !find_files_importing_from_django(parent).is_empty())
        .map(Path::to_path_buf)
}

/// True when no directory above `directory` contains a Django project
pub fn path_is_clean_for_django(directory: &Path) -> bool {
    find_parent_dir_with_django(directory).is_none()
}

pub fn dir_name_unacceptable_for_django_project(directory: &Path) -> bool {
    !is_valid_project_dir_name(&base_name(directory))
}

pub fn dir_taken_by_python_module(directory: &Path) -> bool {
    is_reserved_module_name(&base_name(directory))
}

/// Split Django files into those the scaffold replaces and those it keeps
pub fn classify_django_files(files: &[PathBuf]) -> DjangoFileReport {
    let names: BTreeSet<String> = files.iter().map(|path| base_name(path)).collect();
    let (will_overwrite, will_preserve): (Vec<String>, Vec<String>) = names
        .into_iter()
        .partition(|name| FILES_TO_CREATE.contains(&name.as_str()));
    DjangoFileReport {
        will_overwrite,
        will_preserve,
    }
}
