use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Django files found in a candidate install directory, split by whether
/// deploying would replace them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjangoFileReport {
    pub will_overwrite: Vec<String>,
    pub will_preserve: Vec<String>,
}

/// Why a path cannot be used as an install target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Operator entered nothing
    EmptyInput,
    IsAFile { path: PathBuf },
    NotWritable { path: PathBuf },
    InvalidName { name: String },
    ReservedModuleName { name: String },
    DjangoProjectAbove { path: PathBuf, project_dir: PathBuf },
    DjangoFilesPresent { path: PathBuf, files: DjangoFileReport },
    CreationDeclined { path: PathBuf },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyInput => write!(f, "No directory given."),
            Rejection::IsAFile { path } => {
                write!(f, "{} is a file: can't install into a file.", path.display())
            }
            Rejection::NotWritable { path } => write!(
                f,
                "\nDirectory {} is not writable under your account.\n\
                 Please choose another location or fix the permissions.",
                path.display()
            ),
            Rejection::InvalidName { name } => write!(
                f,
                "\nDirectory {} is not acceptable for a Django project.\n\
                 Please use lower case characters, numbers and underscore.\n\
                 The first character cannot be a number.\n",
                name
            ),
            Rejection::ReservedModuleName { name } => write!(
                f,
                "\nDirectory name {} is taken by a Python module.\n\
                 Please choose another name for the project directory.\n",
                name
            ),
            Rejection::DjangoProjectAbove { path, project_dir } => write!(
                f,
                "\nDirectory {} is inside an existing Django project at {}.\n\
                 Installing Askbot there is not supported, please pick a location\n\
                 outside of that project.",
                path.display(),
                project_dir.display()
            ),
            Rejection::DjangoFilesPresent { path, files } => {
                write!(f, "\nDirectory {} contains files using Django", path.display())?;
                if files.will_overwrite.is_empty() {
                    writeln!(f, ":\n")?;
                } else {
                    writeln!(f, ",\nsome will be overwritten by the installation:\n")?;
                }
                for name in &files.will_overwrite {
                    writeln!(f, "* {} <- will overwrite", name)?;
                }
                for name in &files.will_preserve {
                    writeln!(f, "* {}", name)?;
                }
                writeln!(f)?;
                if files.will_overwrite.is_empty() {
                    writeln!(f, "None of the above files will be overwritten.\n")?;
                }
                write!(
                    f,
                    "If you wish to continue,\n\
                     enter ^C and repeat this current command with --force.\n"
                )
            }
            Rejection::CreationDeclined { path } => {
                write!(f, "Not creating {}.", path.display())
            }
        }
    }
}
