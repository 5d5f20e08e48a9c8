use std::fs;
use std::path::{Path, PathBuf};

use crate::models::deploy_report::{DeployReport, SettingsOutcome};
use crate::models::template_context::TemplateContext;
use crate::utils::error::{Result, SetupError};
use crate::utils::fs_utils::{copy_dir_all, create_path, same_path, touch};

/// Bootstrap files copied from `setup_templates/` into a new project
pub const FILES_TO_CREATE: &[&str] = &["__init__.py", "manage.py", "urls.py", "django.wsgi", "celery_app.py"];
/// Files never replaced once present
pub const BLANK_FILES: &[&str] = &["__init__.py", "manage.py"];
/// File replaced on every deploy
pub const FORCE_OVERWRITE_FILE: &str = "urls.py";
pub const LOG_DIR_NAME: &str = "log";
pub const LOG_FILE_NAME: &str = "askbot.log";
pub const SETTINGS_FILE_NAME: &str = "settings.py";
pub const SETTINGS_TEMPLATE_NAME: &str = "settings.py.tera";
pub const SETUP_TEMPLATES_DIR: &str = "setup_templates";
/// Directories copied into `<install_dir>/askbot/`
pub const COPY_DIRS: &[&str] = &["doc", "cron", "upfiles"];
pub const APP_DIR_NAME: &str = "askbot";

const DEFAULT_SETTINGS_TEMPLATE: &str = include_str!("../../templates/settings.py.tera");

/// Askbot source tree the scaffold is copied from
#[derive(Debug, Clone)]
pub struct ScaffoldSource {
    root: PathBuf,
}

impl ScaffoldSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn setup_templates_dir(&self) -> PathBuf {
        self.root.join(SETUP_TEMPLATES_DIR)
    }

    pub fn template_file(&self, name: &str) -> PathBuf {
        self.setup_templates_dir().join(name)
    }

    pub fn copy_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Settings template shipped with the source tree, or the built-in one
    pub fn settings_template(&self) -> Result<String> {
        let path = self.template_file(SETTINGS_TEMPLATE_NAME);
        if path.is_file() {
            return Ok(fs::read_to_string(&path)?);
        }
        tracing::debug!(path = %path.display(), "no settings template in source, using built-in");
        Ok(DEFAULT_SETTINGS_TEMPLATE.to_string())
    }
}

/// Copies the Askbot scaffold into a validated install directory
#[derive(Debug, Clone)]
pub struct ScaffoldDeployer {
    source: ScaffoldSource,
    verbosity: u8,
}

impl ScaffoldDeployer {
    pub const fn new(source: ScaffoldSource) -> Self {
        Self { source, verbosity: 1 }
    }

    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    fn say(&self, message: impl AsRef<str>) {
        if self.verbosity >= 1 {
            println!("{}", message.as_ref());
        }
    }

    /// Populate `install_dir`.
    ///
    /// Safe to re-run: existing files and directories are kept, except for
    /// [`FORCE_OVERWRITE_FILE`].
    pub fn deploy_into(&self, install_dir: &Path, new_project: bool, context: &TemplateContext) -> Result<DeployReport> {
        create_path(install_dir)?;
        let mut report = DeployReport::new(install_dir.to_path_buf());

        if new_project {
            self.copy_bootstrap_files(install_dir, &mut report)?;

            let log_dir = install_dir.join(LOG_DIR_NAME);
            create_path(&log_dir)?;
            let log_file = log_dir.join(LOG_FILE_NAME);
            touch(&log_file)?;
            report.log_file = Some(log_file);

            report.settings = self.create_settings(install_dir, context)?;
        }
        self.say("");

        self.copy_directories(install_dir, &mut report)?;
        self.say("");

        tracing::info!(
            install_dir = %install_dir.display(),
            copied = report.files_copied.len(),
            skipped = report.files_skipped.len(),
            dirs = report.dirs_copied.len(),
            "deploy finished"
        );
        Ok(report)
    }

    fn copy_bootstrap_files(&self, install_dir: &Path, report: &mut DeployReport) -> Result<()> {
        self.say("Copying files: ");
        for &file_name in FILES_TO_CREATE {
            let src_file = self.source.template_file(file_name);
            let dst_file = install_dir.join(file_name);
            self.say(format!("* {}", file_name));

            if dst_file.exists() {
                if BLANK_FILES.contains(&file_name) {
                    report.files_skipped.push(file_name.to_string());
                    continue;
                }
                if file_name == FORCE_OVERWRITE_FILE {
                    self.say("  ^^^ forced overwrite!");
                    copy_template_file(&src_file, &dst_file)?;
                    report.files_overwritten.push(file_name.to_string());
                } else {
                    self.say(format!(
                        "  ^^^ you already have one, please add contents of {}",
                        src_file.display()
                    ));
                    report.files_skipped.push(file_name.to_string());
                }
                continue;
            }

            copy_template_file(&src_file, &dst_file)?;
            report.files_copied.push(file_name.to_string());
        }
        Ok(())
    }

    fn create_settings(&self, install_dir: &Path, context: &TemplateContext) -> Result<SettingsOutcome> {
        self.say("Creating settings file");
        let settings_path = install_dir.join(SETTINGS_FILE_NAME);
        if settings_path.exists() {
            self.say("* you already have a settings file please merge the contents");
            return Ok(SettingsOutcome::KeptExisting);
        }

        let mut contents = self.render_settings(install_dir, context)?;
        let mut outcome = SettingsOutcome::Created;
        if let Some(local_settings) = context.local_settings().filter(|path| path.is_file()) {
            contents.push('\n');
            contents.push_str(&fs::read_to_string(&local_settings)?);
            outcome = SettingsOutcome::CreatedWithLocalSettings;
        }
        fs::write(&settings_path, contents)?;

        self.say("settings file created");
        Ok(outcome)
    }

    /// Render the settings template against `context`
    pub fn render_settings(&self, install_dir: &Path, context: &TemplateContext) -> Result<String> {
        let template = self.source.settings_template()?;

        let mut context = context.clone();
        if context.get("install_dir").is_none() {
            context.insert("install_dir", install_dir.display().to_string());
        }
        if context.get("generated_at").is_none() {
            context.insert(
                "generated_at",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            );
        }

        Ok(tera::Tera::one_off(&template, &context.to_tera(), false)?)
    }

    fn copy_directories(&self, install_dir: &Path, report: &mut DeployReport) -> Result<()> {
        let app_dir = install_dir.join(APP_DIR_NAME);

        self.say("copying directories: ");
        for &dir_name in COPY_DIRS {
            let src_dir = self.source.copy_dir(dir_name);
            let dst_dir = app_dir.join(dir_name);
            // deploying into the source tree itself
            if same_path(&src_dir, &dst_dir) {
                continue;
            }

            self.say(format!("* {}", dir_name));
            if dst_dir.exists() {
                self.say("  ^^^ already exists - skipped");
                report.dirs_skipped.push(dir_name.to_string());
                continue;
            }
            if !src_dir.is_dir() {
                return Err(SetupError::TemplateError(format!(
                    "source directory {} not found",
                    src_dir.display()
                )));
            }

            copy_dir_all(&src_dir, &dst_dir)?;
            report.dirs_copied.push(dir_name.to_string());
        }
        Ok(())
    }
}

fn copy_template_file(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_file() {
        return Err(SetupError::TemplateError(format!(
            "template file {} not found",
            src.display()
        )));
    }
    fs::copy(src, dst)?;
    Ok(())
}
