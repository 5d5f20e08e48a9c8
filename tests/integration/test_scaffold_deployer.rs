// Integration tests for deploying the scaffold into a target directory

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use askbot_setup::models::deploy_report::SettingsOutcome;
use askbot_setup::models::template_context::TemplateContext;
use askbot_setup::services::scaffold_deployer::{
    ScaffoldDeployer, ScaffoldSource, APP_DIR_NAME, FILES_TO_CREATE, SETTINGS_TEMPLATE_NAME,
};

use crate::common::{make_source_tree, snapshot};

fn deployer(root: &Path) -> ScaffoldDeployer {
    ScaffoldDeployer::new(ScaffoldSource::new(make_source_tree(root))).with_verbosity(0)
}

#[test]
fn test_fresh_deploy_creates_full_layout() {
    let temp = TempDir::new().unwrap();
    let deployer = deployer(&temp.path().join("askbot-src"));
    let install_dir = temp.path().join("mysite");
    fs::create_dir(&install_dir).unwrap();

    let report = deployer.deploy_into(&install_dir, true, &TemplateContext::new()).unwrap();

    for name in FILES_TO_CREATE {
        let content = fs::read_to_string(install_dir.join(name)).unwrap();
        assert_eq!(content, format!("# askbot template: {}\n", name));
    }
    assert_eq!(report.files_copied.len(), 5);
    assert!(report.files_skipped.is_empty());

    let log_file = install_dir.join("log").join("askbot.log");
    assert!(log_file.is_file());
    assert_eq!(fs::metadata(&log_file).unwrap().len(), 0);
    assert_eq!(report.log_file, Some(log_file));

    let settings = fs::read_to_string(install_dir.join("settings.py")).unwrap();
    assert!(settings.contains("DATABASES"));
    assert_eq!(report.settings, SettingsOutcome::Created);

    for dir in ["doc", "cron", "upfiles"] {
        let copied = install_dir.join(APP_DIR_NAME).join(dir);
        assert!(copied.join("README").is_file());
        assert!(copied.join("nested").join("item.txt").is_file());
    }
    assert_eq!(report.dirs_copied, vec!["doc", "cron", "upfiles"]);
}

#[test]
fn test_redeploy_preserves_operator_changes() {
    let temp = TempDir::new().unwrap();
    let deployer = deployer(&temp.path().join("askbot-src"));
    let install_dir = temp.path().join("mysite");
    deployer.deploy_into(&install_dir, true, &TemplateContext::new()).unwrap();

    // operator edits
    for name in FILES_TO_CREATE {
        fs::write(install_dir.join(name), format!("# edited {}\n", name)).unwrap();
    }
    fs::write(install_dir.join("settings.py"), "DEBUG = True\n").unwrap();
    fs::write(install_dir.join("log").join("askbot.log"), "one entry\n").unwrap();
    fs::write(install_dir.join(APP_DIR_NAME).join("doc").join("README"), "local notes\n").unwrap();

    let before = snapshot(&install_dir);
    let report = deployer.deploy_into(&install_dir, true, &TemplateContext::new()).unwrap();
    let after = snapshot(&install_dir);

    assert_eq!(before.len(), after.len(), "no files added or removed");
    for (path, contents) in &before {
        if path == &PathBuf::from("urls.py") {
            assert_eq!(after[path], b"# askbot template: urls.py\n".to_vec());
        } else {
            assert_eq!(&after[path], contents, "{} changed", path.display());
        }
    }

    assert_eq!(report.files_overwritten, vec!["urls.py"]);
    assert!(report.files_copied.is_empty());
    assert_eq!(report.files_skipped.len(), 4);
    assert_eq!(report.settings, SettingsOutcome::KeptExisting);
    assert!(report.dirs_copied.is_empty());
    assert_eq!(report.dirs_skipped, vec!["doc", "cron", "upfiles"]);
}

#[test]
fn test_blank_files_are_never_overwritten() {
    let temp = TempDir::new().unwrap();
    let deployer = deployer(&temp.path().join("askbot-src"));
    let install_dir = temp.path().join("mysite");
    fs::create_dir(&install_dir).unwrap();
    fs::write(install_dir.join("__init__.py"), "").unwrap();
    fs::write(install_dir.join("manage.py"), "# mine\n").unwrap();

    let report = deployer.deploy_into(&install_dir, true, &TemplateContext::new()).unwrap();

    assert_eq!(fs::read_to_string(install_dir.join("__init__.py")).unwrap(), "");
    assert_eq!(fs::read_to_string(install_dir.join("manage.py")).unwrap(), "# mine\n");
    assert_eq!(report.files_skipped, vec!["__init__.py", "manage.py"]);
    assert_eq!(report.files_copied, vec!["urls.py", "django.wsgi", "celery_app.py"]);
}

#[test]
fn test_local_settings_are_appended() {
    let temp = TempDir::new().unwrap();
    let deployer = deployer(&temp.path().join("askbot-src"));
    let install_dir = temp.path().join("mysite");
    let local_settings = temp.path().join("local_settings.py");
    fs::write(&local_settings, "LOCAL_OVERRIDE = 1\n").unwrap();

    let context = TemplateContext::new().with_local_settings(&local_settings);
    let report = deployer.deploy_into(&install_dir, true, &context).unwrap();

    let settings = fs::read_to_string(install_dir.join("settings.py")).unwrap();
    assert!(settings.ends_with("\nLOCAL_OVERRIDE = 1\n"));
    assert_eq!(report.settings, SettingsOutcome::CreatedWithLocalSettings);
}

#[test]
fn test_missing_local_settings_is_ignored() {
    let temp = TempDir::new().unwrap();
    let deployer = deployer(&temp.path().join("askbot-src"));
    let install_dir = temp.path().join("mysite");

    let context = TemplateContext::new().with_local_settings(temp.path().join("absent.py"));
    let report = deployer.deploy_into(&install_dir, true, &context).unwrap();

    assert_eq!(report.settings, SettingsOutcome::Created);
    let settings = fs::read_to_string(install_dir.join("settings.py")).unwrap();
    assert!(!settings.contains("LOCAL_OVERRIDE"));
}

#[test]
fn test_source_settings_template_receives_context() {
    let temp = TempDir::new().unwrap();
    let source_root = make_source_tree(&temp.path().join("askbot-src"));
    let source = ScaffoldSource::new(&source_root);
    fs::write(
        source.template_file(SETTINGS_TEMPLATE_NAME),
        "DATABASE_NAME = '{{ database_name }}'\nROOT = '{{ install_dir }}'\n",
    )
    .unwrap();
    let deployer = ScaffoldDeployer::new(source).with_verbosity(0);
    let install_dir = temp.path().join("mysite");

    let context: TemplateContext = [("database_name", "forum")].into_iter().collect();
    deployer.deploy_into(&install_dir, true, &context).unwrap();

    let settings = fs::read_to_string(install_dir.join("settings.py")).unwrap();
    assert_eq!(
        settings,
        format!("DATABASE_NAME = 'forum'\nROOT = '{}'\n", install_dir.display())
    );
}
