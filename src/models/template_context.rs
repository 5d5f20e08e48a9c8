use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const LOCAL_SETTINGS_KEY: &str = "local_settings";

/// Substitutions for the settings template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local_settings(mut self, path: impl Into<PathBuf>) -> Self {
        self.set_local_settings(path);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set_local_settings(&mut self, path: impl Into<PathBuf>) {
        let path: PathBuf = path.into();
        self.insert(LOCAL_SETTINGS_KEY, path.to_string_lossy().into_owned());
    }

    /// Path to the local overrides file, if one was configured
    pub fn local_settings(&self) -> Option<PathBuf> {
        self.get(LOCAL_SETTINGS_KEY)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    pub fn to_tera(&self) -> tera::Context {
        let mut context = tera::Context::new();
        for (key, value) in &self.values {
            context.insert(key.as_str(), value);
        }
        context
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}
