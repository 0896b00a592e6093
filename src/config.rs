use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::auditor::AuditOptions;
use crate::models::UnreadablePolicy;
use crate::template::LicenseTemplate;

/// Extension audited when neither the CLI nor a config file names one.
pub const DEFAULT_EXTENSION: &str = ".java";

const CONFIG_DIR: &str = "license-headers";
const PROJECT_CONFIG_DIR: &str = ".license-headers";

/// Root configuration structure, deserialized from `.license-headers/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audit: AuditConfig,

    /// File the config was read from, used to resolve relative paths.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// The `[audit]` table. Every field is optional; the CLI wins over all of them.
#[derive(Debug, Default, Deserialize)]
pub struct AuditConfig {
    pub extension: Option<String>,
    /// Template file, relative to the config file's directory.
    pub template: Option<PathBuf>,
    pub on_unreadable: Option<UnreadablePolicy>,
    pub fail_on_missing: Option<bool>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Values given on the command line, applied on top of a [`Config`].
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub extension: Option<&'a str>,
    pub template: Option<&'a Path>,
    pub on_unreadable: Option<UnreadablePolicy>,
    pub exclude: &'a [String],
    pub fail_on_missing: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub struct Settings {
    pub options: AuditOptions,
    pub fail_on_missing: bool,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-headers/config.toml`
/// 3. `~/.config/license-headers/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    load_config_in(project_path, config_override, dirs::home_dir().as_deref())
}

fn load_config_in(
    project_path: &Path,
    config_override: Option<&Path>,
    home: Option<&Path>,
) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(PROJECT_CONFIG_DIR).join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = home {
        let home_config = home.join(".config").join(CONFIG_DIR).join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

impl Config {
    /// Merge CLI overrides into this config and build the audit inputs.
    ///
    /// `--exclude` patterns are appended to the configured ones rather than
    /// replacing them.
    pub fn resolve(&self, overrides: &Overrides<'_>) -> Result<Settings> {
        let extension = overrides
            .extension
            .map(str::to_string)
            .or_else(|| self.audit.extension.clone())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        let template = match (overrides.template, &self.audit.template) {
            (Some(path), _) => LicenseTemplate::from_file(path)?,
            (None, Some(path)) => LicenseTemplate::from_file(&self.relative_to_source(path))?,
            (None, None) => LicenseTemplate::builtin(),
        };

        let on_unreadable = overrides
            .on_unreadable
            .or(self.audit.on_unreadable)
            .unwrap_or_default();

        let exclude = self
            .audit
            .exclude
            .iter()
            .chain(overrides.exclude.iter())
            .map(|pattern| {
                Regex::new(pattern).with_context(|| format!("invalid exclude pattern `{pattern}`"))
            })
            .collect::<Result<Vec<_>>>()?;

        let fail_on_missing =
            overrides.fail_on_missing || self.audit.fail_on_missing.unwrap_or(false);

        Ok(Settings {
            options: AuditOptions::new(extension, template)
                .on_unreadable(on_unreadable)
                .exclude(exclude),
            fail_on_missing,
        })
    }

    fn relative_to_source(&self, path: &Path) -> PathBuf {
        match self.source.as_deref().and_then(Path::parent) {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_project_config(project: &Path, content: &str) -> PathBuf {
        let dir = project.join(".license-headers");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_config() {
        let project = TempDir::new().unwrap();
        let config = load_config_in(project.path(), None, None).unwrap();
        assert!(config.source.is_none());

        let settings = config.resolve(&Overrides::default()).unwrap();
        assert_eq!(settings.options.extension, ".java");
        assert_eq!(settings.options.template, LicenseTemplate::builtin());
        assert_eq!(settings.options.on_unreadable, UnreadablePolicy::Fail);
        assert!(settings.options.exclude.is_empty());
        assert!(!settings.fail_on_missing);
    }

    #[test]
    fn test_project_config_loaded() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("HEADER.txt"), "// MIT\n").unwrap();
        write_project_config(
            project.path(),
            r#"
[audit]
extension = ".rs"
template = "../HEADER.txt"
on_unreadable = "skip"
fail_on_missing = true
exclude = ["^target/"]
"#,
        );

        let config = load_config_in(project.path(), None, None).unwrap();
        let settings = config.resolve(&Overrides::default()).unwrap();
        assert_eq!(settings.options.extension, ".rs");
        assert_eq!(settings.options.template.as_str(), "// MIT\n");
        assert_eq!(settings.options.on_unreadable, UnreadablePolicy::Skip);
        assert_eq!(settings.options.exclude.len(), 1);
        assert!(settings.fail_on_missing);
    }

    #[test]
    fn test_override_path_wins_over_project_config() {
        let project = TempDir::new().unwrap();
        write_project_config(project.path(), "[audit]\nextension = \".rs\"\n");
        let other = project.path().join("other.toml");
        fs::write(&other, "[audit]\nextension = \".kt\"\n").unwrap();

        let config = load_config_in(project.path(), Some(&other), None).unwrap();
        assert_eq!(config.audit.extension.as_deref(), Some(".kt"));
        assert_eq!(config.source.as_deref(), Some(other.as_path()));
    }

    #[test]
    fn test_home_config_fallback() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let dir = home.path().join(".config").join("license-headers");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "[audit]\nextension = \".go\"\n").unwrap();

        let config = load_config_in(project.path(), None, Some(home.path())).unwrap();
        assert_eq!(config.audit.extension.as_deref(), Some(".go"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let project = TempDir::new().unwrap();
        write_project_config(
            project.path(),
            "[audit]\nextension = \".rs\"\non_unreadable = \"skip\"\nexclude = [\"^a/\"]\n",
        );
        let template = project.path().join("hdr.txt");
        fs::write(&template, "// Apache-2.0").unwrap();
        let extra = vec!["^b/".to_string()];

        let config = load_config_in(project.path(), None, None).unwrap();
        let settings = config
            .resolve(&Overrides {
                extension: Some(".ts"),
                template: Some(&template),
                on_unreadable: Some(UnreadablePolicy::Fail),
                exclude: &extra,
                fail_on_missing: true,
            })
            .unwrap();

        assert_eq!(settings.options.extension, ".ts");
        assert_eq!(settings.options.template.as_str(), "// Apache-2.0");
        assert_eq!(settings.options.on_unreadable, UnreadablePolicy::Fail);
        assert_eq!(settings.options.exclude.len(), 2);
        assert!(settings.fail_on_missing);
    }

    #[test]
    fn test_invalid_exclude_pattern_rejected() {
        let extra = vec!["(unclosed".to_string()];
        let err = Config::default()
            .resolve(&Overrides {
                exclude: &extra,
                ..Overrides::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let project = TempDir::new().unwrap();
        write_project_config(project.path(), "[audit]\non_unreadable = \"retry\"\n");
        assert!(load_config_in(project.path(), None, None).is_err());
    }

    #[test]
    fn test_missing_template_file_is_error() {
        let project = TempDir::new().unwrap();
        write_project_config(project.path(), "[audit]\ntemplate = \"nope.txt\"\n");
        let config = load_config_in(project.path(), None, None).unwrap();
        assert!(config.resolve(&Overrides::default()).is_err());
    }
}
