use crate::analysis::{RuleId, RuleSettings};
use crate::error::LintError;
use crate::messages::Lang;
use crate::report::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for a lint run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workflow paths to skip (relative to the project root)
    pub exclude: Vec<String>,

    /// Finding codes to suppress, e.g. `max-activities`
    pub disabled_rules: Vec<String>,

    /// Rule thresholds
    pub rules: RuleSettings,

    /// Screenshot directory settings
    pub screenshots: ScreenshotConfig,

    /// Project manifest file name
    pub manifest: String,

    /// Output settings
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Directory under the project root holding informative screenshots
    pub directory: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub lang: Lang,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: vec![],
            disabled_rules: vec![],
            rules: RuleSettings::default(),
            screenshots: ScreenshotConfig::default(),
            manifest: "project.json".to_string(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            directory: ".screenshots".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or TOML file
    pub fn from_file(path: &Path) -> Result<Self, LintError> {
        let contents = std::fs::read_to_string(path).map_err(|e| LintError::io(path, e))?;
        let fail = |message: String| LintError::Config {
            path: path.to_path_buf(),
            message,
        };

        match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
            "yml" | "yaml" => serde_yaml::from_str(&contents).map_err(|e| fail(e.to_string())),
            "toml" => toml::from_str(&contents).map_err(|e| fail(e.to_string())),
            _ => serde_yaml::from_str(&contents)
                .or_else(|_| toml::from_str(&contents))
                .map_err(|e: toml::de::Error| fail(e.to_string())),
        }
    }

    /// Look for a config file in the project root, falling back to defaults
    pub fn from_default_locations(project_root: &Path) -> Result<Self, LintError> {
        let default_names = [
            ".uilint.yml",
            ".uilint.yaml",
            ".uilint.toml",
            "uilint.yml",
            "uilint.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.is_file() {
                debug!("Loading config from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Disabled rule ids; unknown codes are logged and ignored
    pub fn disabled_rule_ids(&self) -> Vec<RuleId> {
        self.disabled_rules
            .iter()
            .filter_map(|code| {
                let id = RuleId::from_code(code);
                if id.is_none() {
                    warn!("Unknown rule id in configuration: {}", code);
                }
                id
            })
            .collect()
    }

    /// Whether a path relative to the project root is excluded
    pub fn should_exclude(&self, relative: &Path) -> bool {
        let path = relative.to_string_lossy().replace('\\', "/");
        self.exclude.iter().any(|pattern| glob_match(pattern, &path))
    }
}

/// Minimal glob matching: `**/dir/**`, `dir/**`, `**/name`, `*suffix`,
/// `prefix*` and exact paths.
fn glob_match(pattern: &str, path: &str) -> bool {
    if let Some(rest) = pattern.strip_prefix("**/") {
        if let Some(dir) = rest.strip_suffix("/**") {
            return path.split('/').rev().skip(1).any(|seg| seg == dir);
        }
        return path == rest || path.ends_with(&format!("/{}", rest)) || glob_match(rest, path);
    }

    if let Some(dir) = pattern.strip_suffix("/**") {
        return path.starts_with(&format!("{}/", dir));
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        return !suffix.contains('*') && path.ends_with(suffix);
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        return path.starts_with(prefix);
    }

    path == pattern
}
