use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::markup::{is_identifier, is_reserved_word};

pub const CONFIG_FILE_NAME: &str = ".resxrc.json";

const MAX_TAB_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
    #[serde(default = "default_src_folder")]
    pub src_folder: String,
    #[serde(default = "default_dist_folder")]
    pub dist_folder: String,
    #[serde(default = "default_resx_prefix")]
    pub resx_prefix: String,
    #[serde(default = "default_js_namespace")]
    pub js_namespace: String,
    #[serde(default = "default_ts_glob_interface")]
    pub ts_glob_interface: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_default_lang")]
    pub default_lang: String,
    #[serde(default = "default_current_lang_ns", rename = "currentLangNS")]
    pub current_lang_ns: String,
}

fn default_tab_size() -> usize {
    4
}

fn default_src_folder() -> String {
    "./resx/src".to_string()
}

fn default_dist_folder() -> String {
    "./resx/dist".to_string()
}

fn default_resx_prefix() -> String {
    "resx".to_string()
}

fn default_js_namespace() -> String {
    "Resx".to_string()
}

fn default_ts_glob_interface() -> String {
    "IResx".to_string()
}

fn default_languages() -> Vec<String> {
    vec![default_default_lang()]
}

fn default_default_lang() -> String {
    "en".to_string()
}

fn default_current_lang_ns() -> String {
    "current".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            src_folder: default_src_folder(),
            dist_folder: default_dist_folder(),
            resx_prefix: default_resx_prefix(),
            js_namespace: default_js_namespace(),
            ts_glob_interface: default_ts_glob_interface(),
            languages: default_languages(),
            default_lang: default_default_lang(),
            current_lang_ns: default_current_lang_ns(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Everything generated code depends on is checked here, so generators
    /// can assume well-formed identifiers and a consistent language set.
    pub fn validate(&self) -> Result<()> {
        if self.tab_size == 0 || self.tab_size > MAX_TAB_SIZE {
            bail!(
                "'tabSize' must be between 1 and {}, got {}",
                MAX_TAB_SIZE,
                self.tab_size
            );
        }

        if self.languages.is_empty() {
            bail!("'languages' must contain at least one language");
        }

        let mut seen = HashSet::new();
        for lang in &self.languages {
            if lang.trim().is_empty() || lang.chars().any(char::is_whitespace) {
                bail!("Invalid language code in 'languages': \"{}\"", lang);
            }
            if !seen.insert(lang.as_str()) {
                bail!("Duplicate language in 'languages': \"{}\"", lang);
            }
        }

        if !self.languages.contains(&self.default_lang) {
            bail!(
                "'defaultLang' ({}) must be one of 'languages' ({})",
                self.default_lang,
                self.languages.join(", ")
            );
        }

        for segment in self.js_namespace.split('.') {
            if !is_identifier(segment) {
                bail!(
                    "Invalid identifier in 'jsNamespace': \"{}\"",
                    self.js_namespace
                );
            }
        }
        if self.js_namespace_segments().next().is_some_and(is_reserved_word) {
            bail!("'jsNamespace' cannot start with a reserved word");
        }

        if !is_identifier(&self.current_lang_ns) {
            bail!(
                "Invalid identifier in 'currentLangNS': \"{}\"",
                self.current_lang_ns
            );
        }

        if !is_identifier(&self.ts_glob_interface) || is_reserved_word(&self.ts_glob_interface) {
            bail!(
                "Invalid identifier in 'tsGlobInterface': \"{}\"",
                self.ts_glob_interface
            );
        }

        if self.resx_prefix.is_empty()
            || self.resx_prefix.contains('=')
            || self.resx_prefix.chars().any(char::is_whitespace)
        {
            bail!("Invalid 'resxPrefix': \"{}\"", self.resx_prefix);
        }

        Ok(())
    }

    pub fn js_namespace_segments(&self) -> impl Iterator<Item = &str> {
        self.js_namespace.split('.')
    }

    /// Resolve `srcFolder` and `distFolder` against `root`.
    pub fn folders(&self, root: &Path) -> (PathBuf, PathBuf) {
        (
            resolve_folder(root, &self.src_folder),
            resolve_folder(root, &self.dist_folder),
        )
    }
}

fn resolve_folder(root: &Path, folder: &str) -> PathBuf {
    let path = Path::new(folder);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .fold(root.to_path_buf(), |acc, c| acc.join(c))
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative folders are resolved against.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
