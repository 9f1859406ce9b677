use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_MACRO_NAME, MacroOptions};

pub const CONFIG_FILE_NAME: &str = ".pagemacrorc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_macro_name")]
    pub macro_name: String,
    #[serde(default = "default_routes_folder")]
    pub routes_folder: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_macro_name() -> String {
    DEFAULT_MACRO_NAME.to_string()
}

fn default_routes_folder() -> String {
    "src/pages".to_string()
}

fn default_extensions() -> Vec<String> {
    [".vue", ".jsx", ".tsx", ".js", ".ts"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            macro_name: default_macro_name(),
            routes_folder: default_routes_folder(),
            extensions: default_extensions(),
            ignores: Vec::new(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for a macro name that is not a plain identifier, an
    /// extension without a leading dot, or an invalid glob in `ignores`.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.macro_name) {
            bail!(
                "Invalid 'macroName': \"{}\" is not an identifier",
                self.macro_name
            );
        }

        for ext in &self.extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                bail!("Invalid entry in 'extensions': \"{}\" must start with '.'", ext);
            }
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }

    pub fn macro_options(&self) -> MacroOptions {
        MacroOptions::new(self.macro_name.clone())
    }
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
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
