//! Module registry: which modules are enabled, in load order, and where they live.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TranslateError;
use crate::scanner::discover_modules;
use crate::theme::LocaleCode;

/// An installed module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Declared name (e.g., "Magento_Catalog")
    pub name: String,
    /// Directory containing the module's etc/ and i18n/
    pub path: PathBuf,
}

impl Module {
    /// Path of this module's dictionary for `locale`
    pub fn translation_file(&self, locale: &LocaleCode) -> PathBuf {
        self.path.join("i18n").join(locale.csv_file_name())
    }
}

/// Enabled modules in a stable order
pub trait ModuleRegistry: Send + Sync {
    fn names(&self) -> Vec<String>;

    /// Directory of a registered module
    fn module_dir(&self, name: &str) -> Option<PathBuf>;

    /// Dictionary path of a module for `locale`
    fn translation_file(&self, name: &str, locale: &LocaleCode) -> Option<PathBuf> {
        self.module_dir(name)
            .map(|dir| dir.join("i18n").join(locale.csv_file_name()))
    }
}

/// Registry backed by an installation directory
#[derive(Debug, Clone, Default)]
pub struct FsModuleRegistry {
    modules: Vec<Module>,
}

impl FsModuleRegistry {
    /// Registry over modules already in load order
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    /// Discover modules and order them by app/etc/config.php.
    ///
    /// Without config.php every discovered module is enabled, sorted by name.
    pub fn discover(magento_root: &Path) -> Result<Self, TranslateError> {
        let mut discovered: HashMap<String, Module> = discover_modules(magento_root)
            .into_iter()
            .map(|m| (m.name.clone(), m))
            .collect();

        let config_php = magento_root.join("app").join("etc").join("config.php");
        let sequence = match fs::read_to_string(&config_php) {
            Ok(content) => Some(parse_module_sequence(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(TranslateError::file_system(config_php, e)),
        };

        let modules = match sequence {
            Some(sequence) => sequence
                .into_iter()
                .filter(|(_, enabled)| *enabled)
                .filter_map(|(name, _)| {
                    let module = discovered.remove(&name);
                    if module.is_none() {
                        tracing::warn!(module = %name, "Enabled module has no directory");
                    }
                    module
                })
                .collect(),
            None => {
                let mut modules: Vec<Module> = discovered.into_values().collect();
                modules.sort_by(|a, b| a.name.cmp(&b.name));
                modules
            }
        };

        Ok(Self::new(modules))
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }
}

impl ModuleRegistry for FsModuleRegistry {
    fn names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name.clone()).collect()
    }

    fn module_dir(&self, name: &str) -> Option<PathBuf> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.path.clone())
    }

    fn translation_file(&self, name: &str, locale: &LocaleCode) -> Option<PathBuf> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.translation_file(locale))
    }
}

/// Read `'Vendor_Module' => 1` entries from config.php in file order
pub fn parse_module_sequence(config_php: &str) -> Vec<(String, bool)> {
    let mut sequence = Vec::new();

    for line in config_php.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('\'') else {
            continue;
        };
        let Some((name, rest)) = rest.split_once('\'') else {
            continue;
        };
        let Some(value) = rest.trim_start().strip_prefix("=>") else {
            continue;
        };
        let value = value.trim().trim_end_matches(',').trim();

        let enabled = match value {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => continue,
        };

        if name.contains('_') {
            sequence.push((name.to_string(), enabled));
        }
    }

    sequence
}
