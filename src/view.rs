//! View file resolution inside theme directories.

use std::path::PathBuf;

use crate::theme::Theme;
use crate::translate_config::TranslateConfig;

/// Resolves theme-relative locale files
pub trait ViewFileSystem: Send + Sync {
    /// Path of `file` within the theme selected by `config`, if registered
    fn locale_file_name(&self, file: &str, config: &TranslateConfig) -> Option<PathBuf>;
}

/// Looks files up in installed theme directories.
///
/// The theme slot of the config is matched against theme codes within the
/// config's area.
#[derive(Debug, Clone, Default)]
pub struct ThemeFileSystem {
    themes: Vec<Theme>,
}

impl ThemeFileSystem {
    pub fn new(themes: Vec<Theme>) -> Self {
        Self { themes }
    }
}

impl ViewFileSystem for ThemeFileSystem {
    fn locale_file_name(&self, file: &str, config: &TranslateConfig) -> Option<PathBuf> {
        let area = config.area?;
        let code = config.theme.as_deref()?;

        let theme = self
            .themes
            .iter()
            .find(|t| t.area == area && t.code().as_str() == code)?;

        let path = theme.path.join(file);
        path.is_file().then_some(path)
    }
}
