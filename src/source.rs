//! Translation sources: the module, language-pack and theme load phases.

use std::sync::Arc;

use crate::design::Design;
use crate::error::TranslateError;
use crate::fallback::theme_translation_files;
use crate::module::ModuleRegistry;
use crate::pack::PackDictionary;
use crate::reader::FileDataReader;
use crate::theme::LocaleCode;
use crate::translate_config::TranslateConfig;
use crate::translations::Translations;
use crate::view::ViewFileSystem;

/// One phase of a translation load
pub trait TranslationSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Merge this source's dictionaries into `data`
    fn load(&self, config: &TranslateConfig, data: &mut Translations) -> Result<(), TranslateError>;
}

fn config_locale(config: &TranslateConfig) -> Option<&LocaleCode> {
    let locale = config.locale.as_ref();
    if locale.is_none() {
        tracing::debug!("No locale configured, skipping source");
    }
    locale
}

/// Dictionaries shipped in module i18n/ directories
pub struct ModuleSource {
    registry: Arc<dyn ModuleRegistry>,
    reader: FileDataReader,
}

impl ModuleSource {
    pub fn new(registry: Arc<dyn ModuleRegistry>, reader: FileDataReader) -> Self {
        Self { registry, reader }
    }

    fn load_modules<'a>(
        &self,
        modules: impl Iterator<Item = &'a String>,
        locale: &LocaleCode,
        data: &mut Translations,
    ) -> Result<(), TranslateError> {
        for module in modules {
            if let Some(file) = self.registry.translation_file(module, locale) {
                data.add_data(self.reader.read_file(&file)?);
            }
        }
        Ok(())
    }
}

impl TranslationSource for ModuleSource {
    fn name(&self) -> &'static str {
        "module"
    }

    /// Registry order, except the current controller module which loads last
    fn load(&self, config: &TranslateConfig, data: &mut Translations) -> Result<(), TranslateError> {
        let Some(locale) = config_locale(config) else {
            return Ok(());
        };

        let names = self.registry.names();
        let current = config.module.as_deref();

        self.load_modules(
            names.iter().filter(|name| Some(name.as_str()) != current),
            locale,
            data,
        )?;
        self.load_modules(
            names.iter().filter(|name| Some(name.as_str()) == current),
            locale,
            data,
        )
    }
}

/// Installed language packs
pub struct PackSource {
    dictionary: Arc<dyn PackDictionary>,
}

impl PackSource {
    pub fn new(dictionary: Arc<dyn PackDictionary>) -> Self {
        Self { dictionary }
    }
}

impl TranslationSource for PackSource {
    fn name(&self) -> &'static str {
        "pack"
    }

    fn load(&self, config: &TranslateConfig, data: &mut Translations) -> Result<(), TranslateError> {
        let Some(locale) = config_locale(config) else {
            return Ok(());
        };
        data.add_data(self.dictionary.dictionary(locale)?);
        Ok(())
    }
}

/// Dictionaries of the active theme and its ancestors
pub struct ThemeSource {
    design: Arc<dyn Design>,
    view: Arc<dyn ViewFileSystem>,
    reader: FileDataReader,
}

impl ThemeSource {
    pub fn new(design: Arc<dyn Design>, view: Arc<dyn ViewFileSystem>, reader: FileDataReader) -> Self {
        Self {
            design,
            view,
            reader,
        }
    }
}

impl TranslationSource for ThemeSource {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn load(&self, config: &TranslateConfig, data: &mut Translations) -> Result<(), TranslateError> {
        let Some(locale) = config_locale(config) else {
            return Ok(());
        };

        let files = theme_translation_files(self.design.as_ref(), self.view.as_ref(), config, locale);
        for file in files.into_iter().flatten() {
            data.add_data(self.reader.read_file(&file)?);
        }

        Ok(())
    }
}
