//! A Magento installation on disk, wired into a ready-to-use `Translate`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::CacheFrontend;
use crate::context::{AppState, LocaleResolver, ScopeResolver};
use crate::design::ThemeDesign;
use crate::error::TranslateError;
use crate::module::FsModuleRegistry;
use crate::pack::FsPackDictionary;
use crate::reader::FileDataReader;
use crate::scanner::discover_all_themes;
use crate::serializer::JsonSerializer;
use crate::source::{ModuleSource, PackSource, ThemeSource, TranslationSource};
use crate::theme::{Area, Theme, ThemeCode};
use crate::translate::{Collaborators, Translate};
use crate::view::ThemeFileSystem;

/// Modules, themes and language packs found under a Magento root
#[derive(Debug, Clone)]
pub struct MagentoInstallation {
    root: PathBuf,
    themes: Vec<Theme>,
    modules: Arc<FsModuleRegistry>,
    packs: Arc<FsPackDictionary>,
    reader: FileDataReader,
}

impl MagentoInstallation {
    /// Scan `root` reading dictionaries from the local filesystem
    pub fn discover(root: &Path) -> Result<Self, TranslateError> {
        Self::discover_with_reader(root, FileDataReader::local())
    }

    pub fn discover_with_reader(root: &Path, reader: FileDataReader) -> Result<Self, TranslateError> {
        if !root.is_dir() {
            return Err(TranslateError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let installation = Self {
            root: root.to_path_buf(),
            themes: discover_all_themes(root)?,
            modules: Arc::new(FsModuleRegistry::discover(root)?),
            packs: Arc::new(FsPackDictionary::discover(root, reader.clone())?),
            reader,
        };

        tracing::debug!(
            root = %root.display(),
            themes = installation.themes.len(),
            modules = installation.modules.modules().len(),
            packs = installation.packs.packs().len(),
            "Scanned installation"
        );

        Ok(installation)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn modules(&self) -> &FsModuleRegistry {
        &self.modules
    }

    /// Design for `area` with `theme` active.
    ///
    /// A requested theme must be installed. Without one, the area's default
    /// theme is used when installed, otherwise no theme is active.
    pub fn design(&self, area: Area, theme: Option<&ThemeCode>) -> Result<ThemeDesign, TranslateError> {
        if let Some(code) = theme {
            return ThemeDesign::new(self.themes.clone(), area, code);
        }

        match area.default_theme() {
            Some(code) if self.themes.iter().any(|t| t.area == area && t.code() == code) => {
                ThemeDesign::new(self.themes.clone(), area, &code)
            }
            _ => {
                tracing::warn!(area = %area, "No theme active, theme translations skipped");
                Ok(ThemeDesign::inactive(self.themes.clone()))
            }
        }
    }

    /// Module, language-pack and theme sources in load order
    pub fn sources(&self, design: Arc<ThemeDesign>) -> Vec<Box<dyn TranslationSource>> {
        let modules: Box<dyn TranslationSource> =
            Box::new(ModuleSource::new(self.modules.clone(), self.reader.clone()));
        let packs: Box<dyn TranslationSource> = Box::new(PackSource::new(self.packs.clone()));
        let themes: Box<dyn TranslationSource> = Box::new(ThemeSource::new(
            design,
            Arc::new(ThemeFileSystem::new(self.themes.clone())),
            self.reader.clone(),
        ));

        vec![modules, packs, themes]
    }

    /// Translate wired to this installation with a JSON serializer
    pub fn translate<C>(&self, context: Arc<C>, design: ThemeDesign, cache: Arc<dyn CacheFrontend>) -> Translate
    where
        C: AppState + LocaleResolver + ScopeResolver + 'static,
    {
        let design = Arc::new(design);
        let collaborators = Collaborators {
            cache,
            serializer: Arc::new(JsonSerializer),
            app_state: context.clone(),
            locale_resolver: context.clone(),
            scope_resolver: context,
            design: design.clone(),
        };

        Translate::new(collaborators, self.sources(design))
    }
}
