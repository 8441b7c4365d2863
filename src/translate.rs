//! Translation loading orchestration.
//!
//! `Translate` owns the configuration tuple and the accumulated dictionary.
//! A load either installs a cached dictionary or runs every translation
//! source in order (modules, language packs, themes) and caches the merge.

use std::sync::Arc;

use crate::cache::{cache_id, CacheFrontend};
use crate::context::{AppState, LocaleResolver, ScopeResolver};
use crate::design::Design;
use crate::error::TranslateError;
use crate::serializer::Serializer;
use crate::source::TranslationSource;
use crate::theme::{Area, LocaleCode};
use crate::translate_config::TranslateConfig;
use crate::translations::Translations;

/// Services a `Translate` instance depends on
#[derive(Clone)]
pub struct Collaborators {
    pub cache: Arc<dyn CacheFrontend>,
    pub serializer: Arc<dyn Serializer>,
    pub app_state: Arc<dyn AppState>,
    pub locale_resolver: Arc<dyn LocaleResolver>,
    pub scope_resolver: Arc<dyn ScopeResolver>,
    pub design: Arc<dyn Design>,
}

pub struct Translate {
    collaborators: Collaborators,
    /// Load phases, applied in order; later sources win
    sources: Vec<Box<dyn TranslationSource>>,
    config: TranslateConfig,
    data: Translations,
}

impl Translate {
    pub fn new(collaborators: Collaborators, sources: Vec<Box<dyn TranslationSource>>) -> Self {
        Self {
            collaborators,
            sources,
            config: TranslateConfig::new(),
            data: Translations::new(),
        }
    }

    /// Merge `patch` into the configuration, then fill unset slots from
    /// the locale resolver, scope resolver, design and app state.
    pub fn set_config(&mut self, patch: &TranslateConfig) -> &mut Self {
        let mut config = self.config.merged(patch);

        if config.locale.is_none() {
            config.locale = Some(self.collaborators.locale_resolver.locale());
        }
        if config.scope.is_none() {
            config.scope = Some(self.collaborators.scope_resolver.scope_code());
        }
        if config.theme.is_none() {
            config.theme = self.collaborators.design.theme_id();
        }
        if config.module.is_none() {
            config.module = self.collaborators.app_state.controller_module();
        }

        self.config = config;
        self
    }

    pub fn config(&self) -> &TranslateConfig {
        &self.config
    }

    /// Locale the next load uses
    pub fn locale(&self) -> LocaleCode {
        self.config
            .locale
            .clone()
            .unwrap_or_else(|| self.collaborators.locale_resolver.locale())
    }

    pub fn set_locale(&mut self, locale: LocaleCode) -> &mut Self {
        self.config = self.config.clone().with_locale(locale);
        self
    }

    /// Cache id of the current configuration
    pub fn cache_id(&self) -> String {
        cache_id(&self.config)
    }

    /// Load translation data for `area` (the application's current area when None).
    ///
    /// Unless `force_reload` is set, a cached dictionary short-circuits the
    /// load and a freshly built one is cached afterwards. A failing source
    /// aborts the load and leaves `data()` partially populated.
    pub fn load_data(
        &mut self,
        area: Option<Area>,
        force_reload: bool,
    ) -> Result<&mut Self, TranslateError> {
        self.data.clear();

        let area = match area {
            Some(area) => area,
            None => self.collaborators.app_state.area_code()?,
        };
        self.set_config(&TranslateConfig::new().with_area(area));

        if !force_reload {
            if let Some(data) = self.load_cache()? {
                tracing::info!(cache_id = %self.cache_id(), phrases = data.len(), "Translations loaded from cache");
                self.data = data;
                return Ok(self);
            }
        }

        for source in &self.sources {
            let before = self.data.len();
            source.load(&self.config, &mut self.data)?;
            tracing::debug!(
                source = source.name(),
                phrases = self.data.len(),
                added = self.data.len().saturating_sub(before),
                "Translation source loaded"
            );
        }

        if !force_reload {
            self.save_cache()?;
        }

        Ok(self)
    }

    /// Accumulated translation data
    pub fn data(&self) -> &Translations {
        &self.data
    }

    /// Translation of `phrase`, or `phrase` itself
    pub fn translate<'a>(&'a self, phrase: &'a str) -> &'a str {
        self.data.translate(phrase)
    }

    /// Cached dictionary for the current configuration; empty payloads count as a miss
    fn load_cache(&self) -> Result<Option<Translations>, TranslateError> {
        let id = self.cache_id();
        match self.collaborators.cache.load(&id)? {
            Some(bytes) if !bytes.is_empty() => {
                Ok(Some(self.collaborators.serializer.unserialize(&bytes)?))
            }
            _ => {
                tracing::info!(cache_id = %id, "Translation cache miss");
                Ok(None)
            }
        }
    }

    fn save_cache(&self) -> Result<(), TranslateError> {
        let id = self.cache_id();
        let bytes = self.collaborators.serializer.serialize(&self.data)?;
        self.collaborators.cache.save(&bytes, &id, &[], None)?;
        tracing::info!(cache_id = %id, phrases = self.data.len(), "Translations cached");
        Ok(())
    }
}
