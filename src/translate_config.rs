//! Translation configuration tuple.
//!
//! Identifies one translation dictionary: which area, locale, store scope,
//! theme and controller module it was built for. Values are immutable;
//! merging returns a new tuple.

use crate::theme::{Area, LocaleCode};

/// Marker distinguishing dictionaries that include dynamic overrides
pub const CUSTOM_MODULE_MARKER: &str = "wwdt";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateConfig {
    pub area: Option<Area>,
    pub locale: Option<LocaleCode>,
    pub scope: Option<String>,
    /// Theme identifier or Vendor/name code
    pub theme: Option<String>,
    /// Module of the controller handling the current request
    pub module: Option<String>,
}

impl TranslateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_area(mut self, area: Area) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_locale(mut self, locale: LocaleCode) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Overlay the slots set in `patch`; unset slots keep their current value
    pub fn merged(&self, patch: &TranslateConfig) -> Self {
        Self {
            area: patch.area.or(self.area),
            locale: patch.locale.clone().or_else(|| self.locale.clone()),
            scope: patch.scope.clone().or_else(|| self.scope.clone()),
            theme: patch.theme.clone().or_else(|| self.theme.clone()),
            module: patch.module.clone().or_else(|| self.module.clone()),
        }
    }

    pub fn area_str(&self) -> &str {
        self.area.map(|a| a.as_str()).unwrap_or("")
    }

    pub fn locale_str(&self) -> &str {
        self.locale.as_ref().map(LocaleCode::as_str).unwrap_or("")
    }

    pub fn scope_str(&self) -> &str {
        self.scope.as_deref().unwrap_or("")
    }

    pub fn theme_str(&self) -> &str {
        self.theme.as_deref().unwrap_or("")
    }

    pub fn module_str(&self) -> &str {
        self.module.as_deref().unwrap_or("")
    }
}
