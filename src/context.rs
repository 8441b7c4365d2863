//! Request context collaborators: area, locale and store scope.

use crate::error::TranslateError;
use crate::theme::{Area, LocaleCode};

/// Application state of the running request
pub trait AppState: Send + Sync {
    /// Current area; fails when the application has not entered one yet
    fn area_code(&self) -> Result<Area, TranslateError>;

    /// Module of the controller serving the request, if any
    fn controller_module(&self) -> Option<String> {
        None
    }
}

pub trait LocaleResolver: Send + Sync {
    fn locale(&self) -> LocaleCode;
}

pub trait ScopeResolver: Send + Sync {
    /// Code of the current store scope (e.g. "default")
    fn scope_code(&self) -> String;
}

/// Fixed context values, e.g. from command-line options
#[derive(Debug, Clone)]
pub struct StaticContext {
    pub area: Option<Area>,
    pub locale: LocaleCode,
    pub scope: String,
    pub module: Option<String>,
}

impl StaticContext {
    pub fn new(area: Option<Area>, locale: LocaleCode, scope: impl Into<String>) -> Self {
        Self {
            area,
            locale,
            scope: scope.into(),
            module: None,
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

impl Default for StaticContext {
    fn default() -> Self {
        Self::new(None, LocaleCode::new("en_US"), "default")
    }
}

impl AppState for StaticContext {
    fn area_code(&self) -> Result<Area, TranslateError> {
        self.area.ok_or(TranslateError::AreaNotSet)
    }

    fn controller_module(&self) -> Option<String> {
        self.module.clone()
    }
}

impl LocaleResolver for StaticContext {
    fn locale(&self) -> LocaleCode {
        self.locale.clone()
    }
}

impl ScopeResolver for StaticContext {
    fn scope_code(&self) -> String {
        self.scope.clone()
    }
}
