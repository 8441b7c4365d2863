//! Design: the active theme and its ancestry.

use crate::error::TranslateError;
use crate::theme::{resolve_parent_chain, Area, Theme, ThemeCode};

/// Resolves the active theme and parent links
pub trait Design: Send + Sync {
    /// Theme active for the current request
    fn design_theme(&self) -> Option<&Theme>;

    /// Installed parent of `theme`, if any
    fn parent_theme(&self, theme: &Theme) -> Option<&Theme>;

    /// Identifier stored in the theme slot of the translation config
    fn theme_id(&self) -> Option<String> {
        self.design_theme().map(Theme::full_name)
    }

    /// Ancestors of the active theme, immediate parent first, root last
    fn parent_chain(&self) -> Vec<&Theme> {
        let Some(active) = self.design_theme() else {
            return Vec::new();
        };

        let mut chain: Vec<&Theme> = Vec::new();
        let mut current = self.parent_theme(active);
        while let Some(theme) = current {
            if theme.code() == active.code() || chain.iter().any(|t| t.code() == theme.code()) {
                tracing::warn!(theme = %active.full_name(), parent = %theme.full_name(), "Theme parent cycle");
                break;
            }
            chain.push(theme);
            current = self.parent_theme(theme);
        }

        chain
    }
}

/// Design over a list of installed themes with one active theme
#[derive(Debug, Clone, Default)]
pub struct ThemeDesign {
    themes: Vec<Theme>,
    active: Option<usize>,
}

impl ThemeDesign {
    /// Design with `code` of `area` active.
    ///
    /// Fails when that theme is not among `themes`.
    pub fn new(themes: Vec<Theme>, area: Area, code: &ThemeCode) -> Result<Self, TranslateError> {
        let active = themes
            .iter()
            .position(|t| t.area == area && t.code() == *code)
            .ok_or_else(|| TranslateError::ThemeNotFound {
                area: area.as_str().to_string(),
                theme: code.to_string(),
            })?;

        Ok(Self {
            themes,
            active: Some(active),
        })
    }

    /// Design without an active theme
    pub fn inactive(themes: Vec<Theme>) -> Self {
        Self {
            themes,
            active: None,
        }
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }
}

impl Design for ThemeDesign {
    fn design_theme(&self) -> Option<&Theme> {
        self.active.and_then(|i| self.themes.get(i))
    }

    fn parent_theme(&self, theme: &Theme) -> Option<&Theme> {
        let parent = theme.parent.as_ref()?;
        self.themes
            .iter()
            .find(|t| t.area == theme.area && t.code() == *parent)
    }

    fn parent_chain(&self) -> Vec<&Theme> {
        self.design_theme()
            .map(|active| resolve_parent_chain(active, &self.themes))
            .unwrap_or_default()
    }
}
