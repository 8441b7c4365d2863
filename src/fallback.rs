//! Theme fallback: which theme dictionaries to load, and in what order.
//!
//! Ancestors load first (root-most parent to immediate parent) and the active
//! theme loads last, so the most specific theme wins on conflicting phrases.

use std::path::PathBuf;

use crate::design::Design;
use crate::theme::{LocaleCode, Theme};
use crate::translate_config::TranslateConfig;
use crate::view::ViewFileSystem;

/// Parent themes of the active theme, root-most first
pub fn parent_themes_list(design: &dyn Design) -> Vec<&Theme> {
    let mut themes = design.parent_chain();
    themes.reverse();
    themes
}

fn theme_translation_file_name(
    view: &dyn ViewFileSystem,
    locale: &LocaleCode,
    config: &TranslateConfig,
) -> Option<PathBuf> {
    view.locale_file_name(&format!("i18n/{}", locale.csv_file_name()), config)
}

/// Dictionary files for the theme fallback, in load order.
///
/// One entry per ancestor (resolved with the theme slot set to that
/// ancestor's code) followed by the active theme's entry (resolved with
/// `config` as given). Entries are None where a theme ships no dictionary.
pub fn theme_translation_files(
    design: &dyn Design,
    view: &dyn ViewFileSystem,
    config: &TranslateConfig,
    locale: &LocaleCode,
) -> Vec<Option<PathBuf>> {
    let mut files: Vec<Option<PathBuf>> = parent_themes_list(design)
        .into_iter()
        .map(|theme| {
            let theme_config = config.clone().with_theme(theme.code().as_str());
            theme_translation_file_name(view, locale, &theme_config)
        })
        .collect();

    files.push(theme_translation_file_name(view, locale, config));
    files
}
