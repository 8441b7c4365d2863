//! Installation scanning: themes, modules and language packs.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::TranslateError;
use crate::module::Module;
use crate::pack::{parse_language_xml, LanguagePack};
use crate::theme::{parse_theme_xml, Area, Theme};

/// Locate a module's etc/module.xml and read its declared name.
///
/// Returns the module name and the directory holding `etc/`.
fn get_module(package_path: &Path) -> Option<(String, PathBuf)> {
    // Try etc/module.xml first
    let mut module_dir = package_path.to_path_buf();
    if !module_dir.join("etc").join("module.xml").exists() {
        // Try src/etc/module.xml
        module_dir = package_path.join("src");
        if !module_dir.join("etc").join("module.xml").exists() {
            return None;
        }
    }

    let content = fs::read_to_string(module_dir.join("etc").join("module.xml")).ok()?;
    let name = parse_module_xml(&content)?;
    Some((name, module_dir))
}

/// Parse module name from module.xml content
pub fn parse_module_xml(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"module" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"name" {
                        return attr.unescape_value().ok().map(|s| s.to_string());
                    }
                }
            }
            Ok(Event::Eof) => return None,
            Err(_) => return None,
            _ => {}
        }
    }
}

/// Directories exactly two levels below `base` (Vendor/Package layout)
fn package_dirs(base: &Path) -> Vec<PathBuf> {
    if !base.exists() {
        return Vec::new();
    }

    WalkDir::new(base)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect()
}

/// Discover all themes in app/design/{area}/ using parallel iteration
#[must_use = "this returns the discovered themes which should be processed"]
pub fn discover_themes(magento_root: &Path, area: Area) -> Result<Vec<Theme>, TranslateError> {
    let design_path = magento_root.join("app").join("design").join(area.as_str());

    if !design_path.exists() {
        return Ok(Vec::new());
    }

    let theme_dirs = package_dirs(&design_path);

    let themes: Vec<Theme> = theme_dirs
        .par_iter()
        .filter_map(|theme_path| {
            let theme_xml_path = theme_path.join("theme.xml");
            if !theme_xml_path.exists() {
                return None;
            }

            let vendor = theme_path.parent()?.file_name()?.to_string_lossy().to_string();
            let name = theme_path.file_name()?.to_string_lossy().to_string();

            let xml_content = match fs::read_to_string(&theme_xml_path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %theme_xml_path.display(), error = %e, "Unreadable theme.xml");
                    return None;
                }
            };

            Some(Theme {
                vendor,
                name,
                area,
                path: theme_path.clone(),
                parent: parse_theme_xml(&xml_content),
            })
        })
        .collect();

    tracing::debug!(area = %area, count = themes.len(), "Discovered themes");
    Ok(themes)
}

/// Discover themes of every design area
pub fn discover_all_themes(magento_root: &Path) -> Result<Vec<Theme>, TranslateError> {
    let mut themes = Vec::new();
    for area in Area::DESIGN_AREAS {
        themes.extend(discover_themes(magento_root, area)?);
    }
    Ok(themes)
}

/// Discover modules under app/code/{Vendor}/{Module} and vendor/{vendor}/{package}
pub fn discover_modules(magento_root: &Path) -> Vec<Module> {
    let mut candidates = package_dirs(&magento_root.join("app").join("code"));
    candidates.extend(package_dirs(&magento_root.join("vendor")));

    let modules: Vec<Module> = candidates
        .par_iter()
        .filter_map(|package_path| {
            let (name, path) = get_module(package_path)?;
            Some(Module { name, path })
        })
        .collect();

    tracing::debug!(count = modules.len(), "Discovered modules");
    modules
}

/// Discover language packs under app/i18n/{Vendor}/{pack} and vendor/{vendor}/{package}
pub fn discover_language_packs(magento_root: &Path) -> Result<Vec<LanguagePack>, TranslateError> {
    let mut candidates = package_dirs(&magento_root.join("app").join("i18n"));
    candidates.extend(package_dirs(&magento_root.join("vendor")));

    let packs = candidates
        .par_iter()
        .filter_map(|package_path| {
            let xml_path = package_path.join("language.xml");
            let content = fs::read_to_string(&xml_path).ok()?;
            Some(
                parse_language_xml(&content, package_path)
                    .map_err(|source| TranslateError::InvalidXml {
                        path: xml_path,
                        source,
                    }),
            )
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    tracing::debug!(count = packs.len(), "Discovered language packs");
    Ok(packs)
}
