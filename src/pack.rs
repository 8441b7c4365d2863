//! Language packs: installable translation bundles declared by language.xml.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::TranslateError;
use crate::reader::FileDataReader;
use crate::scanner::discover_language_packs;
use crate::theme::LocaleCode;
use crate::translations::Dictionary;

/// Reference to another pack in a `<use/>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRef {
    pub vendor: String,
    pub package: String,
}

impl PackRef {
    pub fn key(&self) -> String {
        pack_key(&self.vendor, &self.package)
    }
}

/// A language pack declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePack {
    pub code: LocaleCode,
    pub vendor: String,
    pub package: String,
    pub sort_order: i32,
    /// Packs this one inherits from
    pub uses: Vec<PackRef>,
    /// Directory holding language.xml and the CSV dictionaries
    pub path: PathBuf,
}

impl LanguagePack {
    /// Case-insensitive "vendor|package" identity
    pub fn key(&self) -> String {
        pack_key(&self.vendor, &self.package)
    }
}

fn pack_key(vendor: &str, package: &str) -> String {
    format!("{}|{}", vendor.to_lowercase(), package.to_lowercase())
}

/// Parse language.xml content.
///
/// Returns `Ok(None)` when code, vendor or package is missing.
pub fn parse_language_xml(
    xml: &str,
    path: &Path,
) -> Result<Option<LanguagePack>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut current: Option<Vec<u8>> = None;
    let mut code = None;
    let mut vendor = None;
    let mut package = None;
    let mut sort_order = 0;
    let mut uses = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                current = Some(e.name().as_ref().to_vec());
            }
            Event::Empty(e) if e.name().as_ref() == b"use" => {
                let mut use_vendor = None;
                let mut use_package = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"vendor" => use_vendor = Some(attr.unescape_value()?.to_string()),
                        b"package" => use_package = Some(attr.unescape_value()?.to_string()),
                        _ => {}
                    }
                }
                if let (Some(vendor), Some(package)) = (use_vendor, use_package) {
                    uses.push(PackRef { vendor, package });
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?.trim().to_string();
                match current.as_deref() {
                    Some(b"code") => code = Some(LocaleCode::from(text.as_str())),
                    Some(b"vendor") => vendor = Some(text),
                    Some(b"package") => package = Some(text),
                    Some(b"sort_order") => sort_order = text.parse().unwrap_or(0),
                    _ => {}
                }
            }
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {}
        }
    }

    let (Some(code), Some(vendor), Some(package)) = (code, vendor, package) else {
        return Ok(None);
    };

    Ok(Some(LanguagePack {
        code,
        vendor,
        package,
        sort_order,
        uses,
        path: path.to_path_buf(),
    }))
}

/// Supplies language-pack translations for a locale
pub trait PackDictionary: Send + Sync {
    fn dictionary(&self, locale: &LocaleCode) -> Result<Dictionary, TranslateError>;
}

/// Language packs read from an installation's directories
#[derive(Debug, Clone)]
pub struct FsPackDictionary {
    packs: Vec<LanguagePack>,
    reader: FileDataReader,
}

impl FsPackDictionary {
    pub fn new(packs: Vec<LanguagePack>, reader: FileDataReader) -> Self {
        Self { packs, reader }
    }

    /// Scan app/i18n and vendor for packs
    pub fn discover(magento_root: &Path, reader: FileDataReader) -> Result<Self, TranslateError> {
        Ok(Self::new(discover_language_packs(magento_root)?, reader))
    }

    pub fn packs(&self) -> &[LanguagePack] {
        &self.packs
    }

    fn find(&self, key: &str) -> Option<&LanguagePack> {
        self.packs.iter().find(|p| p.key() == key)
    }

    /// Packs contributing to `locale`, in merge order.
    ///
    /// Inherited packs come before the packs that use them; within one
    /// inheritance level, lower sort_order first.
    pub fn ordered_packs(&self, locale: &LocaleCode) -> Result<Vec<&LanguagePack>, TranslateError> {
        let mut collected: HashMap<String, (usize, &LanguagePack)> = HashMap::new();

        for pack in self.packs.iter().filter(|p| p.code == *locale) {
            self.collect_inherited(pack, 0, &mut Vec::new(), &mut collected)?;
        }

        let mut ordered: Vec<(usize, &LanguagePack)> = collected.into_values().collect();
        ordered.sort_by(|(level_a, a), (level_b, b)| {
            level_b
                .cmp(level_a)
                .then(a.sort_order.cmp(&b.sort_order))
                .then_with(|| a.key().cmp(&b.key()))
        });

        Ok(ordered.into_iter().map(|(_, pack)| pack).collect())
    }

    fn collect_inherited<'a>(
        &'a self,
        pack: &'a LanguagePack,
        level: usize,
        path: &mut Vec<String>,
        collected: &mut HashMap<String, (usize, &'a LanguagePack)>,
    ) -> Result<(), TranslateError> {
        let key = pack.key();
        if path.contains(&key) {
            return Err(TranslateError::CircularPackInheritance { pack: key });
        }
        // A pack reached along several paths takes its deepest level
        if collected.get(&key).is_some_and(|(seen, _)| *seen >= level) {
            return Ok(());
        }
        collected.insert(key.clone(), (level, pack));

        path.push(key);
        for used in &pack.uses {
            match self.find(&used.key()) {
                Some(parent) => self.collect_inherited(parent, level + 1, path, collected)?,
                None => tracing::warn!(pack = %pack.key(), uses = %used.key(), "Inherited language pack not installed"),
            }
        }
        path.pop();

        Ok(())
    }

    /// CSV dictionaries of one pack, by file name
    fn pack_files(pack: &LanguagePack) -> Result<Vec<PathBuf>, TranslateError> {
        let entries =
            fs::read_dir(&pack.path).map_err(|e| TranslateError::file_system(&pack.path, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| TranslateError::file_system(&pack.path, e))?
                .path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
                files.push(path);
            }
        }
        files.sort();

        Ok(files)
    }
}

impl PackDictionary for FsPackDictionary {
    fn dictionary(&self, locale: &LocaleCode) -> Result<Dictionary, TranslateError> {
        let mut result = Dictionary::new();

        for pack in self.ordered_packs(locale)? {
            for file in Self::pack_files(pack)? {
                result.extend(self.reader.read_file(&file)?);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_pack(code: &str, vendor: &str, package: &str, sort_order: i32, uses: &[&str]) -> LanguagePack {
        LanguagePack {
            code: LocaleCode::new(code),
            vendor: vendor.to_string(),
            package: package.to_string(),
            sort_order,
            uses: uses
                .iter()
                .map(|u| {
                    let (vendor, package) = u.split_once('|').unwrap();
                    PackRef {
                        vendor: vendor.to_string(),
                        package: package.to_string(),
                    }
                })
                .collect(),
            path: PathBuf::from(format!("/app/i18n/{}/{}", vendor, package)),
        }
    }

    fn keys(packs: &[&LanguagePack]) -> Vec<String> {
        packs.iter().map(|p| p.key()).collect()
    }

    // ==================== language.xml tests ====================

    #[test]
    fn test_parse_language_xml_full() {
        let xml = r#"<?xml version="1.0"?>
<language xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <code>de_CH</code>
    <vendor>Acme</vendor>
    <package>de_ch</package>
    <sort_order>10</sort_order>
    <use vendor="acme" package="de_de"/>
</language>"#;

        let pack = parse_language_xml(xml, Path::new("/packs/de_ch")).unwrap().unwrap();

        assert_eq!(pack.code.as_str(), "de_CH");
        assert_eq!(pack.key(), "acme|de_ch");
        assert_eq!(pack.sort_order, 10);
        assert_eq!(pack.uses.len(), 1);
        assert_eq!(pack.uses[0].key(), "acme|de_de");
        assert_eq!(pack.path, PathBuf::from("/packs/de_ch"));
    }

    #[test]
    fn test_parse_language_xml_incomplete() {
        let xml = "<language><code>de_DE</code></language>";
        assert!(parse_language_xml(xml, Path::new("/x")).unwrap().is_none());
    }

    #[test]
    fn test_parse_language_xml_malformed() {
        let xml = "<language><code>de_DE</vendor></language>";
        assert!(parse_language_xml(xml, Path::new("/x")).is_err());
    }

    // ==================== ordering tests ====================

    #[test]
    fn test_ordered_packs_filters_by_locale_and_sort_order() {
        let dictionary = FsPackDictionary::new(
            vec![
                make_pack("fr_FR", "b", "fr_fr", 20, &[]),
                make_pack("fr_FR", "a", "fr_fr", 10, &[]),
                make_pack("de_DE", "a", "de_de", 0, &[]),
            ],
            FileDataReader::local(),
        );

        let ordered = dictionary.ordered_packs(&LocaleCode::new("fr_FR")).unwrap();
        assert_eq!(keys(&ordered), vec!["a|fr_fr", "b|fr_fr"]);
    }

    #[test]
    fn test_ordered_packs_inherited_first() {
        let dictionary = FsPackDictionary::new(
            vec![
                make_pack("de_CH", "acme", "de_ch", 0, &["acme|de_de"]),
                make_pack("de_DE", "acme", "de_de", 100, &[]),
            ],
            FileDataReader::local(),
        );

        let ordered = dictionary.ordered_packs(&LocaleCode::new("de_CH")).unwrap();
        assert_eq!(keys(&ordered), vec!["acme|de_de", "acme|de_ch"]);
    }

    #[test]
    fn test_ordered_packs_same_locale_parent_scanned_first() {
        let dictionary = FsPackDictionary::new(
            vec![
                make_pack("fr_FR", "acme", "y", 0, &[]),
                make_pack("fr_FR", "acme", "x", 0, &["acme|y"]),
            ],
            FileDataReader::local(),
        );

        let ordered = dictionary.ordered_packs(&LocaleCode::new("fr_FR")).unwrap();
        assert_eq!(keys(&ordered), vec!["acme|y", "acme|x"]);
    }

    #[test]
    fn test_ordered_packs_diamond_takes_deepest_level() {
        let dictionary = FsPackDictionary::new(
            vec![
                make_pack("fr_CA", "acme", "x", 0, &["acme|z", "acme|y"]),
                make_pack("fr_FR", "acme", "y", 0, &["acme|z"]),
                make_pack("fr_FR", "acme", "z", 0, &[]),
            ],
            FileDataReader::local(),
        );

        let ordered = dictionary.ordered_packs(&LocaleCode::new("fr_CA")).unwrap();
        assert_eq!(keys(&ordered), vec!["acme|z", "acme|y", "acme|x"]);
    }

    #[test]
    fn test_ordered_packs_circular_inheritance() {
        let dictionary = FsPackDictionary::new(
            vec![
                make_pack("de_CH", "acme", "de_ch", 0, &["acme|de_de"]),
                make_pack("de_DE", "acme", "de_de", 0, &["acme|de_ch"]),
            ],
            FileDataReader::local(),
        );

        let result = dictionary.ordered_packs(&LocaleCode::new("de_CH"));
        assert!(matches!(
            result,
            Err(TranslateError::CircularPackInheritance { .. })
        ));
    }

    #[test]
    fn test_ordered_packs_missing_parent_ignored() {
        let dictionary = FsPackDictionary::new(
            vec![make_pack("de_CH", "acme", "de_ch", 0, &["other|de_de"])],
            FileDataReader::local(),
        );

        let ordered = dictionary.ordered_packs(&LocaleCode::new("de_CH")).unwrap();
        assert_eq!(keys(&ordered), vec!["acme|de_ch"]);
    }

    // ==================== dictionary tests ====================

    #[test]
    fn test_dictionary_merges_pack_files() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("de_de");
        let child = temp.path().join("de_ch");
        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(&child).unwrap();
        fs::write(base.join("a.csv"), "Cart,Warenkorb\nStreet,Straße\n").unwrap();
        fs::write(base.join("b.csv"), "Home,Startseite\n").unwrap();
        fs::write(base.join("language.xml"), "<language/>").unwrap();
        fs::write(child.join("de_CH.csv"), "Street,Strasse\n").unwrap();

        let mut de_de = make_pack("de_DE", "acme", "de_de", 0, &[]);
        de_de.path = base;
        let mut de_ch = make_pack("de_CH", "acme", "de_ch", 0, &["acme|de_de"]);
        de_ch.path = child;

        let dictionary = FsPackDictionary::new(vec![de_ch, de_de], FileDataReader::local());
        let data = dictionary.dictionary(&LocaleCode::new("de_CH")).unwrap();

        assert_eq!(data["Cart"], "Warenkorb");
        assert_eq!(data["Home"], "Startseite");
        assert_eq!(data["Street"], "Strasse");
    }

    #[test]
    fn test_dictionary_no_packs_for_locale() {
        let dictionary = FsPackDictionary::new(Vec::new(), FileDataReader::local());
        assert!(dictionary
            .dictionary(&LocaleCode::new("en_US"))
            .unwrap()
            .is_empty());
    }
}
