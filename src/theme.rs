//! Themes, locales and areas: the dimensions a translation load is keyed on.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Theme code in "Vendor/name" format (e.g., "Magento/luma").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeCode(Arc<str>);

impl ThemeCode {
    /// Create a new ThemeCode from vendor and name
    pub fn new(vendor: &str, name: &str) -> Self {
        Self(Arc::from(format!("{}/{}", vendor, name)))
    }

    /// Parse a ThemeCode from "Vendor/name" format
    /// Returns None if format is invalid
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(vendor), Some(name), None) if !vendor.is_empty() && !name.is_empty() => {
                Some(Self(Arc::from(s)))
            }
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn vendor(&self) -> &str {
        self.0.split_once('/').map_or(self.as_str(), |(vendor, _)| vendor)
    }

    pub fn name(&self) -> &str {
        self.0.split_once('/').map_or("", |(_, name)| name)
    }
}

impl fmt::Display for ThemeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locale code (e.g., "en_US", "nl_NL")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleCode(Arc<str>);

impl LocaleCode {
    /// Locale as given; use `validated` for user input
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Accepts `ll_CC` or `ll_Script_CC` (en_US, pt_BR, zh_Hans_CN, ...)
    pub fn validated(s: &str) -> Result<Self, String> {
        if Self::validate_format(s) {
            Ok(Self(Arc::from(s)))
        } else {
            Err(format!(
                "invalid locale format '{}': expected xx_YY or xx_Script_YY (e.g., en_US, zh_Hans_CN)",
                s
            ))
        }
    }

    fn validate_format(s: &str) -> bool {
        let parts: Vec<&str> = s.split('_').collect();
        let (language, script, country) = match parts.as_slice() {
            [language, country] => (*language, None, *country),
            [language, script, country] => (*language, Some(*script), *country),
            _ => return false,
        };

        let is_script = |script: &str| {
            let bytes = script.as_bytes();
            bytes.len() == 4
                && bytes[0].is_ascii_uppercase()
                && bytes[1..].iter().all(u8::is_ascii_lowercase)
        };

        language.len() == 2
            && language.bytes().all(|b| b.is_ascii_lowercase())
            && country.len() == 2
            && country.bytes().all(|b| b.is_ascii_uppercase())
            && script.map_or(true, is_script)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this locale's translation dictionary (e.g. "en_US.csv")
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.0)
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LocaleCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Magento application area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Global,
    Frontend,
    Adminhtml,
    Crontab,
    WebapiRest,
    WebapiSoap,
    Graphql,
}

impl Area {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Global => "global",
            Area::Frontend => "frontend",
            Area::Adminhtml => "adminhtml",
            Area::Crontab => "crontab",
            Area::WebapiRest => "webapi_rest",
            Area::WebapiSoap => "webapi_soap",
            Area::Graphql => "graphql",
        }
    }

    #[inline]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "global" => Some(Area::Global),
            "frontend" => Some(Area::Frontend),
            "adminhtml" => Some(Area::Adminhtml),
            "crontab" => Some(Area::Crontab),
            "webapi_rest" => Some(Area::WebapiRest),
            "webapi_soap" => Some(Area::WebapiSoap),
            "graphql" => Some(Area::Graphql),
            _ => None,
        }
    }

    /// Areas that carry design themes under app/design/
    pub const DESIGN_AREAS: [Area; 2] = [Area::Frontend, Area::Adminhtml];

    /// Theme used when none is configured for this area
    pub fn default_theme(&self) -> Option<ThemeCode> {
        match self {
            Area::Frontend => Some(ThemeCode::new("Magento", "luma")),
            Area::Adminhtml => Some(ThemeCode::new("Magento", "backend")),
            _ => None,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Magento theme with its location and parent link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Vendor name (e.g., "Magento")
    pub vendor: String,
    /// Theme name (e.g., "blank", "luma")
    pub name: String,
    pub area: Area,
    /// Full path to theme directory
    pub path: PathBuf,
    /// Parent theme in inheritance chain (None if root)
    pub parent: Option<ThemeCode>,
}

impl Theme {
    pub fn code(&self) -> ThemeCode {
        ThemeCode::new(&self.vendor, &self.name)
    }

    /// `Vendor/name`, the value stored in the theme slot of a load config
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.vendor, self.name)
    }
}

/// Parent declared in theme.xml; malformed XML counts as no parent
pub fn parse_theme_xml(xml: &str) -> Option<ThemeCode> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut in_parent = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"parent" => {
                in_parent = true;
            }
            Ok(Event::Text(e)) if in_parent => {
                return e.unescape().ok().and_then(|s| ThemeCode::parse(s.trim()));
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"parent" => {
                in_parent = false;
            }
            Ok(Event::Eof) => return None,
            Err(_) => return None,
            _ => {}
        }
    }
}

/// Resolve full parent chain for a theme (immediate parent first, root last).
///
/// Parents are matched within the theme's own area. Traversal stops at a
/// parent that is not installed or one already seen on the chain.
pub fn resolve_parent_chain<'a>(theme: &Theme, all_themes: &'a [Theme]) -> Vec<&'a Theme> {
    let mut chain: Vec<&'a Theme> = Vec::with_capacity(4);
    let mut current_parent = theme.parent.as_ref();

    while let Some(parent_code) = current_parent {
        if *parent_code == theme.code() || chain.iter().any(|t| t.code() == *parent_code) {
            tracing::warn!(theme = %theme.full_name(), parent = %parent_code, "Theme parent cycle");
            break;
        }

        let Some(parent_theme) = all_themes
            .iter()
            .find(|t| t.area == theme.area && t.code() == *parent_code)
        else {
            break;
        };

        chain.push(parent_theme);
        current_parent = parent_theme.parent.as_ref();
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_theme(vendor: &str, name: &str, area: Area, parent: Option<&str>) -> Theme {
        Theme {
            vendor: vendor.to_string(),
            name: name.to_string(),
            area,
            path: PathBuf::from(format!("/app/design/{}/{}/{}", area, vendor, name)),
            parent: parent.and_then(ThemeCode::parse),
        }
    }

    // ==================== ThemeCode tests ====================

    #[test]
    fn test_theme_code_new() {
        let code = ThemeCode::new("Magento", "luma");
        assert_eq!(code.as_str(), "Magento/luma");
        assert_eq!(code.vendor(), "Magento");
        assert_eq!(code.name(), "luma");
    }

    #[test]
    fn test_theme_code_parse_invalid() {
        assert!(ThemeCode::parse("invalid").is_none());
        assert!(ThemeCode::parse("too/many/slashes").is_none());
        assert!(ThemeCode::parse("").is_none());
        assert!(ThemeCode::parse("/luma").is_none());
        assert!(ThemeCode::parse("Magento/").is_none());
    }

    #[test]
    fn test_theme_code_equality() {
        let code1 = ThemeCode::new("Magento", "blank");
        let code2 = ThemeCode::parse("Magento/blank").unwrap();
        assert_eq!(code1, code2);
    }

    // ==================== LocaleCode tests ====================

    #[test]
    fn test_locale_code_validated() {
        assert!(LocaleCode::validated("en_US").is_ok());
        assert!(LocaleCode::validated("de_DE").is_ok());
        assert!(LocaleCode::validated("EN_US").is_err());
        assert!(LocaleCode::validated("en_us").is_err());
        assert!(LocaleCode::validated("english").is_err());
        assert!(LocaleCode::validated("").is_err());
    }

    #[test]
    fn test_locale_code_validated_with_script() {
        assert!(LocaleCode::validated("zh_Hans_CN").is_ok());
        assert!(LocaleCode::validated("sr_Latn_RS").is_ok());
        assert!(LocaleCode::validated("az_Latn_AZ").is_ok());
        assert!(LocaleCode::validated("zh_hans_CN").is_err());
        assert!(LocaleCode::validated("zh_HANS_CN").is_err());
        assert!(LocaleCode::validated("zh_Han_CN").is_err());
        assert!(LocaleCode::validated("zh_Hans_CN_X").is_err());
    }

    #[test]
    fn test_locale_code_csv_file_name() {
        assert_eq!(LocaleCode::new("fr_FR").csv_file_name(), "fr_FR.csv");
    }

    // ==================== Area tests ====================

    #[test]
    fn test_area_parse_round_trip() {
        for area in [
            Area::Global,
            Area::Frontend,
            Area::Adminhtml,
            Area::Crontab,
            Area::WebapiRest,
            Area::WebapiSoap,
            Area::Graphql,
        ] {
            assert_eq!(Area::parse(area.as_str()), Some(area));
        }
        assert_eq!(Area::parse("invalid"), None);
        assert_eq!(Area::parse(""), None);
    }

    #[test]
    fn test_area_default_theme() {
        assert_eq!(
            Area::Frontend.default_theme().unwrap().as_str(),
            "Magento/luma"
        );
        assert_eq!(
            Area::Adminhtml.default_theme().unwrap().as_str(),
            "Magento/backend"
        );
        assert!(Area::Crontab.default_theme().is_none());
    }

    // ==================== XML parsing tests ====================

    #[test]
    fn test_parse_theme_xml_with_parent() {
        let xml = r#"<?xml version="1.0"?>
<theme xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <title>Magento Luma</title>
    <parent>Magento/blank</parent>
</theme>"#;

        assert_eq!(parse_theme_xml(xml).unwrap().as_str(), "Magento/blank");
    }

    #[test]
    fn test_parse_theme_xml_no_parent() {
        let xml = r#"<theme><title>Magento Blank</title></theme>"#;
        assert!(parse_theme_xml(xml).is_none());
    }

    #[test]
    fn test_parse_theme_xml_malformed() {
        assert!(parse_theme_xml("not xml at all").is_none());
    }

    // ==================== Parent chain tests ====================

    #[test]
    fn test_resolve_parent_chain_three_levels() {
        let blank = make_theme("Magento", "blank", Area::Frontend, None);
        let luma = make_theme("Magento", "luma", Area::Frontend, Some("Magento/blank"));
        let child = make_theme("Acme", "store", Area::Frontend, Some("Magento/luma"));
        let all = vec![blank, luma, child.clone()];

        let chain = resolve_parent_chain(&child, &all);
        let names: Vec<_> = chain.iter().map(|t| t.full_name()).collect();

        assert_eq!(names, vec!["Magento/luma", "Magento/blank"]);
    }

    #[test]
    fn test_resolve_parent_chain_different_area() {
        let parent = make_theme("Magento", "blank", Area::Adminhtml, None);
        let child = make_theme("Acme", "store", Area::Frontend, Some("Magento/blank"));

        assert!(resolve_parent_chain(&child, &[parent]).is_empty());
    }

    #[test]
    fn test_resolve_parent_chain_stops_on_cycle() {
        let a = make_theme("Acme", "a", Area::Frontend, Some("Acme/b"));
        let b = make_theme("Acme", "b", Area::Frontend, Some("Acme/a"));
        let all = vec![a.clone(), b];

        let chain = resolve_parent_chain(&a, &all);

        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].full_name(), "Acme/b");
    }
}
