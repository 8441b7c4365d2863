//! CLI configuration and runtime settings for translation loading.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::theme::{Area, LocaleCode, ThemeCode};

/// Load merged Magento 2 translations for an area, theme and locale
#[derive(Parser, Debug)]
#[command(name = "magento-translate")]
#[command(version)]
#[command(about = "Load merged Magento 2 translations for an area, theme and locale")]
pub struct Cli {
    /// Magento root directory
    #[arg(default_value = ".")]
    pub magento_root: PathBuf,

    /// Area to load (frontend, adminhtml, ...)
    #[arg(short, long, default_value = "frontend")]
    pub area: String,

    /// Active theme in Vendor/name format (default: the area's stock theme)
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Locale to load
    #[arg(short, long, default_value = "en_US")]
    pub locale: String,

    /// Store scope code
    #[arg(short, long, default_value = "default")]
    pub scope: String,

    /// Module of the current controller; its translations win among modules
    #[arg(short, long)]
    pub module: Option<String>,

    /// Rebuild from source files without reading or writing the cache
    #[arg(short, long)]
    pub force_reload: bool,

    /// Use a throwaway in-memory cache instead of the cache directory
    #[arg(long)]
    pub no_cache: bool,

    /// Cache directory (default: <magento_root>/var/cache/translate)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Remove all cached translations before loading
    #[arg(long)]
    pub clean_cache: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Only print translations of these phrases (repeatable)
    #[arg(short, long = "phrase")]
    pub phrases: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

/// Where loaded dictionaries are cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheMode {
    Memory,
    Directory(PathBuf),
}

/// Runtime configuration parsed from CLI
#[derive(Debug, Clone)]
pub struct Config {
    pub magento_root: PathBuf,
    pub area: Area,
    /// Active theme (None = area default)
    pub theme: Option<ThemeCode>,
    pub locale: LocaleCode,
    pub scope: String,
    pub module: Option<String>,
    pub force_reload: bool,
    pub cache: CacheMode,
    pub clean_cache: bool,
    pub format: OutputFormat,
    pub phrases: Vec<String>,
    pub verbose: bool,
}

impl Config {
    /// Create Config from CLI arguments
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let magento_root = cli.magento_root.canonicalize().unwrap_or(cli.magento_root);

        let Some(area) = Area::parse(&cli.area) else {
            anyhow::bail!("unknown area '{}'", cli.area);
        };

        let theme = match cli.theme {
            Some(theme) => match ThemeCode::parse(&theme) {
                Some(code) => Some(code),
                None => anyhow::bail!("invalid theme '{}': expected Vendor/name", theme),
            },
            None => None,
        };

        let locale = LocaleCode::validated(&cli.locale).map_err(anyhow::Error::msg)?;

        let cache = if cli.no_cache {
            CacheMode::Memory
        } else {
            CacheMode::Directory(
                cli.cache_dir
                    .unwrap_or_else(|| magento_root.join("var").join("cache").join("translate")),
            )
        };

        Ok(Config {
            magento_root,
            area,
            theme,
            locale,
            scope: cli.scope,
            module: cli.module,
            force_reload: cli.force_reload,
            cache,
            clean_cache: cli.clean_cache,
            format: cli.format,
            phrases: cli.phrases,
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cli(area: &str, theme: Option<&str>, locale: &str) -> Cli {
        Cli {
            magento_root: PathBuf::from("/nonexistent/magento"),
            area: area.to_string(),
            theme: theme.map(str::to_string),
            locale: locale.to_string(),
            scope: "default".to_string(),
            module: None,
            force_reload: false,
            no_cache: false,
            cache_dir: None,
            clean_cache: false,
            format: OutputFormat::Json,
            phrases: Vec::new(),
            verbose: false,
        }
    }

    // ==================== Cli parsing tests ====================

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["magento-translate"]).unwrap();

        assert_eq!(cli.magento_root, PathBuf::from("."));
        assert_eq!(cli.area, "frontend");
        assert_eq!(cli.locale, "en_US");
        assert_eq!(cli.scope, "default");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.theme.is_none());
        assert!(!cli.force_reload);
    }

    #[test]
    fn test_cli_repeatable_phrases_and_format() {
        let cli = Cli::try_parse_from([
            "magento-translate",
            "/var/www",
            "-p",
            "Add to Cart",
            "--phrase",
            "Home",
            "--format",
            "csv",
        ])
        .unwrap();

        assert_eq!(cli.phrases, vec!["Add to Cart", "Home"]);
        assert_eq!(cli.format, OutputFormat::Csv);
    }

    // ==================== Config::from_cli tests ====================

    #[test]
    fn test_config_from_cli_basic() {
        let config = Config::from_cli(make_cli("adminhtml", Some("Magento/backend"), "nl_NL")).unwrap();

        assert_eq!(config.area, Area::Adminhtml);
        assert_eq!(config.theme.unwrap().as_str(), "Magento/backend");
        assert_eq!(config.locale.as_str(), "nl_NL");
        assert_eq!(
            config.cache,
            CacheMode::Directory(PathBuf::from("/nonexistent/magento/var/cache/translate"))
        );
    }

    #[test]
    fn test_config_from_cli_no_cache() {
        let mut cli = make_cli("frontend", None, "en_US");
        cli.no_cache = true;
        cli.cache_dir = Some(PathBuf::from("/tmp/ignored"));

        assert_eq!(Config::from_cli(cli).unwrap().cache, CacheMode::Memory);
    }

    #[test]
    fn test_config_from_cli_custom_cache_dir() {
        let mut cli = make_cli("frontend", None, "en_US");
        cli.cache_dir = Some(PathBuf::from("/tmp/translate-cache"));

        assert_eq!(
            Config::from_cli(cli).unwrap().cache,
            CacheMode::Directory(PathBuf::from("/tmp/translate-cache"))
        );
    }

    #[test]
    fn test_config_from_cli_invalid_area() {
        assert!(Config::from_cli(make_cli("storefront", None, "en_US")).is_err());
    }

    #[test]
    fn test_config_from_cli_invalid_theme() {
        assert!(Config::from_cli(make_cli("frontend", Some("luma"), "en_US")).is_err());
    }

    #[test]
    fn test_config_from_cli_invalid_locale() {
        assert!(Config::from_cli(make_cli("frontend", None, "en_us")).is_err());
    }

    #[test]
    fn test_config_from_cli_script_locale() {
        let config = Config::from_cli(make_cli("frontend", None, "zh_Hans_CN")).unwrap();

        assert_eq!(config.locale.as_str(), "zh_Hans_CN");
        assert_eq!(config.locale.csv_file_name(), "zh_Hans_CN.csv");
    }
}
